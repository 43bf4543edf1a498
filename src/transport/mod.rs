//! WebSocket transport layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Transport      │                              │  Chat server    │
//! │                 │         WebSocket            │                 │
//! │  Connector      │─────────────────────────────►│  ws://host:10001│
//! │  → Connection   │◄────────────────────────────►│                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Connector::open` - Dial the server and complete the handshake
//! 2. `Connection::new` - Spawn the event loop with the inbound handler
//! 3. `Connection::send_text` - Write frames
//! 4. `Connection::shutdown` - Close when replaced by a newer connection
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |
//! | `connector` | Channel construction strategies |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
mod connection;

/// Channel construction.
pub mod connector;

// ============================================================================
// Re-exports
// ============================================================================

pub(crate) use connection::{Connection, InboundHandler};
pub use connector::{Connector, PlainTcpConnector, WebSocketConnector, WsStream};
