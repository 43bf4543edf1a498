//! Chat transport - WebSocket client for a JSON chat protocol.
//!
//! This library keeps one persistent WebSocket connection to a chat
//! server, writes outgoing messages as JSON text frames, and routes
//! incoming frames to a chat handler by their `type` field.
//!
//! # Architecture
//!
//! - [`Transport`] owns the connection state (`Connected` / `Disconnected`)
//! - A [`Connector`] opens the channel; a fallback connector is used only
//!   when the primary is absent or unavailable
//! - Each connection runs a tokio event loop that decodes inbound frames
//!   into [`InboundMessage`] and routes them by `type` to the chat handler
//!
//! # Quick Start
//!
//! ```no_run
//! use chat_transport::{OutboundMessage, Result, Transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let transport = Transport::builder()
//!         .host("localhost")
//!         .chat_handler(|name: &str, text: &str| println!("{name}: {text}"))
//!         .build()?;
//!
//!     transport.connect().await?;
//!     transport.send(&OutboundMessage::chat("Alice", "hi")).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`Transport`], builder, options |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`handler`] | Collaborator traits |
//! | [`protocol`] | Wire message types |
//! | [`transport`] | Connectors and connection event loop |

// ============================================================================
// Modules
// ============================================================================

/// Transport entry point and configuration.
pub mod client;

/// Error types and result aliases.
pub mod error;

/// Collaborator traits invoked by the transport.
pub mod handler;

/// Wire protocol message types.
pub mod protocol;

/// WebSocket connectors and connection event loop.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{ConnectionState, Transport, TransportBuilder, TransportOptions};

// Error types
pub use error::{Error, Result};

// Collaborator types
pub use handler::{ChatHandler, LogNotifier, Notifier};

// Protocol types
pub use protocol::{InboundMessage, OutboundMessage};

// Transport types
pub use transport::{Connector, PlainTcpConnector, WebSocketConnector};
