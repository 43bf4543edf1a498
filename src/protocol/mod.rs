//! Wire protocol message types.
//!
//! One JSON object per WebSocket text frame, UTF-8 encoded.
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `OutboundMessage` / any `Serialize` | Client → Server | Caller-defined payload |
//! | `InboundMessage` | Server → Client | Routed by the `type` field |

// ============================================================================
// Submodules
// ============================================================================

/// Inbound frame decoding.
pub mod inbound;

/// Outbound frame encoding.
pub mod outbound;

// ============================================================================
// Re-exports
// ============================================================================

pub use inbound::InboundMessage;
pub use outbound::{OutboundMessage, encode_frame};
