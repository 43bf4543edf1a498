//! Chat transport client.
//!
//! This module provides the entry point surrounding code uses.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Transport`] | Owns the connection; `connect` and `send` |
//! | [`TransportBuilder`] | Fluent configuration builder |
//! | [`TransportOptions`] | Target host and port |
//! | [`ConnectionState`] | Connected / closed / disconnected status |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for transport configuration.
pub mod builder;

/// Core transport implementation.
pub mod core;

/// Target host and port.
pub mod options;

/// Inbound message dispatch.
mod router;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::TransportBuilder;
pub use self::core::{ConnectionState, Transport, UNAVAILABLE_ALERT};
pub use options::{DEFAULT_HOST, DEFAULT_PORT, TransportOptions};
