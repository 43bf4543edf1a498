//! Builder pattern for transport configuration.
//!
//! # Example
//!
//! ```no_run
//! use chat_transport::Transport;
//!
//! # fn example() -> chat_transport::Result<()> {
//! let transport = Transport::builder()
//!     .host("localhost")
//!     .chat_handler(|name: &str, text: &str| println!("{name}: {text}"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handler::{ChatHandler, LogNotifier, Notifier};
use crate::transport::{Connector, WebSocketConnector};

use super::core::Transport;
use super::options::TransportOptions;
use super::router::Router;

// ============================================================================
// TransportBuilder
// ============================================================================

/// Builder for configuring a [`Transport`] instance.
///
/// Use [`Transport::builder()`] to create a new builder.
#[derive(Clone)]
pub struct TransportBuilder {
    /// Channel target.
    options: TransportOptions,
    /// Receives routed chat messages.
    chat_handler: Option<Arc<dyn ChatHandler>>,
    /// User-facing alert surface.
    notifier: Arc<dyn Notifier>,
    /// Connector tried first.
    primary: Option<Arc<dyn Connector>>,
    /// Connector tried when the primary is absent or unavailable.
    fallback: Option<Arc<dyn Connector>>,
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportBuilder")
            .field("options", &self.options)
            .field("chat_handler", &self.chat_handler.is_some())
            .field("primary", &self.primary.as_ref().map(|c| c.name()))
            .field("fallback", &self.fallback.as_ref().map(|c| c.name()))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TransportBuilder Implementation
// ============================================================================

impl TransportBuilder {
    /// Creates a builder targeting `localhost:10001` with the default
    /// WebSocket connector and no fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: TransportOptions::new(),
            chat_handler: None,
            notifier: Arc::new(LogNotifier),
            primary: Some(Arc::new(WebSocketConnector)),
            fallback: None,
        }
    }

    /// Sets the target server hostname.
    #[inline]
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.options.host = host.into();
        self
    }

    /// Sets the target server port.
    #[inline]
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.options.port = port;
        self
    }

    /// Replaces the whole target configuration.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: TransportOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the collaborator that receives chat messages.
    #[inline]
    #[must_use]
    pub fn chat_handler(mut self, handler: impl ChatHandler + 'static) -> Self {
        self.chat_handler = Some(Arc::new(handler));
        self
    }

    /// Sets the user-facing notifier.
    #[inline]
    #[must_use]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Sets the primary connector.
    #[inline]
    #[must_use]
    pub fn connector(mut self, connector: impl Connector + 'static) -> Self {
        self.primary = Some(Arc::new(connector));
        self
    }

    /// Removes the primary connector so only the fallback is tried.
    #[inline]
    #[must_use]
    pub fn without_connector(mut self) -> Self {
        self.primary = None;
        self
    }

    /// Sets the fallback connector.
    #[inline]
    #[must_use]
    pub fn fallback(mut self, connector: impl Connector + 'static) -> Self {
        self.fallback = Some(Arc::new(connector));
        self
    }

    /// Builds the transport with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no chat handler is set
    /// - [`Error::Config`] / [`Error::Url`] if the target is invalid
    pub fn build(self) -> Result<Transport> {
        let chat_handler = self.validate_chat_handler()?;
        let url = self.options.ws_url()?;

        Ok(Transport::new(
            url,
            Router::new(chat_handler),
            self.notifier,
            self.primary,
            self.fallback,
        ))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl TransportBuilder {
    /// Validates the chat handler configuration.
    fn validate_chat_handler(&self) -> Result<Arc<dyn ChatHandler>> {
        self.chat_handler.clone().ok_or_else(|| {
            Error::config(
                "Chat handler is required. Use .chat_handler() to set it.\n\
                 Example: Transport::builder().chat_handler(|name: &str, text: &str| ...)",
            )
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::transport::PlainTcpConnector;

    fn noop_handler(_: &str, _: &str) {}

    #[test]
    fn test_new_uses_defaults() {
        let builder = TransportBuilder::new();
        assert_eq!(builder.options, TransportOptions::new());
        assert!(builder.chat_handler.is_none());
        assert_eq!(builder.primary.as_ref().map(|c| c.name()), Some("websocket"));
        assert!(builder.fallback.is_none());
    }

    #[test]
    fn test_host_and_port() {
        let builder = TransportBuilder::new().host("example.org").port(9000);
        assert_eq!(builder.options.host, "example.org");
        assert_eq!(builder.options.port, 9000);
    }

    #[test]
    fn test_without_connector() {
        let builder = TransportBuilder::new()
            .without_connector()
            .fallback(PlainTcpConnector);

        assert!(builder.primary.is_none());
        assert_eq!(builder.fallback.as_ref().map(|c| c.name()), Some("plain-tcp"));
    }

    #[test]
    fn test_build_fails_without_chat_handler() {
        let err = TransportBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("Chat handler"));
    }

    #[test]
    fn test_build_fails_with_empty_host() {
        let err = TransportBuilder::new()
            .host("")
            .chat_handler(noop_handler)
            .build()
            .unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_build_succeeds() {
        let transport = TransportBuilder::new()
            .chat_handler(noop_handler)
            .build()
            .expect("build");

        assert_eq!(transport.url().as_str(), "ws://localhost:10001/");
        assert!(!transport.is_connected());
    }

    #[test]
    fn test_debug_lists_connectors() {
        let debug = format!("{:?}", TransportBuilder::new());
        assert!(debug.contains("websocket"));
    }
}
