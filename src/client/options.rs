//! Channel target configuration.
//!
//! # Example
//!
//! ```ignore
//! use chat_transport::TransportOptions;
//!
//! let options = TransportOptions::new().with_host("chat.example.org");
//! assert_eq!(options.ws_url()?.as_str(), "ws://chat.example.org:10001/");
//! ```

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Port the chat server listens on.
pub const DEFAULT_PORT: u16 = 10001;

// ============================================================================
// TransportOptions
// ============================================================================

/// Where the transport connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Target server hostname.
    pub host: String,

    /// Target server port.
    pub port: u16,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl TransportOptions {
    /// Creates options targeting `localhost:10001`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl TransportOptions {
    /// Sets the target host.
    #[inline]
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the target port.
    #[inline]
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

// ============================================================================
// Conversion
// ============================================================================

impl TransportOptions {
    /// Builds the channel URL.
    ///
    /// Format: `ws://{host}:{port}/`
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the host is empty or the port is zero
    /// - [`Error::Url`] if the host is not a valid URL host
    pub fn ws_url(&self) -> Result<Url> {
        let host = self.host.trim();

        if host.is_empty() {
            return Err(Error::config("host must not be empty"));
        }
        if self.port == 0 {
            return Err(Error::config("port must not be zero"));
        }

        Ok(Url::parse(&format!("ws://{host}:{}/", self.port))?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TransportOptions::new();
        assert_eq!(options.host, "localhost");
        assert_eq!(options.port, 10001);
        assert_eq!(options, TransportOptions::default());
    }

    #[test]
    fn test_default_url() {
        let url = TransportOptions::new().ws_url().expect("url");
        assert_eq!(url.as_str(), "ws://localhost:10001/");
    }

    #[test]
    fn test_custom_host_and_port() {
        let url = TransportOptions::new()
            .with_host("chat.example.org")
            .with_port(9000)
            .ws_url()
            .expect("url");

        assert_eq!(url.as_str(), "ws://chat.example.org:9000/");
    }

    #[test]
    fn test_ipv4_host() {
        let url = TransportOptions::new()
            .with_host("127.0.0.1")
            .ws_url()
            .expect("url");

        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(10001));
    }

    #[test]
    fn test_empty_host_rejected() {
        let err = TransportOptions::new().with_host("  ").ws_url().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_zero_port_rejected() {
        let err = TransportOptions::new().with_port(0).ws_url().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_invalid_host_rejected() {
        let err = TransportOptions::new()
            .with_host("bad host/name")
            .ws_url()
            .unwrap_err();

        assert!(matches!(err, Error::Url(_)));
    }
}
