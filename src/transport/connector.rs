//! Channel construction.
//!
//! A [`Connector`] turns a `ws://` URL into an open WebSocket stream.
//! The transport is configured with a primary connector and, optionally,
//! a fallback that is only tried when the primary is absent or reports
//! itself unavailable.
//!
//! | Connector | Handshake |
//! |-----------|-----------|
//! | [`WebSocketConnector`] | `tokio_tungstenite::connect_async` |
//! | [`PlainTcpConnector`] | Own `TcpStream` + `tokio_tungstenite::client_async` |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, client_async, connect_async};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// WebSocket stream produced by every connector.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// Connector
// ============================================================================

/// Opens WebSocket channels.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns `false` if this connector cannot be used in the current
    /// environment.
    fn is_available(&self) -> bool {
        true
    }

    /// Opens a channel to `url` and completes the WebSocket handshake.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the server cannot be reached or the
    /// handshake fails.
    async fn open(&self, url: &Url) -> Result<WsStream>;
}

// ============================================================================
// WebSocketConnector
// ============================================================================

/// Default connector backed by `tokio_tungstenite::connect_async`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketConnector;

#[async_trait]
impl Connector for WebSocketConnector {
    fn name(&self) -> &'static str {
        "websocket"
    }

    async fn open(&self, url: &Url) -> Result<WsStream> {
        let (ws_stream, response) = connect_async(url.as_str())
            .await
            .map_err(|e| Error::connection(format!("WebSocket connect to {url} failed: {e}")))?;

        debug!(%url, status = %response.status(), "WebSocket handshake completed");

        Ok(ws_stream)
    }
}

// ============================================================================
// PlainTcpConnector
// ============================================================================

/// Fallback connector that dials TCP itself before the handshake.
///
/// Only `ws://` URLs are supported.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTcpConnector;

impl PlainTcpConnector {
    /// Extracts `host:port` from a `ws://` URL.
    fn socket_target(url: &Url) -> Result<(String, u16)> {
        if url.scheme() != "ws" {
            return Err(Error::connection(format!(
                "Unsupported scheme for plain TCP: {}",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| Error::connection(format!("URL has no host: {url}")))?;
        let port = url.port_or_known_default().unwrap_or(80);

        Ok((host.to_string(), port))
    }
}

#[async_trait]
impl Connector for PlainTcpConnector {
    fn name(&self) -> &'static str {
        "plain-tcp"
    }

    async fn open(&self, url: &Url) -> Result<WsStream> {
        let (host, port) = Self::socket_target(url)?;

        let stream = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(|e| Error::connection(format!("TCP connect to {host}:{port} failed: {e}")))?;
        stream.set_nodelay(true)?;

        debug!(%host, port, "TCP connection opened");

        let (ws_stream, _) = client_async(url.as_str(), MaybeTlsStream::Plain(stream))
            .await
            .map_err(|e| Error::connection(format!("WebSocket upgrade failed: {e}")))?;

        debug!(%url, "WebSocket handshake completed");

        Ok(ws_stream)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_target() {
        let url = Url::parse("ws://localhost:10001/").expect("url");
        let (host, port) = PlainTcpConnector::socket_target(&url).expect("target");

        assert_eq!(host, "localhost");
        assert_eq!(port, 10001);
    }

    #[test]
    fn test_socket_target_default_port() {
        let url = Url::parse("ws://example.com/").expect("url");
        let (_, port) = PlainTcpConnector::socket_target(&url).expect("target");

        assert_eq!(port, 80);
    }

    #[test]
    fn test_socket_target_rejects_wss() {
        let url = Url::parse("wss://example.com/").expect("url");
        let err = PlainTcpConnector::socket_target(&url).unwrap_err();

        assert!(err.is_connection_error());
    }

    #[test]
    fn test_connectors_available_by_default() {
        assert!(WebSocketConnector.is_available());
        assert!(PlainTcpConnector.is_available());
    }

    #[tokio::test]
    async fn test_open_refused() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let url = Url::parse(&format!("ws://127.0.0.1:{port}/")).expect("url");

        let err = WebSocketConnector.open(&url).await.unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));

        let err = PlainTcpConnector.open(&url).await.unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
    }
}
