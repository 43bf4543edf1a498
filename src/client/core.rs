//! Transport coordinator.
//!
//! The [`Transport`] owns the connection state and is the only entry point
//! surrounding code calls: [`Transport::connect`] and [`Transport::send`].
//!
//! # Example
//!
//! ```no_run
//! use chat_transport::{OutboundMessage, Transport};
//!
//! # async fn example() -> chat_transport::Result<()> {
//! let transport = Transport::builder()
//!     .chat_handler(|name: &str, text: &str| println!("{name}: {text}"))
//!     .build()?;
//!
//! transport.connect().await?;
//! transport.send(&OutboundMessage::chat("Alice", "hi")).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::handler::Notifier;
use crate::protocol::{InboundMessage, encode_frame};
use crate::transport::{Connection, Connector, InboundHandler, WsStream};

use super::builder::TransportBuilder;
use super::router::Router;

// ============================================================================
// Constants
// ============================================================================

/// Shown to the user when no connector can produce a channel.
pub const UNAVAILABLE_ALERT: &str = "Could not open a WebSocket connection. \
     No usable WebSocket transport is available in this build.";

// ============================================================================
// ConnectionState
// ============================================================================

/// Connection status reported by [`Transport::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No successful `connect` yet.
    #[default]
    Disconnected,
    /// The latest connection's event loop is running.
    Connected,
    /// The latest connection has ended (remote close or socket error).
    Closed,
}

/// Handle slot guarded by the transport's mutex.
enum ConnectionSlot {
    /// No successful `connect` yet.
    Empty,
    /// Handle from the latest successful `connect`.
    Held(Connection),
}

impl ConnectionSlot {
    fn status(&self) -> ConnectionState {
        match self {
            Self::Empty => ConnectionState::Disconnected,
            Self::Held(connection) if connection.is_closed() => ConnectionState::Closed,
            Self::Held(_) => ConnectionState::Connected,
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Client-side chat transport.
///
/// Holds at most one live connection. A later successful `connect`
/// replaces and shuts down the previous connection.
///
/// `connect` and `send` are the only ways to touch the channel; the live
/// handle and inbound routing stay inside the crate:
///
/// ```compile_fail
/// use chat_transport::client::Router;
/// ```
///
/// ```compile_fail
/// use chat_transport::transport::Connection;
/// ```
pub struct Transport {
    /// Channel URL, validated at build time.
    url: Url,
    /// Inbound dispatch.
    router: Router,
    /// User-facing alert surface.
    notifier: Arc<dyn Notifier>,
    /// Connector tried first.
    primary: Option<Arc<dyn Connector>>,
    /// Connector tried when the primary is absent or unavailable.
    fallback: Option<Arc<dyn Connector>>,
    /// Current connection handle.
    slot: Mutex<ConnectionSlot>,
}

// ============================================================================
// Transport - Display
// ============================================================================

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("url", &self.url.as_str())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Transport - Public API
// ============================================================================

impl Transport {
    /// Creates a configuration builder for the transport.
    #[inline]
    #[must_use]
    pub fn builder() -> TransportBuilder {
        TransportBuilder::new()
    }

    pub(crate) fn new(
        url: Url,
        router: Router,
        notifier: Arc<dyn Notifier>,
        primary: Option<Arc<dyn Connector>>,
        fallback: Option<Arc<dyn Connector>>,
    ) -> Self {
        Self {
            url,
            router,
            notifier,
            primary,
            fallback,
            slot: Mutex::new(ConnectionSlot::Empty),
        }
    }

    /// Returns the channel URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the current connection status.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.slot.lock().status()
    }

    /// Returns `true` if a handle is held and its event loop is running.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Opens the channel and starts routing inbound messages.
    ///
    /// Uses the primary connector when it is present and available;
    /// otherwise the fallback. When neither yields a channel the notifier
    /// is alerted once and the state is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::TransportUnavailable`] if no connector produced a channel
    /// - [`Error::Connection`] if the primary connector fails to connect
    pub async fn connect(&self) -> Result<()> {
        let ws_stream = match self.open_channel().await {
            Ok(ws_stream) => ws_stream,
            Err(e) => {
                if e.is_unavailable() {
                    self.notifier.alert(UNAVAILABLE_ALERT);
                }
                return Err(e);
            }
        };

        let router = self.router.clone();
        let handler: InboundHandler =
            Arc::new(move |message: InboundMessage| router.route(message));
        let connection = Connection::new(ws_stream, handler);

        let previous = std::mem::replace(
            &mut *self.slot.lock(),
            ConnectionSlot::Held(connection),
        );
        if let ConnectionSlot::Held(previous) = previous {
            debug!("Replacing previous connection");
            previous.shutdown();
        }

        info!(url = %self.url, "Transport connected");

        Ok(())
    }

    /// Serializes `message` and writes it as one text frame.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if `connect` has not succeeded
    /// - [`Error::Json`] if `message` cannot be serialized
    /// - [`Error::ConnectionClosed`] if the connection has ended
    /// - [`Error::WebSocket`] if the write fails
    pub async fn send<T: Serialize + ?Sized>(&self, message: &T) -> Result<()> {
        let connection = self.connection()?;
        let frame = encode_frame(message)?;

        debug!(frame = %frame, closed = connection.is_closed(), "Sending frame");

        connection.send_text(frame).await
    }
}

// ============================================================================
// Transport - Internal
// ============================================================================

impl Transport {
    /// Clones the current handle out of the lock.
    fn connection(&self) -> Result<Connection> {
        match &*self.slot.lock() {
            ConnectionSlot::Held(connection) => Ok(connection.clone()),
            ConnectionSlot::Empty => Err(Error::NotConnected),
        }
    }

    /// Opens a channel with the primary connector, else the fallback.
    async fn open_channel(&self) -> Result<WsStream> {
        if let Some(primary) = self.primary.as_ref().filter(|c| c.is_available()) {
            debug!(connector = primary.name(), url = %self.url, "Opening channel");
            return primary.open(&self.url).await;
        }

        if let Some(fallback) = self.fallback.as_ref().filter(|c| c.is_available()) {
            debug!(connector = fallback.name(), url = %self.url, "Opening channel with fallback");
            match fallback.open(&self.url).await {
                Ok(ws_stream) => return Ok(ws_stream),
                Err(e) => {
                    warn!(connector = fallback.name(), error = %e, "Fallback connector failed");
                }
            }
        }

        Err(Error::TransportUnavailable)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::protocol::OutboundMessage;

    /// Connector that counts attempts and always fails.
    struct FailingConnector {
        available: bool,
        attempts: Arc<AtomicUsize>,
    }

    impl FailingConnector {
        fn new(available: bool) -> (Self, Arc<AtomicUsize>) {
            let attempts = Arc::new(AtomicUsize::new(0));
            let connector = Self {
                available,
                attempts: Arc::clone(&attempts),
            };
            (connector, attempts)
        }
    }

    #[async_trait]
    impl Connector for FailingConnector {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn open(&self, _url: &Url) -> Result<WsStream> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::connection("refused"))
        }
    }

    fn counting_notifier() -> (impl Notifier + 'static, Arc<AtomicUsize>) {
        let alerts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&alerts);
        let notifier = move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
        };
        (notifier, alerts)
    }

    fn builder() -> TransportBuilder {
        Transport::builder().chat_handler(|_: &str, _: &str| {})
    }

    #[tokio::test]
    async fn test_send_before_connect() {
        let transport = builder().build().expect("build");

        let err = transport
            .send(&OutboundMessage::chat("Alice", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotConnected));
    }

    #[tokio::test]
    async fn test_no_connectors_alerts_once() {
        let (notifier, alerts) = counting_notifier();
        let transport = builder()
            .without_connector()
            .notifier(notifier)
            .build()
            .expect("build");

        let err = transport.connect().await.unwrap_err();

        assert!(err.is_unavailable());
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
        assert_eq!(transport.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_fallback_failure_is_unavailable() {
        let (notifier, alerts) = counting_notifier();
        let (fallback, attempts) = FailingConnector::new(true);
        let transport = builder()
            .without_connector()
            .fallback(fallback)
            .notifier(notifier)
            .build()
            .expect("build");

        let err = transport.connect().await.unwrap_err();

        assert!(err.is_unavailable());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn test_unavailable_primary_uses_fallback() {
        let (notifier, alerts) = counting_notifier();
        let (primary, primary_attempts) = FailingConnector::new(false);
        let (fallback, fallback_attempts) = FailingConnector::new(true);
        let transport = builder()
            .connector(primary)
            .fallback(fallback)
            .notifier(notifier)
            .build()
            .expect("build");

        let _ = transport.connect().await;

        assert_eq!(primary_attempts.load(Ordering::SeqCst), 0);
        assert_eq!(fallback_attempts.load(Ordering::SeqCst), 1);
        assert_eq!(alerts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_available_primary_skips_fallback() {
        let (notifier, alerts) = counting_notifier();
        let (primary, primary_attempts) = FailingConnector::new(true);
        let (fallback, fallback_attempts) = FailingConnector::new(true);
        let transport = builder()
            .connector(primary)
            .fallback(fallback)
            .notifier(notifier)
            .build()
            .expect("build");

        let err = transport.connect().await.unwrap_err();

        assert!(matches!(err, Error::Connection { .. }));
        assert_eq!(primary_attempts.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_attempts.load(Ordering::SeqCst), 0);
        assert_eq!(alerts.load(Ordering::SeqCst), 0);
        assert_eq!(transport.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_debug_shows_state() {
        let transport = builder().build().expect("build");
        let debug = format!("{transport:?}");

        assert!(debug.contains("ws://localhost:10001/"));
        assert!(debug.contains("Disconnected"));
    }
}
