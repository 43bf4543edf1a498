//! WebSocket connection and event loop.
//!
//! The connection spawns a tokio task that handles:
//!
//! - Incoming text frames from the server (decoded, then handed to the
//!   inbound handler)
//! - Outgoing frames from the Rust API
//! - Shutdown when the connection is replaced

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::protocol::InboundMessage;

use super::connector::WsStream;

// ============================================================================
// Types
// ============================================================================

/// Inbound handler callback type.
///
/// Called on the event loop task for each decoded inbound frame.
pub(crate) type InboundHandler = Arc<dyn Fn(InboundMessage) + Send + Sync>;

/// Write half of the WebSocket stream.
type WsWrite = SplitSink<WsStream, Message>;

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the event loop.
enum ConnectionCommand {
    /// Write one text frame.
    Send {
        frame: String,
        done_tx: oneshot::Sender<Result<()>>,
    },
    /// Close the socket and stop the loop.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// Handle to a live WebSocket channel.
///
/// Cloning yields another handle to the same event loop.
#[derive(Clone)]
pub(crate) struct Connection {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
}

impl Connection {
    /// Creates a new connection from an open WebSocket stream.
    ///
    /// Spawns the event loop task internally; `handler` receives every
    /// inbound frame that decodes successfully.
    pub(crate) fn new(ws_stream: WsStream, handler: InboundHandler) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        tokio::spawn(Self::run_event_loop(ws_stream, command_rx, handler));

        Self { command_tx }
    }

    /// Writes one text frame and waits for the write to complete.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the event loop has ended
    /// - [`Error::WebSocket`] if the write fails
    pub(crate) async fn send_text(&self, frame: String) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();

        self.command_tx
            .send(ConnectionCommand::Send { frame, done_tx })
            .map_err(|_| Error::ConnectionClosed)?;

        done_rx.await.map_err(|_| Error::ConnectionClosed)?
    }

    /// Returns `true` once the event loop has ended.
    #[inline]
    #[must_use]
    pub(crate) fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    /// Closes the socket and stops the event loop.
    pub(crate) fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Event loop that handles WebSocket I/O.
    async fn run_event_loop(
        ws_stream: WsStream,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        handler: InboundHandler,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();

        loop {
            tokio::select! {
                // Incoming frames from server
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            Self::handle_incoming_frame(&text, &handler);
                        }

                        Some(Ok(Message::Close(frame))) => {
                            debug!(?frame, "WebSocket closed by remote");
                            // Flush the queued close reply
                            let _ = ws_write.close().await;
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Commands from Rust API
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Send { frame, done_tx }) => {
                            let result = Self::handle_send_command(frame, &mut ws_write).await;
                            let _ = done_tx.send(result);
                        }

                        Some(ConnectionCommand::Shutdown) => {
                            debug!("Shutdown command received");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("Command channel closed");
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }
            }
        }

        // Mark handles closed, then fail sends queued behind the exit
        command_rx.close();
        while let Ok(command) = command_rx.try_recv() {
            if let ConnectionCommand::Send { done_tx, .. } = command {
                let _ = done_tx.send(Err(Error::ConnectionClosed));
            }
        }

        debug!("Event loop terminated");
    }

    /// Decodes one text frame and hands it to the inbound handler.
    ///
    /// Decode failures are logged and dropped so later frames still flow.
    fn handle_incoming_frame(text: &str, handler: &InboundHandler) {
        match InboundMessage::decode(text) {
            Ok(message) => {
                trace!(kind = ?message.kind(), "Inbound frame decoded");
                handler(message);
            }
            Err(e) => {
                warn!(error = %e, frame = %text, "Dropping undecodable inbound frame");
            }
        }
    }

    /// Writes one text frame.
    async fn handle_send_command(frame: String, ws_write: &mut WsWrite) -> Result<()> {
        ws_write.send(Message::Text(frame.into())).await?;
        trace!("Frame sent");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
