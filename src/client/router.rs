//! Inbound message dispatch.
//!
//! Adding an inbound message kind means adding an [`InboundMessage`]
//! variant and a match arm here; existing arms are untouched.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::{debug, trace};

use crate::handler::ChatHandler;
use crate::protocol::InboundMessage;

// ============================================================================
// Router
// ============================================================================

/// Forwards decoded inbound messages to their collaborators.
#[derive(Clone)]
pub(crate) struct Router {
    /// Receives `"message"` frames.
    chat: Arc<dyn ChatHandler>,
}

impl Router {
    /// Creates a router over the given chat collaborator.
    #[inline]
    #[must_use]
    pub(crate) fn new(chat: Arc<dyn ChatHandler>) -> Self {
        Self { chat }
    }

    /// Dispatches one message.
    ///
    /// Unknown and malformed messages are ignored.
    pub(crate) fn route(&self, message: InboundMessage) {
        match message {
            InboundMessage::Chat { name, text } => {
                trace!(%name, "Routing chat message");
                self.chat.receive_chat_message(&name, &text);
            }

            InboundMessage::Malformed { kind, field } => {
                debug!(%kind, field, "Ignoring message with missing field");
            }

            InboundMessage::Unknown { kind, .. } => {
                trace!(?kind, "Ignoring unrecognized message type");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
