//! Inbound message types.
//!
//! Every text frame received from the server is decoded once, at the
//! connection boundary, into an [`InboundMessage`].
//!
//! # Message Kinds
//!
//! | `type` | Variant | Extra fields |
//! |--------|---------|--------------|
//! | `message` | [`InboundMessage::Chat`] | `name`, `text` |
//! | `message` without string `name`/`text` | [`InboundMessage::Malformed`] | — |
//! | anything else / absent | [`InboundMessage::Unknown`] | — |

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Map, Value, from_str};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Discriminant field carried by every inbound message.
pub const TYPE_FIELD: &str = "type";

/// Discriminant value of a chat message.
pub const CHAT_TYPE: &str = "message";

// ============================================================================
// InboundMessage
// ============================================================================

/// A decoded inbound message.
///
/// # Format
///
/// ```json
/// { "type": "message", "name": "Bob", "text": "yo" }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// New chat message from another participant.
    Chat {
        /// Sender display name.
        name: String,
        /// Message body.
        text: String,
    },

    /// Known `type`, but required fields are missing or mistyped.
    Malformed {
        /// The `type` value.
        kind: String,
        /// Name of the offending field.
        field: &'static str,
    },

    /// `type` absent, not a string, or not recognized.
    Unknown {
        /// The `type` value, if it was a string.
        kind: Option<String>,
        /// Full decoded payload.
        payload: Value,
    },
}

impl InboundMessage {
    /// Decodes one text frame.
    ///
    /// Only frames that are not a JSON object fail; unrecognized or
    /// incomplete objects decode to [`InboundMessage::Unknown`] or
    /// [`InboundMessage::Malformed`].
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the frame is not valid JSON
    /// - [`Error::Protocol`] if the frame is JSON but not an object
    pub fn decode(text: &str) -> Result<Self> {
        match from_str::<Value>(text)? {
            Value::Object(object) => Ok(Self::from_object(object)),
            other => Err(Error::protocol(format!(
                "expected JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns the `type` discriminant, if any.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Chat { .. } => Some(CHAT_TYPE),
            Self::Malformed { kind, .. } => Some(kind.as_str()),
            Self::Unknown { kind, .. } => kind.as_deref(),
        }
    }

    fn from_object(object: Map<String, Value>) -> Self {
        let kind = object
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string);

        match kind.as_deref() {
            Some(CHAT_TYPE) => Self::parse_chat(&object),
            _ => Self::Unknown {
                kind,
                payload: Value::Object(object),
            },
        }
    }

    fn parse_chat(object: &Map<String, Value>) -> Self {
        let field = |key: &'static str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(key)
        };

        match (field("name"), field("text")) {
            (Ok(name), Ok(text)) => Self::Chat { name, text },
            (Err(field), _) | (_, Err(field)) => Self::Malformed {
                kind: CHAT_TYPE.to_string(),
                field,
            },
        }
    }
}

/// Short name of a JSON value's type, for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Tests
// ============================================================================
