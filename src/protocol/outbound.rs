//! Outbound message encoding.
//!
//! Any [`Serialize`] value can be sent; [`OutboundMessage`] covers the
//! message kinds the server understands.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::to_string;

use crate::error::Result;

// ============================================================================
// OutboundMessage
// ============================================================================

/// A typed outbound message.
///
/// Serializes with the `type` tag first:
///
/// ```json
/// { "type": "message", "name": "Alice", "text": "hi" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    /// Chat message to broadcast.
    #[serde(rename = "message")]
    Chat {
        /// Sender display name.
        name: String,
        /// Message body.
        text: String,
    },
}

impl OutboundMessage {
    /// Creates a chat message.
    #[inline]
    #[must_use]
    pub fn chat(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Chat {
            name: name.into(),
            text: text.into(),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Serializes a message into the text of one frame.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if the value cannot be
/// represented as JSON (e.g. a map with non-string keys).
pub fn encode_frame<T: Serialize + ?Sized>(message: &T) -> Result<String> {
    Ok(to_string(message)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use proptest::prelude::*;
    use serde_json::{Value, json};

    use crate::error::Error;

    #[test]
    fn test_chat_frame_layout() {
        let frame = encode_frame(&OutboundMessage::chat("Alice", "hi")).expect("encode");
        assert_eq!(frame, r#"{"type":"message","name":"Alice","text":"hi"}"#);
    }

    #[test]
    fn test_encode_value() {
        let value = json!({ "type": "join", "room": 3 });
        let frame = encode_frame(&value).expect("encode");
        assert_eq!(frame, serde_json::to_string(&value).expect("serialize"));
    }

    #[test]
    fn test_encode_rejects_non_string_keys() {
        let mut map = HashMap::new();
        map.insert((1, 2), "x");

        let err = encode_frame(&map).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            ".*".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_frame_is_exact_json(value in arb_json()) {
            let frame = encode_frame(&value).expect("encode");
            prop_assert_eq!(&frame, &serde_json::to_string(&value).unwrap());
            prop_assert_eq!(serde_json::from_str::<Value>(&frame).unwrap(), value);
        }
    }
}
