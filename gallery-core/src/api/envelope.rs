//! Wire shape shared by every gallery API response.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer, ser::SerializeTuple,
};
use serde_json::Value;

use crate::domain::notification::NotificationMessage;

/// A handler's return value paired with the session's notification
/// snapshot, serialized as the two-element array `[payload, messages]`.
///
/// An absent payload is written as the empty string `""`, and an empty
/// string payload reads back as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Handler body; `None` when the handler returned nothing.
    pub payload: Option<Value>,
    /// Every message the session holds, oldest first.
    pub messages: Vec<NotificationMessage>,
}

impl ResponseEnvelope {
    pub fn new(payload: Option<Value>, messages: Vec<NotificationMessage>) -> Self {
        Self { payload, messages }
    }

    /// Whether any message is an error.
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(NotificationMessage::is_error)
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        match &self.payload {
            Some(payload) => tuple.serialize_element(payload)?,
            None => tuple.serialize_element("")?,
        }
        tuple.serialize_element(&self.messages)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for ResponseEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (payload, messages) =
            <(Value, Vec<NotificationMessage>)>::deserialize(deserializer)?;
        let payload = match payload {
            Value::String(s) if s.is_empty() => None,
            other => Some(other),
        };
        Ok(Self { payload, messages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_is_written_as_empty_string() {
        let envelope =
            ResponseEnvelope::new(None, vec![NotificationMessage::error("nope")]);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!(["", [{"type": "ERROR", "text": "nope"}]])
        );
    }

    #[test]
    fn json_payload_is_embedded_verbatim() {
        let envelope = ResponseEnvelope::new(Some(json!({"uuid": "x"})), vec![]);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!([{"uuid": "x"}, []])
        );
    }

    #[test]
    fn reads_back_absent_payload() {
        let envelope: ResponseEnvelope =
            serde_json::from_value(json!(["", [{"type": "INFO", "text": "ok"}]]))
                .unwrap();

        assert_eq!(envelope.payload, None);
        assert!(!envelope.has_errors());
        assert_eq!(envelope.messages, vec![NotificationMessage::info("ok")]);
    }

    #[test]
    fn rejects_wrong_arity() {
        let result = serde_json::from_value::<ResponseEnvelope>(json!([1]));
        assert!(result.is_err());
    }
}
