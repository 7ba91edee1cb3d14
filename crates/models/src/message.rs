use serde::{Deserialize, Serialize};

/// A stored message. `id` is assigned by the store and never changes;
/// `text` travels on the wire as `message`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    #[serde(rename = "message")]
    pub text: Option<String>,
}

/// Create/update payload: only the text is caller-controlled, any `id` in the body is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInput {
    #[serde(rename = "message", default)]
    pub text: Option<String>,
}

impl MessageInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_uses_message_field_on_the_wire() {
        let m = Message { id: 1, text: Some("hello".into()) };
        assert_eq!(serde_json::to_value(&m).unwrap(), json!({"id": 1, "message": "hello"}));

        let empty = Message { id: 2, text: None };
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({"id": 2, "message": null}));
    }

    #[test]
    fn input_ignores_id_and_tolerates_missing_text() {
        let input: MessageInput = serde_json::from_value(json!({"id": 99, "message": "hi"})).unwrap();
        assert_eq!(input, MessageInput::new("hi"));

        let blank: MessageInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(blank.text, None);
    }
}
