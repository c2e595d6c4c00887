//! Append-only conversation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    /// Failures reported by the content adapter, shown inline.
    System,
}

/// Exactly one payload per part. Order within a message is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessagePart {
    Text { text: String },
    Image { image_ref: String },
}

impl MessagePart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => Some(text),
            MessagePart::Image { .. } => None,
        }
    }

    pub fn as_image_ref(&self) -> Option<&str> {
        match self {
            MessagePart::Image { image_ref } => Some(image_ref),
            MessagePart::Text { .. } => None,
        }
    }
}

/// One conversation turn. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    parts: Vec<MessagePart>,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(role: Role, parts: Vec<MessagePart>) -> Self {
        Self {
            role,
            parts,
            timestamp: Utc::now(),
        }
    }

    pub(crate) fn text(role: Role, text: impl Into<String>) -> Self {
        Self::new(role, vec![MessagePart::Text { text: text.into() }])
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn parts(&self) -> &[MessagePart] {
        &self.parts
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// First text part, if any.
    pub fn text_content(&self) -> Option<&str> {
        self.parts.iter().find_map(MessagePart::as_text)
    }

    /// First image reference, if any.
    pub fn image_ref(&self) -> Option<&str> {
        self.parts.iter().find_map(MessagePart::as_image_ref)
    }
}

/// Ordered history; insertion order is display order.
///
/// There is no removal or in-place mutation; the only write is [`push`],
/// which is crate-private so only the session appends.
///
/// [`push`]: Transcript::push
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, clamping its timestamp so the history never goes
    /// backwards in time.
    pub(crate) fn push(&mut self, mut message: Message) {
        if let Some(last) = self.messages.last() {
            if message.timestamp < last.timestamp {
                message.timestamp = last.timestamp;
            }
        }
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn push_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::text(Role::User, "Hello"));
        transcript.push(Message::text(Role::Model, "Hi there"));

        let roles: Vec<Role> = transcript.iter().map(Message::role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model]);
        assert_eq!(transcript.last().and_then(Message::text_content), Some("Hi there"));
    }

    #[test]
    fn push_clamps_timestamp_to_previous() {
        let mut transcript = Transcript::new();
        let first = Message::text(Role::User, "first");
        let first_ts = first.timestamp();
        transcript.push(first);

        let mut earlier = Message::text(Role::Model, "second");
        earlier.timestamp = first_ts - Duration::seconds(30);
        transcript.push(earlier);

        assert_eq!(transcript.get(1).map(Message::timestamp), Some(first_ts));
    }

    #[test]
    fn message_accessors_find_parts() {
        let message = Message::new(
            Role::User,
            vec![
                MessagePart::Image {
                    image_ref: "image://abc".into(),
                },
                MessagePart::Text {
                    text: "what is this?".into(),
                },
            ],
        );
        assert_eq!(message.image_ref(), Some("image://abc"));
        assert_eq!(message.text_content(), Some("what is this?"));
        assert!(message.parts()[0].as_text().is_none());
    }

    #[test]
    fn role_and_parts_serialize_lowercase() {
        let message = Message::text(Role::System, "Error: boom");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["parts"][0]["text"], "Error: boom");
    }
}
