//! # Conversation Messages
//!
//! A `Message` is one turn in the conversation: either something the user
//! typed or something the backend answered. Messages are created once and
//! never edited; the only way to get rid of one is to clear the whole chat.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Text shown in place of a reply when a generate request fails for any reason.
pub const GENERATION_ERROR_TEXT: &str = "Sorry, I encountered an error processing your request.";

/// Who authored a message.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Ai,
}

/// Identifier handed out by the controller's counter. Strictly increasing
/// within a run, never reused (not even after the chat is cleared).
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Local>,
    is_error: bool,
}

impl Message {
    pub fn user(id: MessageId, text: String) -> Self {
        Self::new(id, text, Sender::User, false)
    }

    pub fn ai(id: MessageId, text: String) -> Self {
        Self::new(id, text, Sender::Ai, false)
    }

    /// The fixed apology bubble posted when generation fails.
    pub fn ai_error(id: MessageId) -> Self {
        Self::new(id, GENERATION_ERROR_TEXT.to_string(), Sender::Ai, true)
    }

    fn new(id: MessageId, text: String, sender: Sender, is_error: bool) -> Self {
        Self {
            id,
            text,
            sender,
            timestamp: Local::now(),
            is_error,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Short clock time shown under the bubble, e.g. `14:05`.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_not_an_error() {
        let msg = Message::user(MessageId(1), "Hello".to_string());
        assert_eq!(msg.sender(), Sender::User);
        assert_eq!(msg.text(), "Hello");
        assert!(!msg.is_error());
    }

    #[test]
    fn ai_error_carries_fixed_text() {
        let msg = Message::ai_error(MessageId(7));
        assert_eq!(msg.sender(), Sender::Ai);
        assert_eq!(msg.text(), GENERATION_ERROR_TEXT);
        assert!(msg.is_error());
        assert_eq!(msg.id(), MessageId(7));
    }

    #[test]
    fn time_label_is_hours_and_minutes() {
        let msg = Message::ai(MessageId(2), "Hi".to_string());
        let label = msg.time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn serializes_sender_in_wire_casing() {
        let msg = Message::user(MessageId(3), "x".to_string());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "user");
        assert_eq!(json["is_error"], false);
    }

    #[test]
    fn message_id_displays_with_hash() {
        assert_eq!(MessageId(42).to_string(), "#42");
    }
}
