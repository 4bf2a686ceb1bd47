//! Message and conversation types.

use serde::{Deserialize, Serialize};

use crate::{Id, Timestamp, new_id, now};

/// Role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Id,
    pub role: Role,
    pub content: String,
    pub timestamp: Timestamp,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role: Role::User,
            content: content.into(),
            timestamp: now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: now(),
        }
    }
}

/// An ordered, append-only sequence of conversation turns.
///
/// Turns are never mutated or removed individually; the only destructive
/// operation is [`Conversation::clear`], which empties the whole sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Message>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the conversation.
    pub fn push(&mut self, message: Message) {
        self.turns.push(message);
    }

    /// Append a user/assistant turn pair.
    pub fn push_exchange(&mut self, query: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Message::user(query));
        self.turns.push(Message::assistant(answer));
    }

    /// The turns in order, oldest first.
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the conversation has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Empty the conversation.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("কেমন আছো?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "কেমন আছো?");

        let msg = Message::assistant("ভালো আছি");
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn test_conversation_append_order() {
        let mut convo = Conversation::new();
        convo.push(Message::user("first"));
        convo.push(Message::assistant("second"));
        convo.push(Message::user("third"));

        let contents: Vec<&str> = convo.turns().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_conversation_push_exchange() {
        let mut convo = Conversation::new();
        convo.push_exchange("q", "a");

        assert_eq!(convo.len(), 2);
        assert_eq!(convo.turns()[0].role, Role::User);
        assert_eq!(convo.turns()[1].role, Role::Assistant);
    }

    #[test]
    fn test_conversation_clear() {
        let mut convo = Conversation::new();
        convo.push_exchange("q", "a");
        convo.clear();

        assert!(convo.is_empty());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
