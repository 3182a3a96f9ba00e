//! Append-only chat history.

use super::{
    entity::{ChatMessage, Participant},
    value_object::{MessageId, MessageText, Timestamp},
};

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message authored by `author` and return it for broadcast.
    ///
    /// The caller resolves the author; this log does not check `is_active`,
    /// so kicked or disconnected participants can still post.
    pub fn post(
        &mut self,
        id: MessageId,
        author: &Participant,
        text: MessageText,
        timestamp: Timestamp,
    ) -> ChatMessage {
        let message = ChatMessage::new(id, author, text, timestamp);
        self.messages.push(message.clone());
        message
    }

    /// Messages in append order
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }
}
