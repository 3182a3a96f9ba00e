//! Classroom session aggregate.
//!
//! Composes the participant registry, the poll lifecycle, the chat log and the
//! poll history into one owned value. Every method is a complete state
//! transition: callers hold a single lock around the aggregate, so each call
//! is atomic with respect to the others, including the timer path.

use super::{
    chat_log::ChatLog,
    entity::{ChatMessage, Participant, Poll, PollDraft},
    error::SessionError,
    poll::{AnswerOutcome, PollLifecycle},
    poll_history::PollHistory,
    registry::ParticipantRegistry,
    value_object::{ConnectionId, MessageId, MessageText, ParticipantName, PollId, Timestamp},
};

/// Full session state handed to a joining teacher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_poll: Option<Poll>,
    pub participants: Vec<Participant>,
    pub chat_messages: Vec<ChatMessage>,
    pub poll_history: Vec<Poll>,
}

/// State handed to a student right after joining
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentJoined {
    pub participant: Participant,
    pub current_poll: Option<Poll>,
    pub chat_messages: Vec<ChatMessage>,
    pub has_answered: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ClassroomSession {
    registry: ParticipantRegistry,
    polls: PollLifecycle,
    chat: ChatLog,
    history: PollHistory,
}

impl ClassroomSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_poll: self.polls.current().cloned(),
            participants: self.registry.all().to_vec(),
            chat_messages: self.chat.all().to_vec(),
            poll_history: self.history.all().to_vec(),
        }
    }

    /// Register a student.
    ///
    /// # Errors
    ///
    /// `SessionError::DuplicateConnection` if `id` already joined.
    pub fn join_student(
        &mut self,
        id: ConnectionId,
        name: ParticipantName,
        joined_at: Timestamp,
    ) -> Result<StudentJoined, SessionError> {
        let has_answered = self.polls.has_answered(&id);
        let participant = self.registry.join(id, name, joined_at)?;
        Ok(StudentJoined {
            participant,
            current_poll: self.polls.current().cloned(),
            chat_messages: self.chat.all().to_vec(),
            has_answered,
        })
    }

    /// Kick or disconnect. Repeatable; `None` for unknown ids.
    pub fn mark_inactive(&mut self, id: &ConnectionId) -> Option<Participant> {
        self.registry.mark_inactive(id)
    }

    /// # Errors
    ///
    /// `SessionError::PollInProgress` while the current poll is active.
    pub fn create_poll(
        &mut self,
        id: PollId,
        draft: PollDraft,
        created_at: Timestamp,
    ) -> Result<Poll, SessionError> {
        self.polls.create(id, draft, created_at)
    }

    /// Count an answer and end the poll once every active participant answered.
    pub fn submit_answer(&mut self, id: &ConnectionId, option_index: i64) -> AnswerOutcome {
        let participant = self.registry.get(id);
        let poll = match self.polls.record_answer(id, participant, option_index) {
            Ok(poll) => poll,
            Err(reason) => {
                return AnswerOutcome::Rejected {
                    reason,
                    current_poll: self.polls.current().cloned(),
                };
            }
        };

        let ended = if poll.total_responses as usize >= self.registry.active_count() {
            self.end_poll(&poll.id)
        } else {
            None
        };
        AnswerOutcome::Accepted { poll, ended }
    }

    /// The single Active -> Ended transition, keyed by poll identity.
    ///
    /// Appends the snapshot to history and returns it only for the first
    /// caller; stale or repeated calls are no-ops.
    pub fn end_poll(&mut self, poll_id: &PollId) -> Option<Poll> {
        let ended = self.polls.try_end(poll_id)?;
        self.history.append(ended.clone());
        Some(ended)
    }

    /// # Errors
    ///
    /// `SessionError::UnknownParticipant` if `id` never joined as a student.
    pub fn post_message(
        &mut self,
        message_id: MessageId,
        id: &ConnectionId,
        text: MessageText,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, SessionError> {
        let author = self
            .registry
            .get(id)
            .ok_or_else(|| SessionError::UnknownParticipant(id.as_str().to_string()))?;
        Ok(self.chat.post(message_id, author, text, timestamp))
    }

    pub fn current_poll(&self) -> Option<&Poll> {
        self.polls.current()
    }

    pub fn poll_history(&self) -> &[Poll] {
        self.history.all()
    }

    #[cfg(test)]
    pub fn ledger_len(&self) -> usize {
        self.polls.ledger_len()
    }
}
