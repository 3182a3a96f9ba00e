//! Repository trait for the classroom session.
//!
//! Each method is one atomic transition of the `ClassroomSession` aggregate.
//! Implementations must not interleave two calls.

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Participant, Poll, PollDraft},
    error::SessionError,
    poll::AnswerOutcome,
    session::{SessionSnapshot, StudentJoined},
    value_object::{ConnectionId, MessageId, MessageText, ParticipantName, PollId, Timestamp},
};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn snapshot(&self) -> SessionSnapshot;

    async fn join_student(
        &self,
        id: ConnectionId,
        name: ParticipantName,
        joined_at: Timestamp,
    ) -> Result<StudentJoined, SessionError>;

    async fn mark_inactive(&self, id: &ConnectionId) -> Option<Participant>;

    async fn create_poll(
        &self,
        id: PollId,
        draft: PollDraft,
        created_at: Timestamp,
    ) -> Result<Poll, SessionError>;

    async fn submit_answer(&self, id: &ConnectionId, option_index: i64) -> AnswerOutcome;

    /// Idempotent Active -> Ended transition keyed by poll id
    async fn end_poll(&self, poll_id: &PollId) -> Option<Poll>;

    async fn post_message(
        &self,
        message_id: MessageId,
        id: &ConnectionId,
        text: MessageText,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, SessionError>;

    async fn current_poll(&self) -> Option<Poll>;

    /// Completed polls, oldest first
    async fn poll_history(&self) -> Vec<Poll>;
}
