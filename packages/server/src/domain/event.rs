//! Session events produced by state transitions.

use super::{
    entity::{ChatMessage, Participant, Poll},
    poll::RejectReason,
    session::SessionSnapshot,
};

/// A state-change notification, routed by a `Broadcaster`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Full state for a teacher that just joined
    TeacherJoined(SessionSnapshot),
    ParticipantJoined(Participant),
    /// Catch-up state for a student that just joined
    StudentJoined {
        current_poll: Option<Poll>,
        chat_messages: Vec<ChatMessage>,
        has_answered: bool,
    },
    PollCreated(Poll),
    PollUpdated(Poll),
    PollEnded(Poll),
    /// Acknowledgement for the answering student; the only user-visible rejection
    AnswerSubmitted {
        success: bool,
        current_poll: Option<Poll>,
        reason: Option<RejectReason>,
    },
    NewMessage(ChatMessage),
    KickedOut,
    ParticipantUpdated(Participant),
}

impl SessionEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::TeacherJoined(_) => "teacher-joined",
            Self::ParticipantJoined(_) => "participant-joined",
            Self::StudentJoined { .. } => "student-joined",
            Self::PollCreated(_) => "poll-created",
            Self::PollUpdated(_) => "poll-updated",
            Self::PollEnded(_) => "poll-ended",
            Self::AnswerSubmitted { .. } => "answer-submitted",
            Self::NewMessage(_) => "new-message",
            Self::KickedOut => "kicked-out",
            Self::ParticipantUpdated(_) => "participant-updated",
        }
    }
}
