//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("ConnectionId cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    #[error("ParticipantName cannot be empty")]
    ParticipantNameEmpty,

    #[error("ParticipantName cannot exceed {max} characters (got {actual})")]
    ParticipantNameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    #[error("PollId cannot be empty")]
    PollIdEmpty,

    /// PollId invalid format error (not a valid UUID format)
    #[error("PollId must be a valid UUID format (got: {0})")]
    PollIdInvalidFormat(String),

    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    #[error("MessageId must be a valid UUID format (got: {0})")]
    MessageIdInvalidFormat(String),

    #[error("Poll question cannot be empty")]
    PollQuestionEmpty,

    #[error("Poll must have at least one option")]
    PollOptionsEmpty,

    /// A correct-answer index that does not point at any option
    #[error("Correct answer index {index} is out of range for {options} options")]
    CorrectAnswerOutOfRange { index: usize, options: usize },
}

/// Errors raised by the classroom session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Re-join under an already registered connection id
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Participant '{0}' is not registered")]
    UnknownParticipant(String),

    /// A poll is still active; the current poll is left unchanged
    #[error("Poll '{0}' is still in progress")]
    PollInProgress(String),
}
