//! Domain layer for the classroom session.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod broadcaster;
pub mod chat_log;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod poll;
pub mod poll_history;
pub mod registry;
pub mod repository;
pub mod session;
pub mod value_object;

pub use broadcaster::Broadcaster;
pub use entity::{ChatMessage, Participant, Poll, PollDraft};
pub use error::{SessionError, ValueObjectError};
pub use event::SessionEvent;
pub use factory::{ConnectionIdFactory, MessageIdFactory, PollIdFactory};
pub use poll::{AnswerOutcome, RejectReason};
pub use repository::SessionRepository;
pub use session::{ClassroomSession, SessionSnapshot, StudentJoined};
pub use value_object::{ConnectionId, MessageId, MessageText, ParticipantName, PollId, Timestamp};
