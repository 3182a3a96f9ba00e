//! Core domain models for the classroom session.

use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use super::{
    error::ValueObjectError,
    value_object::{ConnectionId, MessageId, MessageText, ParticipantName, PollId, Timestamp},
};

/// A registered client identity in the session
///
/// Participants are never removed from the registry; kick and disconnect only
/// flip `is_active`, so chat and poll records stay attributable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Connection the participant joined from
    pub id: ConnectionId,
    pub name: ParticipantName,
    pub is_active: bool,
    pub joined_at: Timestamp,
}

impl Participant {
    /// Create a new active participant
    pub fn new(id: ConnectionId, name: ParticipantName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            is_active: true,
            joined_at,
        }
    }
}

/// Validated input for a new poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    question: String,
    options: Vec<String>,
    correct_answers: BTreeSet<usize>,
    timer_seconds: i64,
}

impl PollDraft {
    /// Validate the poll input.
    ///
    /// `timer_seconds` is not validated: zero or negative means the poll
    /// expires immediately.
    ///
    /// # Errors
    ///
    /// Returns a `ValueObjectError` if the question is blank, there are no
    /// options, or a correct answer points outside the options.
    pub fn new(
        question: String,
        options: Vec<String>,
        correct_answers: Vec<usize>,
        timer_seconds: i64,
    ) -> Result<Self, ValueObjectError> {
        if question.trim().is_empty() {
            return Err(ValueObjectError::PollQuestionEmpty);
        }
        if options.is_empty() {
            return Err(ValueObjectError::PollOptionsEmpty);
        }
        if let Some(&index) = correct_answers.iter().find(|&&i| i >= options.len()) {
            return Err(ValueObjectError::CorrectAnswerOutOfRange {
                index,
                options: options.len(),
            });
        }
        Ok(Self {
            question,
            options,
            correct_answers: correct_answers.into_iter().collect(),
            timer_seconds,
        })
    }
}

/// A single question with discrete options, a response window and a tally.
///
/// Only `PollLifecycle` mutates a poll. Once `is_active` is false the poll is
/// never mutated again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: BTreeSet<usize>,
    pub timer_seconds: i64,
    pub created_at: Timestamp,
    pub is_active: bool,
    /// option index -> count; only indices that received an answer appear
    pub responses: BTreeMap<usize, u32>,
    pub total_responses: u32,
}

impl Poll {
    /// Build a freshly activated poll from a validated draft
    pub fn new(id: PollId, draft: PollDraft, created_at: Timestamp) -> Self {
        Self {
            id,
            question: draft.question,
            options: draft.options,
            correct_answers: draft.correct_answers,
            timer_seconds: draft.timer_seconds,
            created_at,
            is_active: true,
            responses: BTreeMap::new(),
            total_responses: 0,
        }
    }

    /// How long until the response window closes.
    pub fn timer_duration(&self) -> Duration {
        u64::try_from(self.timer_seconds)
            .map(Duration::from_secs)
            .unwrap_or(Duration::ZERO)
    }

    /// `option_index` as a position into `options`, or `None` if it points past them
    pub fn option_position(&self, option_index: i64) -> Option<usize> {
        usize::try_from(option_index)
            .ok()
            .filter(|&i| i < self.options.len())
    }

    pub(crate) fn record_response(&mut self, option_index: usize) {
        *self.responses.entry(option_index).or_insert(0) += 1;
        self.total_responses += 1;
    }

    pub(crate) fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    /// Sender's participant ID
    pub author_id: ConnectionId,
    /// Sender's name at the time of posting
    pub author_name: ParticipantName,
    pub text: MessageText,
    /// Timestamp when the message was sent
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(
        id: MessageId,
        author: &Participant,
        text: MessageText,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            text,
            timestamp,
        }
    }
}
