//! Poll lifecycle.
//!
//! Owns the single current poll and the per-poll response ledger. A poll is
//! born Active and moves to Ended exactly once; `try_end` is the only
//! transition and both completion triggers go through it.

use std::collections::HashMap;

use thiserror::Error;

use super::{
    entity::{Participant, Poll, PollDraft},
    error::SessionError,
    value_object::{ConnectionId, PollId, Timestamp},
};

/// Why an answer was dropped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("no poll has been created")]
    NoCurrentPoll,
    #[error("the poll has ended")]
    PollNotActive,
    #[error("already answered this poll")]
    AlreadyAnswered,
    #[error("participant is not registered")]
    UnknownParticipant,
    #[error("participant is no longer active")]
    InactiveParticipant,
    #[error("option index is out of range")]
    OptionOutOfRange,
}

/// Result of a submit-answer action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Accepted {
        /// Poll right after the answer was counted, before any transition
        poll: Poll,
        /// Set when this answer completed the poll
        ended: Option<Poll>,
    },
    Rejected {
        reason: RejectReason,
        current_poll: Option<Poll>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PollLifecycle {
    current: Option<Poll>,
    /// participant -> chosen option, for the current poll only
    ledger: HashMap<ConnectionId, usize>,
}

impl PollLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new poll, replacing an ended one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PollInProgress` while the current poll is still
    /// active; nothing changes in that case.
    pub fn create(
        &mut self,
        id: PollId,
        draft: PollDraft,
        created_at: Timestamp,
    ) -> Result<Poll, SessionError> {
        if let Some(active) = self.current.as_ref().filter(|p| p.is_active) {
            return Err(SessionError::PollInProgress(active.id.as_str().to_string()));
        }
        let poll = Poll::new(id, draft, created_at);
        self.ledger.clear();
        self.current = Some(poll.clone());
        Ok(poll)
    }

    /// The current poll. An ended poll stays current until the next `create`.
    pub fn current(&self) -> Option<&Poll> {
        self.current.as_ref()
    }

    pub fn has_answered(&self, id: &ConnectionId) -> bool {
        self.ledger.contains_key(id)
    }

    /// Size of the response ledger for the current poll
    #[cfg(test)]
    pub fn ledger_len(&self) -> usize {
        self.ledger.len()
    }

    /// Count one answer from `participant`.
    ///
    /// `participant` is the registry entry for `id`, if any. Checks run in a
    /// fixed order and nothing is mutated unless all of them pass.
    pub fn record_answer(
        &mut self,
        id: &ConnectionId,
        participant: Option<&Participant>,
        option_index: i64,
    ) -> Result<Poll, RejectReason> {
        let poll = self.current.as_mut().ok_or(RejectReason::NoCurrentPoll)?;
        if !poll.is_active {
            return Err(RejectReason::PollNotActive);
        }
        if self.ledger.contains_key(id) {
            return Err(RejectReason::AlreadyAnswered);
        }
        match participant {
            None => return Err(RejectReason::UnknownParticipant),
            Some(p) if !p.is_active => return Err(RejectReason::InactiveParticipant),
            Some(_) => {}
        }
        let index = poll
            .option_position(option_index)
            .ok_or(RejectReason::OptionOutOfRange)?;

        self.ledger.insert(id.clone(), index);
        poll.record_response(index);
        Ok(poll.clone())
    }

    /// End the poll identified by `poll_id` if it is current and still active.
    ///
    /// Returns the ended snapshot for the caller that performed the
    /// transition; every later call (or a call for a replaced poll) gets `None`.
    pub fn try_end(&mut self, poll_id: &PollId) -> Option<Poll> {
        let poll = self
            .current
            .as_mut()
            .filter(|p| &p.id == poll_id && p.is_active)?;
        poll.deactivate();
        Some(poll.clone())
    }
}
