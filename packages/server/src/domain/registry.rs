//! Participant registry.
//!
//! Tracks every student that ever joined the session, in join order.

use std::collections::HashMap;

use super::{
    entity::Participant,
    error::SessionError,
    value_object::{ConnectionId, ParticipantName, Timestamp},
};

#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
    index: HashMap<ConnectionId, usize>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new active participant
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DuplicateConnection` if the connection id is
    /// already registered, whether active or not. Re-joins are never merged.
    pub fn join(
        &mut self,
        id: ConnectionId,
        name: ParticipantName,
        joined_at: Timestamp,
    ) -> Result<Participant, SessionError> {
        if self.index.contains_key(&id) {
            return Err(SessionError::DuplicateConnection(id.into_string()));
        }
        let participant = Participant::new(id.clone(), name, joined_at);
        self.index.insert(id, self.participants.len());
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Mark a participant inactive.
    ///
    /// Safe to repeat. Returns the participant's current state, or `None` if
    /// the id was never registered.
    pub fn mark_inactive(&mut self, id: &ConnectionId) -> Option<Participant> {
        let &position = self.index.get(id)?;
        let participant = &mut self.participants[position];
        participant.is_active = false;
        Some(participant.clone())
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Participant> {
        self.index.get(id).map(|&position| &self.participants[position])
    }

    /// Number of participants with `is_active = true`
    pub fn active_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_active).count()
    }

    /// All participants in join order
    pub fn all(&self) -> &[Participant] {
        &self.participants
    }
}
