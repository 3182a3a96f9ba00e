//! Broadcaster trait.
//!
//! The audience primitives the session needs from a transport. Use cases
//! decide who hears what; implementations only deliver.

use async_trait::async_trait;

use super::{event::SessionEvent, value_object::ConnectionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Add a connection to the teachers group
    async fn join_teachers(&self, id: &ConnectionId);

    /// Deliver to every connected endpoint
    async fn broadcast_all(&self, event: SessionEvent);

    /// Deliver to the teachers group only
    async fn broadcast_teachers(&self, event: SessionEvent);

    /// Deliver to a single endpoint; unknown endpoints are ignored
    async fn send_to(&self, id: &ConnectionId, event: SessionEvent);
}
