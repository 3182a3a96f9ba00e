//! Shared application state.

use std::sync::Arc;

use crate::{infrastructure::ChannelBroadcaster, usecase::SessionFacade};

/// Shared application state
pub struct AppState {
    /// Operation surface of the classroom session
    pub facade: SessionFacade,
    /// Outbound channels of every open WebSocket (also the facade's `Broadcaster`)
    pub broadcaster: Arc<ChannelBroadcaster>,
}
