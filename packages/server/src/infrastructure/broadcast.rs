//! Event fan-out to connected WebSocket clients.
//!
//! Each connection owns an unbounded channel drained by its socket task. The
//! teachers group is a set of connection ids layered over the same map.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{Broadcaster, ConnectionId, SessionEvent, Timestamp};

use super::dto::websocket::encode_event;

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: UnboundedSender<String>,
    pub connected_at: Timestamp,
}

#[derive(Default)]
struct Connections {
    clients: HashMap<ConnectionId, ClientInfo>,
    teachers: HashSet<ConnectionId>,
}

/// Channel-backed `Broadcaster` implementation
#[derive(Default)]
pub struct ChannelBroadcaster {
    connections: Mutex<Connections>,
}

impl ChannelBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a connection's outbound channel
    pub async fn register(&self, id: ConnectionId, sender: UnboundedSender<String>) {
        let mut conns = self.connections.lock().await;
        conns.clients.insert(
            id,
            ClientInfo {
                sender,
                connected_at: Timestamp::now(),
            },
        );
    }

    /// Detach a connection and drop it from every group
    pub async fn unregister(&self, id: &ConnectionId) {
        let mut conns = self.connections.lock().await;
        if let Some(client) = conns.clients.remove(id) {
            tracing::debug!(conn_id = %id, connected_at = %client.connected_at, "unregistered connection");
        }
        conns.teachers.remove(id);
    }

    #[cfg(test)]
    async fn connection_count(&self) -> usize {
        self.connections.lock().await.clients.len()
    }

    #[cfg(test)]
    async fn teacher_count(&self) -> usize {
        self.connections.lock().await.teachers.len()
    }

    /// Serialize once, send to every connection matching `filter`.
    async fn deliver(
        &self,
        filter: impl Fn(&ConnectionId, &Connections) -> bool,
        event: &SessionEvent,
        label: &str,
    ) {
        let json = match encode_event(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(event = event.name(), error = %e, "failed to serialize event");
                return;
            }
        };
        let guard = self.connections.lock().await;
        let conns: &Connections = &guard;
        let mut recipients = 0u32;
        for (id, client) in conns.clients.iter() {
            if !filter(id, conns) {
                continue;
            }
            recipients += 1;
            if client.sender.send(json.clone()).is_err() {
                tracing::warn!(conn_id = %id, label, "failed to send event to client");
            }
        }
        tracing::debug!(event = event.name(), label, recipients, "broadcast event");
    }
}

#[async_trait]
impl Broadcaster for ChannelBroadcaster {
    async fn join_teachers(&self, id: &ConnectionId) {
        let mut conns = self.connections.lock().await;
        conns.teachers.insert(id.clone());
    }

    async fn broadcast_all(&self, event: SessionEvent) {
        self.deliver(|_, _| true, &event, "all").await;
    }

    async fn broadcast_teachers(&self, event: SessionEvent) {
        self.deliver(|id, conns| conns.teachers.contains(id), &event, "teachers")
            .await;
    }

    async fn send_to(&self, id: &ConnectionId, event: SessionEvent) {
        self.deliver(|candidate, _| candidate == id, &event, id.as_str())
            .await;
    }
}
