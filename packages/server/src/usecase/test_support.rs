//! UseCase テスト用のヘルパー

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    domain::{
        Broadcaster, ConnectionId, ParticipantName, PollDraft, SessionEvent, SessionRepository,
        Timestamp,
    },
    infrastructure::repository::InMemorySessionRepository,
};

pub fn create_test_repository() -> Arc<InMemorySessionRepository> {
    Arc::new(InMemorySessionRepository::default())
}

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

/// Repository に直接生徒を登録する（Broadcaster を経由しない）
pub async fn join_student(repository: &InMemorySessionRepository, id: &str) -> ConnectionId {
    let connection_id = conn(id);
    repository
        .join_student(
            connection_id.clone(),
            ParticipantName::new(id.to_string()).unwrap(),
            Timestamp::new(0),
        )
        .await
        .unwrap();
    connection_id
}

pub fn draft(options: &[&str], timer_seconds: i64) -> PollDraft {
    PollDraft::new(
        "Which one?".to_string(),
        options.iter().map(|s| s.to_string()).collect(),
        vec![0],
        timer_seconds,
    )
    .unwrap()
}

pub fn is_poll_ended(event: &SessionEvent) -> bool {
    matches!(event, SessionEvent::PollEnded(_))
}

/// 教師に届くイベント（全体送信と教師グループ送信）を記録する Broadcaster
///
/// `delay_first` に指定したイベントだけ、最初の 1 回の配信を 50ms 遅らせる。
#[derive(Default)]
pub struct RecordingBroadcaster {
    delay_first: Option<&'static str>,
    delayed: AtomicBool,
    teacher_events: Mutex<Vec<SessionEvent>>,
}

impl RecordingBroadcaster {
    pub fn delaying_first(event_name: &'static str) -> Self {
        Self {
            delay_first: Some(event_name),
            ..Self::default()
        }
    }

    pub fn teacher_events(&self) -> Vec<SessionEvent> {
        self.teacher_events.lock().unwrap().clone()
    }

    async fn record(&self, event: SessionEvent) {
        if self.delay_first == Some(event.name()) && !self.delayed.swap(true, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.teacher_events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn join_teachers(&self, _id: &ConnectionId) {}

    async fn broadcast_all(&self, event: SessionEvent) {
        self.record(event).await;
    }

    async fn broadcast_teachers(&self, event: SessionEvent) {
        self.record(event).await;
    }

    async fn send_to(&self, _id: &ConnectionId, _event: SessionEvent) {}
}

/// "poll-updated(1)" のような、種類と合計回答数だけの表記
pub fn poll_label(event: &SessionEvent) -> String {
    match event {
        SessionEvent::PollCreated(p) | SessionEvent::PollUpdated(p) | SessionEvent::PollEnded(p) => {
            format!("{}({})", event.name(), p.total_responses)
        }
        other => other.name().to_string(),
    }
}
