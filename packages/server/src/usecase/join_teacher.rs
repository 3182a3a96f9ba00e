//! UseCase: 教師参加処理
//!
//! 呼び出し元を教師グループに登録し、セッション全体のスナップショット
//! （現在の投票・参加者・チャット・投票履歴）を呼び出し元にだけ送信します。
//! 教師かどうかの認証は行いません（この操作を呼んだ接続が教師として扱われる）。

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, SessionEvent, SessionRepository};

use super::sequencer::EventSequencer;

/// 教師参加のユースケース
pub struct JoinTeacherUseCase {
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    sequencer: EventSequencer,
}

impl JoinTeacherUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
            sequencer: EventSequencer::new(),
        }
    }

    /// 他のユースケースと通知順序のガードを共有する
    pub fn with_sequencer(mut self, sequencer: EventSequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    pub async fn execute(&self, connection_id: &ConnectionId) {
        let _turn = self.sequencer.enter().await;
        self.broadcaster.join_teachers(connection_id).await;
        let snapshot = self.repository.snapshot().await;
        self.broadcaster
            .send_to(connection_id, SessionEvent::TeacherJoined(snapshot))
            .await;
    }
}
