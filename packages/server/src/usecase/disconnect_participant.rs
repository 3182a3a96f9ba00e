//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時の非アクティブ化と教師への通知
//!
//! ### なぜこのテストが必要か
//! - 参加者は削除されず、isActive=false として残ることを確認
//! - 教師や未参加の接続が切断しても通知が送られないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：生徒の切断
//! - エッジケース：参加者として登録されていない接続（教師など）の切断

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, Participant, SessionEvent, SessionRepository};

use super::sequencer::EventSequencer;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    sequencer: EventSequencer,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
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

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID
    ///
    /// # Returns
    ///
    /// * `Some(Participant)` - 非アクティブになった参加者
    /// * `None` - 参加者として登録されていない接続
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let _turn = self.sequencer.enter().await;
        let participant = self.repository.mark_inactive(connection_id).await?;
        tracing::info!(conn_id = %connection_id, name = %participant.name, "participant disconnected");

        self.broadcaster
            .broadcast_teachers(SessionEvent::ParticipantUpdated(participant.clone()))
            .await;

        Some(participant)
    }
}
