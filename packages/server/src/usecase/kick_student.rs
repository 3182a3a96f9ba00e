//! UseCase: 生徒の退出処理（教師操作）
//!
//! 対象を非アクティブにし、対象の接続に kicked-out を、教師に更新後の参加者を送信します。
//! 接続そのものは閉じません（クライアント側で退出を扱う）。

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, Participant, SessionEvent, SessionRepository};

use super::{error::KickStudentError, sequencer::EventSequencer};

/// 生徒退出のユースケース
pub struct KickStudentUseCase {
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    sequencer: EventSequencer,
}

impl KickStudentUseCase {
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

    pub async fn execute(&self, student_id: &ConnectionId) -> Result<Participant, KickStudentError> {
        let _turn = self.sequencer.enter().await;
        let participant = self
            .repository
            .mark_inactive(student_id)
            .await
            .ok_or_else(|| KickStudentError::UnknownParticipant(student_id.as_str().to_string()))?;
        tracing::info!(conn_id = %student_id, name = %participant.name, "student kicked");

        self.broadcaster
            .send_to(student_id, SessionEvent::KickedOut)
            .await;
        self.broadcaster
            .broadcast_teachers(SessionEvent::ParticipantUpdated(participant.clone()))
            .await;

        Ok(participant)
    }
}
