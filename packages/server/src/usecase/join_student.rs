//! UseCase: 生徒参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinStudentUseCase::execute() メソッド
//! - 参加者登録と、教師・本人への通知内容
//!
//! ### なぜこのテストが必要か
//! - 教師には新しい参加者だけが、本人には現在の投票とチャットが届くことを保証
//! - 重複参加が既存の登録を上書きしないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の参加
//! - 異常系：同じ接続 ID での再参加

use std::sync::Arc;

use crate::domain::{
    Broadcaster, ConnectionId, Participant, ParticipantName, SessionEvent, SessionRepository,
    Timestamp,
};

use super::{error::JoinStudentError, sequencer::EventSequencer};

/// 生徒参加のユースケース
pub struct JoinStudentUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    sequencer: EventSequencer,
}

impl JoinStudentUseCase {
    /// 新しい JoinStudentUseCase を作成
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

    /// 生徒参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加するクライアントの接続 ID
    /// * `name` - 表示名
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者
    /// * `Err(JoinStudentError)` - 参加失敗（通知は送信されない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        name: ParticipantName,
    ) -> Result<Participant, JoinStudentError> {
        let _turn = self.sequencer.enter().await;
        let joined = self
            .repository
            .join_student(connection_id.clone(), name, Timestamp::now())
            .await?;

        self.broadcaster
            .broadcast_teachers(SessionEvent::ParticipantJoined(joined.participant.clone()))
            .await;
        self.broadcaster
            .send_to(
                &connection_id,
                SessionEvent::StudentJoined {
                    current_poll: joined.current_poll,
                    chat_messages: joined.chat_messages,
                    has_answered: joined.has_answered,
                },
            )
            .await;

        Ok(joined.participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{PollIdFactory, broadcaster::MockBroadcaster},
        usecase::test_support::{conn, create_test_repository, draft},
    };

    fn name(s: &str) -> ParticipantName {
        ParticipantName::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_student_notifies_teachers_and_caller() {
        // テスト項目: 参加すると教師に participant-joined、本人に student-joined が届く
        // given (前提条件):
        let repository = create_test_repository();
        let poll = repository
            .create_poll(
                PollIdFactory::generate().unwrap(),
                draft(&["A", "B"], 60),
                Timestamp::new(0),
            )
            .await
            .unwrap();

        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast_teachers()
            .withf(|event| {
                matches!(event, SessionEvent::ParticipantJoined(p) if p.name.as_str() == "alice" && p.is_active)
            })
            .times(1)
            .return_const(());
        let poll_id = poll.id.clone();
        broadcaster
            .expect_send_to()
            .withf(move |id, event| {
                id.as_str() == "c1"
                    && matches!(
                        event,
                        SessionEvent::StudentJoined { current_poll: Some(p), has_answered: false, .. }
                            if p.id == poll_id
                    )
            })
            .times(1)
            .return_const(());
        let usecase = JoinStudentUseCase::new(repository.clone(), Arc::new(broadcaster));

        // when (操作):
        let result = usecase.execute(conn("c1"), name("alice")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(repository.snapshot().await.participants.len(), 1);
    }

    #[tokio::test]
    async fn test_join_student_duplicate_error() {
        // テスト項目: 同じ接続 ID での再参加はエラーになり、通知は送られない
        // given (前提条件):
        let repository = create_test_repository();
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_broadcast_teachers()
            .times(1)
            .return_const(());
        broadcaster.expect_send_to().times(1).return_const(());
        let usecase = JoinStudentUseCase::new(repository.clone(), Arc::new(broadcaster));
        usecase.execute(conn("c1"), name("alice")).await.unwrap();

        // when (操作):
        let result = usecase.execute(conn("c1"), name("mallory")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinStudentError::DuplicateConnection("c1".to_string()))
        );
        let participants = repository.snapshot().await.participants;
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name.as_str(), "alice");
    }
}
