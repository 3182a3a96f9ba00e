//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! `ClassroomSession` 集約を 1 つの Mutex で保護し、インメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! 各メソッドはロックを 1 回だけ取得し、集約のメソッドを 1 回呼び出します。
//! タイマー経由の投票終了と回答経由の投票終了は同じロックの内側で
//! 判定されるため、どちらか一方だけが遷移を実行します。
//!
//! プロセス再起動をまたいだ永続化は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AnswerOutcome, ChatMessage, ClassroomSession, ConnectionId, MessageId, MessageText, Participant,
    ParticipantName, Poll, PollDraft, PollId, SessionError, SessionRepository, SessionSnapshot,
    StudentJoined, Timestamp,
};

/// インメモリ Session Repository 実装
///
/// ドメイン層の SessionRepository trait を実装します（依存性の逆転）。
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    /// ClassroomSession ドメインモデル（唯一の同期境界）
    session: Arc<Mutex<ClassroomSession>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new(session: Arc<Mutex<ClassroomSession>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    async fn join_student(
        &self,
        id: ConnectionId,
        name: ParticipantName,
        joined_at: Timestamp,
    ) -> Result<StudentJoined, SessionError> {
        self.session.lock().await.join_student(id, name, joined_at)
    }

    async fn mark_inactive(&self, id: &ConnectionId) -> Option<Participant> {
        self.session.lock().await.mark_inactive(id)
    }

    async fn create_poll(
        &self,
        id: PollId,
        draft: PollDraft,
        created_at: Timestamp,
    ) -> Result<Poll, SessionError> {
        self.session.lock().await.create_poll(id, draft, created_at)
    }

    async fn submit_answer(&self, id: &ConnectionId, option_index: i64) -> AnswerOutcome {
        self.session.lock().await.submit_answer(id, option_index)
    }

    async fn end_poll(&self, poll_id: &PollId) -> Option<Poll> {
        self.session.lock().await.end_poll(poll_id)
    }

    async fn post_message(
        &self,
        message_id: MessageId,
        id: &ConnectionId,
        text: MessageText,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, SessionError> {
        self.session
            .lock()
            .await
            .post_message(message_id, id, text, timestamp)
    }

    async fn current_poll(&self) -> Option<Poll> {
        self.session.lock().await.current_poll().cloned()
    }

    async fn poll_history(&self) -> Vec<Poll> {
        self.session.lock().await.poll_history().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageIdFactory, PollIdFactory};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemorySessionRepository が集約の操作を正しく委譲すること
    // - 並行して呼ばれた場合でも投票終了が 1 回だけ行われること
    //
    // 【なぜこのテストが必要か】
    // - タイマーと回答の 2 つの終了トリガーが同じ投票を同時に終了しようとする
    // - Mutex による排他が不変条件（アクティブな投票は高々 1 つ、履歴は 1 件）を守ることを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. 参加者の登録と取得
    // 2. 回答と終了要求を多数並行実行しても履歴が 1 件だけになる
    // 3. 合計回答数が回答記録の件数と一致する
    // ========================================

    fn conn(s: &str) -> ConnectionId {
        ConnectionId::new(s.to_string()).unwrap()
    }

    fn draft(options: usize) -> PollDraft {
        PollDraft::new(
            "Q?".to_string(),
            (0..options).map(|i| format!("option {i}")).collect(),
            vec![],
            60,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_join_appears_in_snapshot() {
        // テスト項目: 参加者を登録するとスナップショットに含まれる
        // given (前提条件):
        let repo = InMemorySessionRepository::default();

        // when (操作):
        let joined = repo
            .join_student(
                conn("c1"),
                ParticipantName::new("alice".to_string()).unwrap(),
                Timestamp::new(1000),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(repo.snapshot().await.participants, vec![joined.participant]);
        assert!(!joined.has_answered);
        assert!(joined.current_poll.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_end_triggers_end_poll_once() {
        // テスト項目: 回答完了とタイマーが同時に終了を試みても履歴は 1 件だけ
        // given (前提条件):
        let repo = InMemorySessionRepository::default();
        let students: Vec<ConnectionId> = (0..20).map(|i| conn(&format!("s{i}"))).collect();
        for s in &students {
            repo.join_student(
                s.clone(),
                ParticipantName::new(s.as_str().to_string()).unwrap(),
                Timestamp::new(0),
            )
            .await
            .unwrap();
        }
        let poll = repo
            .create_poll(PollIdFactory::generate().unwrap(), draft(3), Timestamp::new(0))
            .await
            .unwrap();

        // when (操作): 全員の回答と複数のタイマー発火を並行実行
        let mut handles = Vec::new();
        for (i, s) in students.iter().cloned().enumerate() {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                match repo.submit_answer(&s, (i % 3) as i64).await {
                    AnswerOutcome::Accepted { ended, .. } => ended.is_some(),
                    AnswerOutcome::Rejected { .. } => false,
                }
            }));
        }
        for _ in 0..5 {
            let repo = repo.clone();
            let poll_id = poll.id.clone();
            handles.push(tokio::spawn(async move {
                repo.end_poll(&poll_id).await.is_some()
            }));
        }
        let mut transitions = 0;
        for handle in handles {
            if handle.await.unwrap() {
                transitions += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(transitions, 1);
        let history = repo.poll_history().await;
        assert_eq!(history.len(), 1);
        assert!(!history[0].is_active);
        let current = repo.current_poll().await.unwrap();
        assert!(!current.is_active);
        assert_eq!(current.total_responses, current.responses.values().sum::<u32>());
    }

    #[tokio::test]
    async fn test_post_message_from_unknown_sender_fails() {
        // テスト項目: 未登録の送信者のメッセージはエラーになり、履歴に残らない
        // given (前提条件):
        let repo = InMemorySessionRepository::default();

        // when (操作):
        let result = repo
            .post_message(
                MessageIdFactory::generate().unwrap(),
                &conn("nobody"),
                MessageText::new("hi".to_string()).unwrap(),
                Timestamp::new(0),
            )
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(SessionError::UnknownParticipant(_))));
        assert!(repo.snapshot().await.chat_messages.is_empty());
    }
}
