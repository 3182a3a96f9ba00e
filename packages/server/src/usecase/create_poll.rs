//! UseCase: 投票作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreatePollUseCase::execute() メソッド
//! - 投票作成、poll-created の全体送信、タイマーの起動
//!
//! ### なぜこのテストが必要か
//! - アクティブな投票がある間は新しい投票を作れないこと（既存のタイマーが孤立しない）
//! - 作成と同時にタイマーが起動し、満了で poll-ended が送られること
//!
//! ### どのような状況を想定しているか
//! - 正常系：投票作成とタイマー満了
//! - 異常系：アクティブな投票がある状態での作成

use std::sync::Arc;

use crate::domain::{
    Broadcaster, Poll, PollDraft, PollIdFactory, SessionEvent, SessionRepository, Timestamp,
};

use super::{end_poll::EndPollUseCase, error::CreatePollError, sequencer::EventSequencer};

/// 投票作成のユースケース
pub struct CreatePollUseCase {
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    end_poll: EndPollUseCase,
    sequencer: EventSequencer,
}

impl CreatePollUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        let sequencer = EventSequencer::new();
        let end_poll = EndPollUseCase::new(repository.clone(), broadcaster.clone())
            .with_sequencer(sequencer.clone());
        Self {
            repository,
            broadcaster,
            end_poll,
            sequencer,
        }
    }

    /// 他のユースケースと通知順序のガードを共有する（タイマー経由の終了も含む）
    pub fn with_sequencer(mut self, sequencer: EventSequencer) -> Self {
        self.end_poll = self.end_poll.with_sequencer(sequencer.clone());
        self.sequencer = sequencer;
        self
    }

    /// 投票を作成し、全員に通知してタイマーを起動する
    ///
    /// # Returns
    ///
    /// * `Ok(Poll)` - 作成された投票
    /// * `Err(CreatePollError)` - 作成失敗（現在の投票は変更されない）
    pub async fn execute(&self, draft: PollDraft) -> Result<Poll, CreatePollError> {
        let _turn = self.sequencer.enter().await;
        let poll_id = PollIdFactory::generate()?;
        let poll = self
            .repository
            .create_poll(poll_id, draft, Timestamp::now())
            .await?;
        tracing::info!(
            poll_id = %poll.id,
            options = poll.options.len(),
            timer_seconds = poll.timer_seconds,
            "poll created"
        );

        self.broadcaster
            .broadcast_all(SessionEvent::PollCreated(poll.clone()))
            .await;
        self.end_poll.schedule(poll.id.clone(), poll.timer_duration());

        Ok(poll)
    }
}
