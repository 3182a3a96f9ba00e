//! UseCase: 投票終了処理
//!
//! タイマー満了と全員回答の 2 つの終了トリガーが共有する遷移。
//! 遷移そのものは Repository の `end_poll`（投票 ID をキーにした冪等な操作）が行い、
//! 実際に遷移した呼び出しだけが poll-ended を全員に送信します。

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::domain::{Broadcaster, Poll, PollId, SessionEvent, SessionRepository};

use super::sequencer::EventSequencer;

/// 投票終了のユースケース
#[derive(Clone)]
pub struct EndPollUseCase {
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    sequencer: EventSequencer,
}

impl EndPollUseCase {
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

    /// 投票を終了する
    ///
    /// # Returns
    ///
    /// * `Some(Poll)` - この呼び出しが遷移を行った（終了時のスナップショット）
    /// * `None` - 既に終了済み、または別の投票に置き換わっている
    pub async fn execute(&self, poll_id: &PollId) -> Option<Poll> {
        let _turn = self.sequencer.enter().await;
        let ended = self.repository.end_poll(poll_id).await?;
        tracing::info!(poll_id = %ended.id, responses = ended.total_responses, "poll ended");
        self.broadcaster
            .broadcast_all(SessionEvent::PollEnded(ended.clone()))
            .await;
        Some(ended)
    }

    /// `delay` 経過後に `execute` するワンショットタイマーを起動する
    pub fn schedule(&self, poll_id: PollId, delay: Duration) -> JoinHandle<Option<Poll>> {
        let usecase = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let ended = usecase.execute(&poll_id).await;
            if ended.is_none() {
                tracing::debug!(%poll_id, "poll timer fired after the poll had already ended");
            }
            ended
        })
    }
}
