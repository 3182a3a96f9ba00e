//! UseCase: 回答送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitAnswerUseCase::execute() メソッド
//! - 回答の受理・拒否と、それぞれの通知先
//!
//! ### なぜこのテストが必要か
//! - 受理時は教師に poll-updated、本人に answer-submitted が届くこと
//! - 最後の回答で投票が終了し、poll-ended が全員に 1 回だけ届くこと
//! - 拒否時は本人にだけ失敗理由が届き、集計が変わらないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：回答の受理、全員回答による終了
//! - 異常系：二重回答、範囲外の選択肢、投票なし

use std::sync::Arc;

use crate::domain::{AnswerOutcome, Broadcaster, ConnectionId, SessionEvent, SessionRepository};

use super::sequencer::EventSequencer;

/// 回答送信のユースケース
pub struct SubmitAnswerUseCase {
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    sequencer: EventSequencer,
}

impl SubmitAnswerUseCase {
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

    /// 回答を記録し、結果を通知する
    ///
    /// 拒否はエラーではなく `AnswerOutcome::Rejected` として返します。
    pub async fn execute(&self, connection_id: &ConnectionId, option_index: i64) -> AnswerOutcome {
        let _turn = self.sequencer.enter().await;
        let outcome = self
            .repository
            .submit_answer(connection_id, option_index)
            .await;

        match &outcome {
            AnswerOutcome::Accepted { poll, ended } => {
                tracing::debug!(
                    conn_id = %connection_id,
                    option_index,
                    total_responses = poll.total_responses,
                    "answer accepted"
                );
                self.broadcaster
                    .broadcast_teachers(SessionEvent::PollUpdated(poll.clone()))
                    .await;
                self.broadcaster
                    .send_to(
                        connection_id,
                        SessionEvent::AnswerSubmitted {
                            success: true,
                            current_poll: Some(poll.clone()),
                            reason: None,
                        },
                    )
                    .await;
                if let Some(ended) = ended {
                    tracing::info!(poll_id = %ended.id, "all active participants answered");
                    self.broadcaster
                        .broadcast_all(SessionEvent::PollEnded(ended.clone()))
                        .await;
                }
            }
            AnswerOutcome::Rejected {
                reason,
                current_poll,
            } => {
                tracing::warn!(conn_id = %connection_id, option_index, %reason, "answer rejected");
                self.broadcaster
                    .send_to(
                        connection_id,
                        SessionEvent::AnswerSubmitted {
                            success: false,
                            current_poll: current_poll.clone(),
                            reason: Some(*reason),
                        },
                    )
                    .await;
            }
        }

        outcome
    }
}
