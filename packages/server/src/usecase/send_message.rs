//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - チャットログへの追加と new-message の全体送信
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全員にメッセージが届くことを確認
//! - 未登録の送信者のメッセージがログに残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者のメッセージ送信
//! - 異常系：参加していない接続からの送信

use std::sync::Arc;

use crate::domain::{
    Broadcaster, ChatMessage, ConnectionId, MessageIdFactory, MessageText, SessionEvent,
    SessionRepository, Timestamp,
};

use super::{error::SendMessageError, sequencer::EventSequencer};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    broadcaster: Arc<dyn Broadcaster>,
    sequencer: EventSequencer,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者の接続 ID
    /// * `text` - メッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 記録されたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗（ログには追加されない）
    pub async fn execute(
        &self,
        from: &ConnectionId,
        text: MessageText,
    ) -> Result<ChatMessage, SendMessageError> {
        let message_id = MessageIdFactory::generate()?;
        let _turn = self.sequencer.enter().await;
        let message = self
            .repository
            .post_message(message_id, from, text, Timestamp::now())
            .await?;

        self.broadcaster
            .broadcast_all(SessionEvent::NewMessage(message.clone()))
            .await;

        Ok(message)
    }
}
