//! UseCase: セッションの操作窓口
//!
//! 受信した 7 種類の操作（教師参加・生徒参加・投票作成・回答・チャット・退出・切断）を
//! 対応するユースケースに振り分けます。UI 層はこの型だけを通してセッションを操作します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 実際の ChannelBroadcaster を使った教師・生徒の一連のシナリオ
//!
//! ### なぜこのテストが必要か
//! - 各ユースケースの通知先（全員・教師・本人）が組み合わさったときに、
//!   それぞれの接続が期待どおりの順序でイベントを受け取ることを確認
//!
//! ### どのような状況を想定しているか
//! - 全員回答による投票終了（タイマーより先に終了する）
//! - 退出させた生徒が投票完了の判定から外れる

use std::sync::Arc;

use crate::domain::{
    AnswerOutcome, Broadcaster, ChatMessage, ConnectionId, MessageText, Participant,
    ParticipantName, Poll, PollDraft, SessionRepository,
};

use super::{
    create_poll::CreatePollUseCase,
    disconnect_participant::DisconnectParticipantUseCase,
    error::{CreatePollError, JoinStudentError, KickStudentError, SendMessageError},
    join_student::JoinStudentUseCase,
    join_teacher::JoinTeacherUseCase,
    kick_student::KickStudentUseCase,
    send_message::SendMessageUseCase,
    sequencer::EventSequencer,
    submit_answer::SubmitAnswerUseCase,
};

/// セッション操作の窓口
pub struct SessionFacade {
    repository: Arc<dyn SessionRepository>,
    join_teacher: JoinTeacherUseCase,
    join_student: JoinStudentUseCase,
    create_poll: CreatePollUseCase,
    submit_answer: SubmitAnswerUseCase,
    send_message: SendMessageUseCase,
    kick_student: KickStudentUseCase,
    disconnect: DisconnectParticipantUseCase,
}

impl SessionFacade {
    pub fn new(repository: Arc<dyn SessionRepository>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        // 全ユースケース（タイマーを含む）で 1 つの順序ガードを共有する
        let sequencer = EventSequencer::new();
        Self {
            join_teacher: JoinTeacherUseCase::new(repository.clone(), broadcaster.clone())
                .with_sequencer(sequencer.clone()),
            join_student: JoinStudentUseCase::new(repository.clone(), broadcaster.clone())
                .with_sequencer(sequencer.clone()),
            create_poll: CreatePollUseCase::new(repository.clone(), broadcaster.clone())
                .with_sequencer(sequencer.clone()),
            submit_answer: SubmitAnswerUseCase::new(repository.clone(), broadcaster.clone())
                .with_sequencer(sequencer.clone()),
            send_message: SendMessageUseCase::new(repository.clone(), broadcaster.clone())
                .with_sequencer(sequencer.clone()),
            kick_student: KickStudentUseCase::new(repository.clone(), broadcaster.clone())
                .with_sequencer(sequencer.clone()),
            disconnect: DisconnectParticipantUseCase::new(repository.clone(), broadcaster)
                .with_sequencer(sequencer),
            repository,
        }
    }

    pub async fn join_teacher(&self, connection_id: &ConnectionId) {
        self.join_teacher.execute(connection_id).await;
    }

    pub async fn join_student(
        &self,
        connection_id: ConnectionId,
        name: ParticipantName,
    ) -> Result<Participant, JoinStudentError> {
        self.join_student.execute(connection_id, name).await
    }

    pub async fn create_poll(&self, draft: PollDraft) -> Result<Poll, CreatePollError> {
        self.create_poll.execute(draft).await
    }

    pub async fn submit_answer(
        &self,
        connection_id: &ConnectionId,
        option_index: i64,
    ) -> AnswerOutcome {
        self.submit_answer.execute(connection_id, option_index).await
    }

    pub async fn send_message(
        &self,
        connection_id: &ConnectionId,
        text: MessageText,
    ) -> Result<ChatMessage, SendMessageError> {
        self.send_message.execute(connection_id, text).await
    }

    pub async fn kick_student(
        &self,
        student_id: &ConnectionId,
    ) -> Result<Participant, KickStudentError> {
        self.kick_student.execute(student_id).await
    }

    /// トランスポート層で接続が閉じたときに呼ばれる
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Participant> {
        self.disconnect.execute(connection_id).await
    }

    /// 現在の投票（終了済みでも次の投票が作られるまでは残る）
    pub async fn current_poll(&self) -> Option<Poll> {
        self.repository.current_poll().await
    }

    /// 終了した投票の履歴（古い順）
    pub async fn poll_history(&self) -> Vec<Poll> {
        self.repository.poll_history().await
    }
}
