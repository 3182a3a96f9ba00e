//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作し、Broadcaster 経由で結果を通知します。

pub mod create_poll;
pub mod disconnect_participant;
pub mod end_poll;
pub mod error;
pub mod facade;
pub mod join_student;
pub mod join_teacher;
pub mod kick_student;
pub mod send_message;
pub mod sequencer;
pub mod submit_answer;

#[cfg(test)]
mod test_support;

pub use create_poll::CreatePollUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use end_poll::EndPollUseCase;
pub use error::{CreatePollError, JoinStudentError, KickStudentError, SendMessageError};
pub use facade::SessionFacade;
pub use join_student::JoinStudentUseCase;
pub use join_teacher::JoinTeacherUseCase;
pub use kick_student::KickStudentUseCase;
pub use send_message::SendMessageUseCase;
pub use sequencer::EventSequencer;
pub use submit_answer::SubmitAnswerUseCase;
