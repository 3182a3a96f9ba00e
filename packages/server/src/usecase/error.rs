//! UseCase 層のエラー定義
//!
//! 各ユースケースで想定されるドメインエラーは専用のバリアントに変換し、
//! それ以外は `Session` としてそのまま保持します。

use thiserror::Error;

use crate::domain::{SessionError, ValueObjectError};

/// 生徒参加のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinStudentError {
    /// 同じ接続 ID で既に参加している
    #[error("Connection '{0}' already joined")]
    DuplicateConnection(String),

    #[error(transparent)]
    Session(SessionError),
}

impl From<SessionError> for JoinStudentError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::DuplicateConnection(id) => Self::DuplicateConnection(id),
            other => Self::Session(other),
        }
    }
}

/// 投票作成のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreatePollError {
    /// アクティブな投票が残っている
    #[error("Poll '{0}' is still in progress")]
    PollInProgress(String),

    #[error("Failed to generate poll id: {0}")]
    IdGeneration(#[from] ValueObjectError),

    #[error(transparent)]
    Session(SessionError),
}

impl From<SessionError> for CreatePollError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::PollInProgress(id) => Self::PollInProgress(id),
            other => Self::Session(other),
        }
    }
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 送信者が参加者として登録されていない
    #[error("Sender '{0}' is not a registered participant")]
    UnknownParticipant(String),

    #[error("Failed to generate message id: {0}")]
    IdGeneration(#[from] ValueObjectError),

    #[error(transparent)]
    Session(SessionError),
}

impl From<SessionError> for SendMessageError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::UnknownParticipant(id) => Self::UnknownParticipant(id),
            other => Self::Session(other),
        }
    }
}

/// 退出処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KickStudentError {
    #[error("Student '{0}' is not registered")]
    UnknownParticipant(String),
}
