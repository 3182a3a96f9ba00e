//! HTTP API response DTOs for the classroom session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use kokuban_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::Poll;

/// Poll record for the read-only endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRecordDto {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<usize>,
    pub timer: i64,
    pub created_at: String, // ISO 8601
    pub is_active: bool,
    pub responses: BTreeMap<usize, u32>,
    pub total_responses: u32,
}

impl From<&Poll> for PollRecordDto {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id.as_str().to_string(),
            question: poll.question.clone(),
            options: poll.options.clone(),
            correct_answers: poll.correct_answers.iter().copied().collect(),
            timer: poll.timer_seconds,
            created_at: timestamp_to_jst_rfc3339(poll.created_at.value()),
            is_active: poll.is_active,
            responses: poll.responses.clone(),
            total_responses: poll.total_responses,
        }
    }
}
