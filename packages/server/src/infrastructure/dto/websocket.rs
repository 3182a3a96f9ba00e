//! WebSocket message DTOs for the classroom session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Participant, Poll, SessionEvent};

/// Outbound message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    TeacherJoined,
    ParticipantJoined,
    StudentJoined,
    PollCreated,
    PollUpdated,
    PollEnded,
    AnswerSubmitted,
    NewMessage,
    KickedOut,
    ParticipantUpdated,
}

/// Inbound client action, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    JoinAsTeacher,
    JoinAsStudent {
        name: String,
    },
    CreatePoll {
        question: String,
        options: Vec<String>,
        #[serde(default)]
        correct_answers: Vec<usize>,
        /// Seconds; zero or negative expires immediately
        timer: i64,
    },
    SubmitAnswer {
        option_index: i64,
    },
    SendMessage {
        message: String,
    },
    KickStudent {
        student_id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    /// Unix timestamp (milliseconds since epoch) in JST
    pub joined_at: i64,
}

impl From<&Participant> for ParticipantDto {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id.as_str().to_string(),
            name: p.name.as_str().to_string(),
            is_active: p.is_active,
            joined_at: p.joined_at.value(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDto {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<usize>,
    pub timer: i64,
    pub created_at: i64,
    pub is_active: bool,
    pub responses: BTreeMap<usize, u32>,
    pub total_responses: u32,
}

impl From<&Poll> for PollDto {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id.as_str().to_string(),
            question: poll.question.clone(),
            options: poll.options.clone(),
            correct_answers: poll.correct_answers.iter().copied().collect(),
            timer: poll.timer_seconds,
            created_at: poll.created_at.value(),
            is_active: poll.is_active,
            responses: poll.responses.clone(),
            total_responses: poll.total_responses,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub message: String,
    pub timestamp: i64,
}

impl From<&ChatMessage> for ChatMessageDto {
    fn from(m: &ChatMessage) -> Self {
        Self {
            id: m.id.as_str().to_string(),
            user_id: m.author_id.as_str().to_string(),
            user_name: m.author_name.as_str().to_string(),
            message: m.text.as_str().to_string(),
            timestamp: m.timestamp.value(),
        }
    }
}

/// Full session state sent to a teacher on join
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherJoinedMessage {
    pub r#type: MessageType,
    pub current_poll: Option<PollDto>,
    pub participants: Vec<ParticipantDto>,
    pub chat_messages: Vec<ChatMessageDto>,
    pub poll_history: Vec<PollDto>,
}

/// Catch-up state sent to a student on join
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentJoinedMessage {
    pub r#type: MessageType,
    pub current_poll: Option<PollDto>,
    pub chat_messages: Vec<ChatMessageDto>,
    pub has_answered: bool,
}

/// participant-joined / participant-updated notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantMessage {
    pub r#type: MessageType,
    pub participant: ParticipantDto,
}

/// poll-created / poll-updated / poll-ended notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollMessage {
    pub r#type: MessageType,
    pub poll: PollDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmittedMessage {
    pub r#type: MessageType,
    pub success: bool,
    pub current_poll: Option<PollDto>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageMessage {
    pub r#type: MessageType,
    pub message: ChatMessageDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KickedOutMessage {
    pub r#type: MessageType,
}

fn polls(polls: &[Poll]) -> Vec<PollDto> {
    polls.iter().map(PollDto::from).collect()
}

fn messages(messages: &[ChatMessage]) -> Vec<ChatMessageDto> {
    messages.iter().map(ChatMessageDto::from).collect()
}

fn poll_message(r#type: MessageType, poll: &Poll) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PollMessage {
        r#type,
        poll: poll.into(),
    })
}

fn participant_message(
    r#type: MessageType,
    participant: &Participant,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ParticipantMessage {
        r#type,
        participant: participant.into(),
    })
}

/// Encode a session event as a JSON text frame
pub fn encode_event(event: &SessionEvent) -> Result<String, serde_json::Error> {
    match event {
        SessionEvent::TeacherJoined(snapshot) => serde_json::to_string(&TeacherJoinedMessage {
            r#type: MessageType::TeacherJoined,
            current_poll: snapshot.current_poll.as_ref().map(PollDto::from),
            participants: snapshot.participants.iter().map(ParticipantDto::from).collect(),
            chat_messages: messages(&snapshot.chat_messages),
            poll_history: polls(&snapshot.poll_history),
        }),
        SessionEvent::ParticipantJoined(p) => participant_message(MessageType::ParticipantJoined, p),
        SessionEvent::StudentJoined {
            current_poll,
            chat_messages,
            has_answered,
        } => serde_json::to_string(&StudentJoinedMessage {
            r#type: MessageType::StudentJoined,
            current_poll: current_poll.as_ref().map(PollDto::from),
            chat_messages: messages(chat_messages),
            has_answered: *has_answered,
        }),
        SessionEvent::PollCreated(poll) => poll_message(MessageType::PollCreated, poll),
        SessionEvent::PollUpdated(poll) => poll_message(MessageType::PollUpdated, poll),
        SessionEvent::PollEnded(poll) => poll_message(MessageType::PollEnded, poll),
        SessionEvent::AnswerSubmitted {
            success,
            current_poll,
            reason,
        } => serde_json::to_string(&AnswerSubmittedMessage {
            r#type: MessageType::AnswerSubmitted,
            success: *success,
            current_poll: current_poll.as_ref().map(PollDto::from),
            reason: reason.map(|r| r.to_string()),
        }),
        SessionEvent::NewMessage(m) => serde_json::to_string(&NewMessageMessage {
            r#type: MessageType::NewMessage,
            message: m.into(),
        }),
        SessionEvent::KickedOut => serde_json::to_string(&KickedOutMessage {
            r#type: MessageType::KickedOut,
        }),
        SessionEvent::ParticipantUpdated(p) => {
            participant_message(MessageType::ParticipantUpdated, p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionId, ParticipantName, PollDraft, PollIdFactory, RejectReason, Timestamp,
    };

    #[test]
    fn test_parse_create_poll() {
        // テスト項目: create-poll フレームを camelCase のフィールドで解析できる
        // given (前提条件):
        let json = r#"{"type":"create-poll","question":"2+2?","options":["3","4"],"correctAnswers":[1],"timer":30}"#;

        // when (操作):
        let parsed: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            parsed,
            ClientMessage::CreatePoll {
                question: "2+2?".to_string(),
                options: vec!["3".to_string(), "4".to_string()],
                correct_answers: vec![1],
                timer: 30,
            }
        );
    }

    #[test]
    fn test_parse_submit_answer_negative_index() {
        // テスト項目: 負の選択肢インデックスも解析でき、判定はドメイン層に任される
        // when (操作):
        let parsed: ClientMessage =
            serde_json::from_str(r#"{"type":"submit-answer","optionIndex":-1}"#).unwrap();

        // then (期待する結果):
        assert_eq!(parsed, ClientMessage::SubmitAnswer { option_index: -1 });
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        // テスト項目: 未知の type は解析エラーになる
        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"reset-everything"}"#);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_poll_ended() {
        // テスト項目: poll-ended イベントが type と集計を含む JSON に変換される
        // given (前提条件):
        let draft = PollDraft::new(
            "Q".to_string(),
            vec!["A".to_string(), "B".to_string()],
            vec![0],
            5,
        )
        .unwrap();
        let mut poll = Poll::new(PollIdFactory::generate().unwrap(), draft, Timestamp::new(0));
        poll.record_response(1);
        poll.deactivate();

        // when (操作):
        let json = encode_event(&SessionEvent::PollEnded(poll)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "poll-ended");
        assert_eq!(value["poll"]["isActive"], false);
        assert_eq!(value["poll"]["totalResponses"], 1);
        assert_eq!(value["poll"]["responses"]["1"], 1);
        assert_eq!(value["poll"]["correctAnswers"], serde_json::json!([0]));
    }

    #[test]
    fn test_encode_rejected_answer() {
        // テスト項目: 拒否された回答は success=false と理由を含む
        // when (操作):
        let json = encode_event(&SessionEvent::AnswerSubmitted {
            success: false,
            current_poll: None,
            reason: Some(RejectReason::AlreadyAnswered),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "answer-submitted");
        assert_eq!(value["success"], false);
        assert!(value["currentPoll"].is_null());
        assert_eq!(value["reason"], "already answered this poll");
    }

    #[test]
    fn test_encode_participant_updated() {
        // テスト項目: participant-updated イベントに参加者の状態が含まれる
        // given (前提条件):
        let mut participant = Participant::new(
            ConnectionId::new("c1".to_string()).unwrap(),
            ParticipantName::new("alice".to_string()).unwrap(),
            Timestamp::new(42),
        );
        participant.is_active = false;

        // when (操作):
        let json = encode_event(&SessionEvent::ParticipantUpdated(participant)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "participant-updated");
        assert_eq!(value["participant"]["id"], "c1");
        assert_eq!(value["participant"]["isActive"], false);
        assert_eq!(value["participant"]["joinedAt"], 42);
    }
}
