//! Domain factories for creating identifiers.

use super::{ConnectionId, MessageId, PollId, error::ValueObjectError};

/// Factory for generating PollId instances.
///
/// This factory encapsulates the logic for generating new poll identifiers,
/// separating the generation concern from the validation logic in PollId.
pub struct PollIdFactory;

impl PollIdFactory {
    /// Generate a new PollId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<PollId, ValueObjectError> {
        PollId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for chat message identifiers.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> Result<MessageId, ValueObjectError> {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for transport connection identifiers, assigned on WebSocket upgrade.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_id_factory_generate() {
        // テスト項目: PollIdFactory::generate() で UUID v4 形式の PollId を生成できる
        // when (操作):
        let result = PollIdFactory::generate();

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str().len(), 36); // UUID v4 の標準長（ハイフン含む）
    }

    #[test]
    fn test_poll_id_factory_generate_uniqueness() {
        // テスト項目: PollIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let id1 = PollIdFactory::generate().unwrap();
        let id2 = PollIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_message_id_factory_generate() {
        // テスト項目: MessageIdFactory::generate() も Result を返し、UUID 形式の ID を生成する
        // when (操作):
        let id1 = MessageIdFactory::generate().unwrap();
        let id2 = MessageIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_eq!(id1.as_str().len(), 36);
        assert_ne!(id1, id2);
        assert_eq!(MessageId::new(id1.as_str().to_string()), Ok(id1));
    }

    #[test]
    fn test_message_id_rejects_non_uuid() {
        // テスト項目: UUID 形式でない MessageId は作成できない
        // when (操作):
        let result = MessageId::new("12345".to_string());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::MessageIdInvalidFormat("12345".to_string()))
        );
        assert_eq!(MessageId::new(String::new()), Err(ValueObjectError::MessageIdEmpty));
    }

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // テスト項目: 接続 ID は接続ごとに異なる
        // when (操作):
        let id1 = ConnectionIdFactory::generate().unwrap();
        let id2 = ConnectionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }
}
