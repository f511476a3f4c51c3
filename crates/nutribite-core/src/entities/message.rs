//! Message entity - a direct message between two users

use chrono::{DateTime, Utc};

/// Maximum message body length in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Direct message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The other participant, seen from `user_id`
    pub fn peer_of(&self, user_id: i64) -> i64 {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }

    #[inline]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Latest message exchanged with one peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub peer_id: i64,
    pub peer_name: String,
    pub last_message: Message,
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_of() {
        let msg = Message {
            id: 1,
            sender_id: 10,
            recipient_id: 20,
            body: "hi".to_string(),
            read_at: None,
            created_at: Utc::now(),
        };
        assert_eq!(msg.peer_of(10), 20);
        assert_eq!(msg.peer_of(20), 10);
    }
}
