//! Message entity <-> model mapper

use nutribite_core::entities::{Conversation, Message};

use crate::models::{ConversationModel, MessageModel};

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            sender_id: model.sender_id,
            recipient_id: model.recipient_id,
            body: model.body,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            peer_id: model.peer_id,
            peer_name: model.peer_name,
            unread_count: model.unread_count,
            last_message: Message {
                id: model.id,
                sender_id: model.sender_id,
                recipient_id: model.recipient_id,
                body: model.body,
                read_at: model.read_at,
                created_at: model.created_at,
            },
        }
    }
}
