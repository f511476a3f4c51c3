//! Message service
//!
//! Direct messages between two users, grouped into conversations by peer.

use nutribite_core::entities::MAX_MESSAGE_LENGTH;
use nutribite_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    ConversationResponse, MessageResponse, PageRequest, PaginatedResponse, SendMessageRequest,
    UpdatedCountResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

/// Trimmed body, or the rule it breaks
fn normalize_body(body: &str) -> Result<&str, DomainError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(DomainError::ValidationError(
            "Message cannot be empty".to_string(),
        ));
    }
    if body.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: MAX_MESSAGE_LENGTH,
        });
    }
    Ok(body)
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(recipient_id = request.recipient_id))]
    pub async fn send(
        &self,
        sender_id: i64,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        if sender_id == request.recipient_id {
            return Err(DomainError::CannotMessageSelf.into());
        }
        let body = normalize_body(&request.body)?;

        self.ctx
            .user_repo()
            .find_by_id(request.recipient_id)
            .await?
            .ok_or(DomainError::UserNotFound(request.recipient_id))?;

        let message = self
            .ctx
            .message_repo()
            .create(sender_id, request.recipient_id, body)
            .await?;

        info!(message_id = message.id, "Message sent");
        Ok(MessageResponse::from(message))
    }

    #[instrument(skip(self))]
    pub async fn conversations(&self, user_id: i64) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self.ctx.message_repo().conversations(user_id).await?;
        Ok(conversations
            .into_iter()
            .map(ConversationResponse::from)
            .collect())
    }

    /// Messages exchanged with `peer_id`, newest first
    #[instrument(skip(self))]
    pub async fn with_peer(
        &self,
        user_id: i64,
        peer_id: i64,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<MessageResponse>> {
        let messages = self
            .ctx
            .message_repo()
            .list_between(user_id, peer_id, page.to_page())
            .await?;
        Ok(PaginatedResponse::new(
            messages.into_iter().map(MessageResponse::from).collect(),
            page.page,
            page.per_page,
            None,
        ))
    }

    /// Mark everything `peer_id` sent to `user_id` as read
    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: i64, peer_id: i64) -> ServiceResult<UpdatedCountResponse> {
        let updated = self.ctx.message_repo().mark_read(user_id, peer_id).await?;
        Ok(UpdatedCountResponse { updated })
    }
}
