//! Direct message handlers

use axum::{extract::State, Json};
use nutribite_service::dto::{
    ConversationResponse, MessageResponse, PaginatedResponse, SendMessageRequest,
    UpdatedCountResponse,
};
use nutribite_service::MessageService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let message = MessageService::new(state.service_context())
        .send(auth.id(), request)
        .await?;
    Ok(Created(Json(message)))
}

/// GET /api/messages/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let conversations = MessageService::new(state.service_context())
        .conversations(auth.id())
        .await?;
    Ok(Json(conversations))
}

/// GET /api/messages/with/:id
pub async fn list_messages_with(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(peer_id): IdPath,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<MessageResponse>>> {
    let messages = MessageService::new(state.service_context())
        .with_peer(auth.id(), peer_id, page)
        .await?;
    Ok(Json(messages))
}

/// POST /api/messages/with/:id/read
pub async fn mark_conversation_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(peer_id): IdPath,
) -> ApiResult<Json<UpdatedCountResponse>> {
    let response = MessageService::new(state.service_context())
        .mark_read(auth.id(), peer_id)
        .await?;
    Ok(Json(response))
}
