use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
  http::StatusCode,
};
use symptomchat_core::{Chat, ClearedHistory};
use symptomchat_shared::AppError;

use crate::utils::{AppState, chat_id_from_path};

/// Delete one conversation and its messages
#[utoipa::path(
  delete,
  path = "/api/chats/{chat_id}",
  params(("chat_id" = i32, Path, description = "Chat id")),
  responses(
    (status = 204, description = "Chat deleted"),
    (status = 400, description = "Malformed chat id"),
    (status = 404, description = "Chat not found")
  )
)]
#[axum::debug_handler]
pub async fn delete_chat(
  State(state): State<AppState>,
  path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
  let chat_id = chat_id_from_path(path)?;
  Chat::delete(chat_id, &state.db).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// Delete every conversation and message
#[utoipa::path(
  delete,
  path = "/api/chats",
  responses(
    (status = 200, description = "History cleared", body = ClearedHistory),
    (status = 500, description = "Nothing was deleted")
  )
)]
#[axum::debug_handler]
pub async fn clear_chats(State(state): State<AppState>) -> Result<Json<ClearedHistory>, AppError> {
  Ok(Json(Chat::clear_all(&state.db).await?))
}
