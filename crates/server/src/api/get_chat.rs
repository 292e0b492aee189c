use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use symptomchat_core::{Chat, ChatWithMessages};
use symptomchat_shared::AppError;

use crate::utils::{AppState, chat_id_from_path};

/// Fetch a conversation with its messages in order
#[utoipa::path(
  get,
  path = "/api/chats/{chat_id}",
  params(("chat_id" = i32, Path, description = "Chat id")),
  responses(
    (status = 200, description = "Chat and its messages", body = ChatWithMessages),
    (status = 400, description = "Malformed chat id"),
    (status = 404, description = "Chat not found")
  )
)]
#[axum::debug_handler]
pub async fn get_chat(
  State(state): State<AppState>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<ChatWithMessages>, AppError> {
  let chat_id = chat_id_from_path(path)?;
  Ok(Json(Chat::get(chat_id, &state.db).await?))
}
