use axum::{Json, extract::State};
use symptomchat_core::Chat;
use symptomchat_shared::AppError;

use crate::utils::AppState;

/// List conversations, newest first
#[utoipa::path(
  get,
  path = "/api/chats",
  responses(
    (status = 200, description = "All chats", body = Vec<Chat>),
  )
)]
#[axum::debug_handler]
pub async fn list_chats(State(state): State<AppState>) -> Result<Json<Vec<Chat>>, AppError> {
  Ok(Json(Chat::list(&state.db).await?))
}
