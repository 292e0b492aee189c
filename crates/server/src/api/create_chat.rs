use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use symptomchat_core::Chat;
use symptomchat_shared::AppError;
use utoipa::ToSchema;

use crate::utils::AppState;

#[derive(Deserialize, ToSchema)]
pub struct CreateChat {
  /// Defaults to "New Symptom Check" when missing or blank
  pub title: Option<String>,
}

/// Start a new conversation
///
/// The body is optional; anything that is not a JSON object with a `title`
/// creates a chat with the default title.
#[utoipa::path(
  post,
  path = "/api/chats",
  request_body(content = CreateChat, description = "Optional chat title"),
  responses(
    (status = 200, description = "Chat created", body = Chat),
  )
)]
#[axum::debug_handler]
pub async fn create_chat(
  State(state): State<AppState>,
  payload: Result<Json<CreateChat>, JsonRejection>,
) -> Result<Json<Chat>, AppError> {
  let title = payload.ok().and_then(|Json(payload)| payload.title);
  let chat = Chat::create(title.as_deref(), &state.db).await?;

  Ok(Json(chat))
}
