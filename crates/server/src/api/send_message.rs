use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
};
use serde::{Deserialize, Serialize};
use symptomchat_core::{Chat, StructuredReply, generate_reply};
use symptomchat_shared::{AppError, MessageRole};
use utoipa::ToSchema;

use crate::utils::{AppState, chat_id_from_path};

#[derive(Deserialize, ToSchema)]
pub struct SendMessage {
  /// Free-text symptom description
  pub text: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SendMessageResponse {
  /// Text stored as the assistant message
  pub assistant: String,
  /// Present when the model produced a usable structured reply
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parsed: Option<StructuredReply>,
}

/// Send symptoms and get the assistant's reply
///
/// Both the user message and the reply are stored. Model failures do not fail
/// the request; they are reported in the reply text.
#[utoipa::path(
  post,
  path = "/api/chats/{chat_id}/message",
  params(("chat_id" = i32, Path, description = "Chat id")),
  request_body = SendMessage,
  responses(
    (status = 200, description = "Assistant reply", body = SendMessageResponse),
    (status = 400, description = "Missing or empty `text`, or a malformed chat id"),
    (status = 404, description = "Chat not found")
  )
)]
#[axum::debug_handler]
pub async fn send_message(
  State(state): State<AppState>,
  path: Result<Path<String>, PathRejection>,
  payload: Result<Json<SendMessage>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, AppError> {
  let chat_id = chat_id_from_path(path)?;
  let text = payload
    .ok()
    .and_then(|Json(payload)| payload.text)
    .filter(|text| !text.trim().is_empty())
    .ok_or_else(|| AppError::bad_request("text required"))?;

  Chat::append_message(chat_id, MessageRole::User, &text, &state.db).await?;

  let reply = generate_reply(&state.model, &text).await;
  tracing::debug!(chat_id, structured = reply.parsed.is_some(), "reply generated");

  Chat::append_message(chat_id, MessageRole::Assistant, &reply.content, &state.db).await?;

  Ok(Json(SendMessageResponse {
    assistant: reply.content,
    parsed: reply.parsed,
  }))
}
