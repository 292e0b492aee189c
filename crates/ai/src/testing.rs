//! In-process stand-ins for an OpenAI-compatible endpoint.
//!
//! # Panics
//!
//! The helpers panic if the loopback listener cannot be bound.

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{ChatModel, OpenAiChatModel};

async fn serve(app: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0")
    .await
    .expect("failed to bind stub listener");
  let addr = listener
    .local_addr()
    .expect("stub listener has no local address");
  tokio::spawn(async move {
    let _ = axum::serve(listener, app).await;
  });
  format!("http://{addr}")
}

/// Chat completions endpoint that always answers with `content`.
/// Returns the base URL to configure the client with.
pub async fn spawn_completion_stub(content: impl Into<String>) -> String {
  let content = content.into();
  let app = Router::new().route(
    "/chat/completions",
    post(move || {
      let content = content.clone();
      async move {
        Json(json!({
          "id": "chatcmpl-stub",
          "object": "chat.completion",
          "created": 1_760_000_000,
          "model": "stub-model",
          "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
          }]
        }))
      }
    }),
  );
  serve(app).await
}

/// Chat completions endpoint that rejects every API key.
pub async fn spawn_rejecting_stub() -> String {
  let app = Router::new().route(
    "/chat/completions",
    post(|| async {
      (
        StatusCode::UNAUTHORIZED,
        Json(json!({
          "error": {
            "message": "Incorrect API key provided",
            "type": "invalid_request_error",
            "param": null,
            "code": "invalid_api_key"
          }
        })),
      )
    }),
  );
  serve(app).await
}

/// A configured model pointed at `base_url`.
#[must_use]
pub fn stub_model(base_url: &str) -> ChatModel {
  ChatModel::OpenAi(OpenAiChatModel::new(base_url, "sk-test", "stub-model"))
}
