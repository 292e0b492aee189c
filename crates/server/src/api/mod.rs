use axum::{
  Json, Router,
  routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::utils::AppState;

mod create_chat;
mod delete_chat;
mod get_chat;
mod list_chats;
mod send_message;

pub use create_chat::CreateChat;
pub use send_message::{SendMessage, SendMessageResponse};

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Symptom Chat API",
    version = "0.0.1",
    description = "Describe symptoms, get an educational LLM reply, keep the conversation"
  ),
  paths(
    create_chat::create_chat,
    list_chats::list_chats,
    get_chat::get_chat,
    send_message::send_message,
    delete_chat::delete_chat,
    delete_chat::clear_chats,
  ),
  components(schemas(
    CreateChat,
    SendMessage,
    SendMessageResponse,
    symptomchat_core::Chat,
    symptomchat_core::ChatMessage,
    symptomchat_core::ChatWithMessages,
    symptomchat_core::ClearedHistory,
    symptomchat_core::StructuredReply,
    symptomchat_core::Condition,
    symptomchat_shared::MessageRole,
  ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

pub fn app() -> Router<AppState> {
  Router::new()
    .route(
      "/api/chats",
      post(create_chat::create_chat)
        .get(list_chats::list_chats)
        .delete(delete_chat::clear_chats),
    )
    .route(
      "/api/chats/{chat_id}",
      get(get_chat::get_chat).delete(delete_chat::delete_chat),
    )
    .route(
      "/api/chats/{chat_id}/message",
      post(send_message::send_message),
    )
    .route("/openapi.json", get(openapi_json))
    .merge(Scalar::with_url("/openapi/", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
  use axum::http::StatusCode;
  use serde_json::{Value, json};
  use symptomchat_ai::{
    ChatModel,
    testing::{spawn_completion_stub, spawn_rejecting_stub, stub_model},
  };
  use tower::ServiceExt;

  use crate::router;
  use crate::test_utils::{body_json, make_request, test_state};
  use crate::utils::AppState;

  async fn create_chat(state: &AppState, title: Option<&str>) -> i64 {
    let body = title.map(|title| json!({ "title": title }));
    let response = router(state.clone())
      .oneshot(make_request("POST", "/api/chats", body.as_ref()))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
  }

  async fn send(state: &AppState, chat_id: i64, body: Option<&Value>) -> (StatusCode, Value) {
    send_raw(state, &chat_id.to_string(), body).await
  }

  async fn send_raw(state: &AppState, chat_id: &str, body: Option<&Value>) -> (StatusCode, Value) {
    let uri = format!("/api/chats/{chat_id}/message");
    let response = router(state.clone())
      .oneshot(make_request("POST", &uri, body))
      .await
      .unwrap();
    let status = response.status();
    (status, body_json(response).await)
  }

  async fn messages_of(state: &AppState, chat_id: i64) -> Vec<Value> {
    let response = router(state.clone())
      .oneshot(make_request("GET", &format!("/api/chats/{chat_id}"), None))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["messages"]
      .as_array()
      .cloned()
      .unwrap()
  }

  #[tokio::test]
  async fn create_list_and_fetch_chats() {
    let state = test_state(ChatModel::Unconfigured).await;
    let untitled = create_chat(&state, None).await;
    let titled = create_chat(&state, Some("Sore throat")).await;

    let response = router(state.clone())
      .oneshot(make_request("GET", "/api/chats", None))
      .await
      .unwrap();
    let chats = body_json(response).await;
    let titles = chats
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["title"].as_str().unwrap().to_owned())
      .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Sore throat", "New Symptom Check"]);

    let response = router(state.clone())
      .oneshot(make_request("GET", &format!("/api/chats/{untitled}"), None))
      .await
      .unwrap();
    let chat = body_json(response).await;
    assert_eq!(chat["id"].as_i64(), Some(untitled));
    assert_eq!(chat["messages"], json!([]));
    assert_ne!(untitled, titled);
  }

  #[tokio::test]
  async fn unknown_chat_is_404_with_json_error() {
    let state = test_state(ChatModel::Unconfigured).await;

    let response = router(state)
      .oneshot(make_request("GET", "/api/chats/999", None))
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "chat 999 not found");
  }

  #[tokio::test]
  async fn malformed_chat_ids_get_json_errors() {
    let state = test_state(ChatModel::Unconfigured).await;

    let response = router(state.clone())
      .oneshot(make_request("GET", "/api/chats/abc", None))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid chat id `abc`");

    let response = router(state.clone())
      .oneshot(make_request("DELETE", "/api/chats/abc", None))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    let response = router(state.clone())
      .oneshot(make_request("GET", "/api/chats/99999999999", None))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "chat 99999999999 not found");

    let (status, body) = send_raw(&state, "abc", Some(&json!({ "text": "fever" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn message_without_text_is_bad_request() {
    let state = test_state(ChatModel::Unconfigured).await;
    let chat_id = create_chat(&state, None).await;

    let (status, body) = send(&state, chat_id, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "text required");

    let (status, _) = send(&state, chat_id, Some(&json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&state, chat_id, Some(&json!({ "text": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(messages_of(&state, chat_id).await.is_empty());
  }

  #[tokio::test]
  async fn message_to_unknown_chat_is_not_found() {
    let state = test_state(ChatModel::Unconfigured).await;

    let (status, _) = send(&state, 5, Some(&json!({ "text": "fever" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn unconfigured_model_replies_with_example() {
    let state = test_state(ChatModel::Unconfigured).await;
    let chat_id = create_chat(&state, None).await;

    let (status, body) = send(&state, chat_id, Some(&json!({ "text": "fever, runny nose" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      body["parsed"]["possible_conditions"][0]["name"],
      "Viral upper respiratory infection"
    );
    let assistant = body["assistant"].as_str().unwrap();
    assert!(assistant.starts_with("Possible conditions:"));

    let messages = messages_of(&state, chat_id).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "fever, runny nose");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], assistant);
  }

  #[tokio::test]
  async fn fenced_model_reply_is_formatted_and_stored() {
    let base_url = spawn_completion_stub(
      "```json\n{\"possible_conditions\":[{\"name\":\"Flu\",\"reason\":\"Fever\"}],\"recommendations\":[\"Rest\"],\"disclaimer\":\"Not medical advice\"}\n```",
    )
    .await;
    let state = test_state(stub_model(&base_url)).await;
    let chat_id = create_chat(&state, None).await;

    let (status, body) = send(&state, chat_id, Some(&json!({ "text": "fever" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      body["assistant"],
      "Possible conditions:\n- Flu: Fever\n\nRecommended next steps:\n- Rest\n\nDisclaimer: Not medical advice"
    );
    assert_eq!(body["parsed"]["recommendations"], json!(["Rest"]));
  }

  #[tokio::test]
  async fn model_failure_is_reported_inline() {
    let base_url = spawn_rejecting_stub().await;
    let state = test_state(stub_model(&base_url)).await;
    let chat_id = create_chat(&state, None).await;

    let (status, body) = send(&state, chat_id, Some(&json!({ "text": "cough" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
      body["assistant"]
        .as_str()
        .unwrap()
        .starts_with("Error contacting language model:")
    );
    assert!(body.get("parsed").is_none());
    assert_eq!(messages_of(&state, chat_id).await.len(), 2);
  }

  #[tokio::test]
  async fn delete_and_clear_history() {
    let state = test_state(ChatModel::Unconfigured).await;
    let first = create_chat(&state, None).await;
    let second = create_chat(&state, None).await;
    send(&state, first, Some(&json!({ "text": "a" }))).await;
    send(&state, second, Some(&json!({ "text": "b" }))).await;

    let response = router(state.clone())
      .oneshot(make_request("DELETE", &format!("/api/chats/{first}"), None))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router(state.clone())
      .oneshot(make_request("DELETE", &format!("/api/chats/{first}"), None))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router(state.clone())
      .oneshot(make_request("DELETE", "/api/chats", None))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
      body_json(response).await,
      json!({ "deleted_chats": 1, "deleted_messages": 2 })
    );

    let response = router(state)
      .oneshot(make_request("GET", "/api/chats", None))
      .await
      .unwrap();
    assert_eq!(body_json(response).await, json!([]));
  }

  #[tokio::test]
  async fn serves_openapi_document() {
    let state = test_state(ChatModel::Unconfigured).await;

    let response = router(state)
      .oneshot(make_request("GET", "/openapi.json", None))
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"].get("/api/chats/{chat_id}/message").is_some());
  }
}
