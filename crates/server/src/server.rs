use axum::{Router, response::Html, routing::get};
use symptomchat_shared::AppError;
use tokio::net::TcpListener;

use crate::{
  api,
  utils::{AppState, shutdown_signal},
};

#[axum::debug_handler]
async fn handler() -> Html<&'static str> {
  Html(
    "<h1>Symptom Chat</h1>\
     <p>Educational only; not medical advice.</p>\
     <p>API reference: <a href=\"/openapi/\">/openapi/</a></p>",
  )
}

pub fn router(app_state: AppState) -> Router {
  Router::new()
    .route("/", get(handler))
    .merge(api::app())
    .with_state(app_state)
}

pub async fn server(app_state: AppState, listen_addr: &str) -> Result<(), AppError> {
  if !app_state.model.is_configured() {
    tracing::warn!("no language model API key set, replies will use a canned example");
  }

  let listener = TcpListener::bind(listen_addr).await?;

  tracing::info!("server started at http://{listen_addr}");

  axum::serve(listener, router(app_state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}
