use axum::{
  body::Body,
  http::{Request, Response, header},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use symptomchat_ai::ChatModel;
use symptomchat_migration::{Migrator, MigratorTrait};

use crate::utils::AppState;

pub async fn test_state(model: ChatModel) -> AppState {
  let mut options = ConnectOptions::new("sqlite::memory:");
  options.max_connections(1).sqlx_logging(false);

  let db = Database::connect(options).await.unwrap();
  Migrator::up(&db, None).await.unwrap();
  AppState::new(db, model)
}

pub fn make_request(method: &str, uri: &str, body: Option<&Value>) -> Request<Body> {
  let builder = Request::builder().method(method).uri(uri);

  match body {
    Some(json) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  }
}

pub async fn body_json(response: Response<Body>) -> Value {
  let bytes = response.into_body().collect().await.unwrap().to_bytes();
  serde_json::from_slice(&bytes).unwrap()
}
