use sea_orm::DatabaseConnection;
use symptomchat_ai::ChatModel;

#[derive(Clone)]
pub struct AppState {
  pub db: DatabaseConnection,
  pub model: ChatModel,
}

impl AppState {
  #[must_use]
  pub const fn new(db: DatabaseConnection, model: ChatModel) -> Self {
    Self { db, model }
  }
}
