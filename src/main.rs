use sea_orm::Database;
use symptomchat_ai::ChatModel;
use symptomchat_migration::{Migrator, MigratorTrait};
use symptomchat_server::{server, utils::AppState};
use symptomchat_shared::{APP_ENV, AppError};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .with(ErrorLayer::default())
    .init();

  let db = Database::connect(APP_ENV.database_url.as_str()).await?;

  // Apply all pending migrations
  // https://www.sea-ql.org/SeaORM/docs/migration/running-migration/#migrating-programmatically
  Migrator::up(&db, None).await?;
  tracing::info!("database schema is up to date");

  let model = ChatModel::from_env(&APP_ENV);

  server(AppState::new(db, model), &APP_ENV.listen_addr).await
}
