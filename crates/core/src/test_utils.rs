use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use symptomchat_migration::{Migrator, MigratorTrait};

/// Fresh in-memory database with all migrations applied.
pub async fn test_db() -> DatabaseConnection {
  let mut options = ConnectOptions::new("sqlite::memory:");
  // every pooled connection would otherwise get its own empty database
  options.max_connections(1).sqlx_logging(false);

  let db = Database::connect(options).await.unwrap();
  Migrator::up(&db, None).await.unwrap();
  db
}
