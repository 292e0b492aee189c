pub use sea_orm_migration::*;

mod m20261019_01_create_chats_table;
mod m20261019_02_create_messages_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20261019_01_create_chats_table::Migration),
      Box::new(m20261019_02_create_messages_table::Migration),
    ]
  }
}
