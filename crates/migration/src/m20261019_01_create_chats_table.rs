use sea_orm_migration::{
  prelude::*,
  schema::{pk_auto, string_len, timestamp_with_time_zone},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Chats::Table)
          .if_not_exists()
          .col(pk_auto(Chats::Id))
          .col(string_len(Chats::Title, 200))
          .col(timestamp_with_time_zone(Chats::CreatedAt).default(Expr::current_timestamp()))
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Chats::Table).to_owned())
      .await
  }
}

#[derive(Iden)]
pub enum Chats {
  Table,
  Id,
  Title,
  CreatedAt,
}
