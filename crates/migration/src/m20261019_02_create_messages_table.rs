use sea_orm_migration::{
  prelude::*,
  schema::{integer, pk_auto, string_len, text, timestamp_with_time_zone},
};

use crate::m20261019_01_create_chats_table::Chats;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Messages::Table)
          .if_not_exists()
          .col(pk_auto(Messages::Id))
          .col(integer(Messages::ChatId))
          .col(string_len(Messages::Role, 50))
          .col(text(Messages::Content))
          .col(timestamp_with_time_zone(Messages::CreatedAt).default(Expr::current_timestamp()))
          .foreign_key(
            ForeignKey::create()
              .name("fk_messages_chat_id")
              .from(Messages::Table, Messages::ChatId)
              .to(Chats::Table, Chats::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // conversation history is always read per chat
    manager
      .create_index(
        Index::create()
          .name("idx_messages_chat_id")
          .table(Messages::Table)
          .col(Messages::ChatId)
          .if_not_exists()
          .to_owned(),
      )
      .await?;

    Ok(())
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Messages::Table).to_owned())
      .await?;

    Ok(())
  }
}

#[derive(Iden)]
pub enum Messages {
  Table,
  Id,
  ChatId,
  // user / assistant / system
  Role,
  Content,
  CreatedAt,
}
