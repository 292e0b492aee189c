use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub chat_id: i32,
  // user / assistant / system
  #[sea_orm(column_type = "String(StringLen::N(50))")]
  pub role: String,
  #[sea_orm(column_type = "Text")]
  pub content: String,
  pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::chat::Entity",
    from = "Column::ChatId",
    to = "super::chat::Column::Id",
    on_delete = "Cascade"
  )]
  Chat,
}

impl Related<super::chat::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Chat.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
