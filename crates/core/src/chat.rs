use std::str::FromStr;

use chrono::{DateTime, Utc};
use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
  EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use symptomchat_entities::{chat, message};
use symptomchat_shared::{AppError, MessageRole};
use utoipa::ToSchema;

pub const DEFAULT_CHAT_TITLE: &str = "New Symptom Check";
const MAX_TITLE_CHARS: usize = 200;

// ──────────────────────────────────────────────────
// Domain model
// ──────────────────────────────────────────────────

/// A titled conversation.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Chat {
  pub id: i32,
  pub title: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq, ToSchema)]
pub struct ChatMessage {
  pub id: i32,
  #[serde(skip)]
  pub chat_id: i32,
  pub role: MessageRole,
  pub content: String,
  pub created_at: DateTime<Utc>,
}

/// A chat with its full message log, oldest first.
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct ChatWithMessages {
  #[serde(flatten)]
  pub chat: Chat,
  pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct ClearedHistory {
  pub deleted_chats: u64,
  pub deleted_messages: u64,
}

impl ChatMessage {
  pub fn from_model(model: message::Model) -> Result<Self, AppError> {
    Ok(Self {
      id: model.id,
      chat_id: model.chat_id,
      role: MessageRole::from_str(&model.role)?,
      content: model.content,
      created_at: model.created_at.with_timezone(&Utc),
    })
  }
}

// ──────────────────────────────────────────────────
// Store
// ──────────────────────────────────────────────────

impl Chat {
  #[must_use]
  pub fn from_model(model: chat::Model) -> Self {
    Self {
      id: model.id,
      title: model.title,
      created_at: model.created_at.with_timezone(&Utc),
    }
  }

  /// Create a chat. A blank or missing title gets [`DEFAULT_CHAT_TITLE`].
  pub async fn create(title: Option<&str>, db: &DatabaseConnection) -> Result<Self, AppError> {
    let title = title
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map_or_else(
        || DEFAULT_CHAT_TITLE.to_owned(),
        |t| t.chars().take(MAX_TITLE_CHARS).collect(),
      );

    let model = chat::ActiveModel {
      title: Set(title),
      created_at: Set(Utc::now().into()),
      ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::debug!(chat_id = model.id, "chat created");

    Ok(Self::from_model(model))
  }

  /// All chats, newest first.
  pub async fn list(db: &DatabaseConnection) -> Result<Vec<Self>, AppError> {
    let models = chat::Entity::find()
      .order_by_desc(chat::Column::CreatedAt)
      .order_by_desc(chat::Column::Id)
      .all(db)
      .await?;

    Ok(models.into_iter().map(Self::from_model).collect())
  }

  /// One chat with its messages in conversation order.
  pub async fn get(id: i32, db: &DatabaseConnection) -> Result<ChatWithMessages, AppError> {
    let chat = Self::find(id, db).await?;

    let messages = message::Entity::find()
      .filter(message::Column::ChatId.eq(id))
      .order_by_asc(message::Column::CreatedAt)
      .order_by_asc(message::Column::Id)
      .all(db)
      .await?
      .into_iter()
      .map(ChatMessage::from_model)
      .collect::<Result<Vec<_>, _>>()?;

    Ok(ChatWithMessages { chat, messages })
  }

  /// Append one message and commit it before returning.
  ///
  /// Fails with 404 for an unknown chat, writing nothing. A chat's first
  /// message must come from the user. The checks and the insert share one
  /// transaction that holds the chat row lock where the backend has one.
  pub async fn append_message(
    id: i32,
    role: MessageRole,
    content: &str,
    db: &DatabaseConnection,
  ) -> Result<ChatMessage, AppError> {
    let txn = db.begin().await?;

    chat::Entity::find_by_id(id)
      .lock_exclusive()
      .one(&txn)
      .await?
      .ok_or_else(|| AppError::not_found(format!("chat {id} not found")))?;

    if role != MessageRole::User && Self::message_count(id, &txn).await? == 0 {
      return Err(AppError::bad_request(format!(
        "chat {id} must start with a user message"
      )));
    }

    let model = message::ActiveModel {
      chat_id: Set(id),
      role: Set(role.to_string()),
      content: Set(content.to_owned()),
      created_at: Set(Utc::now().into()),
      ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::debug!(chat_id = id, message_id = model.id, %role, "message appended");

    ChatMessage::from_model(model)
  }

  /// Delete one chat together with its messages.
  pub async fn delete(id: i32, db: &DatabaseConnection) -> Result<(), AppError> {
    let txn = db.begin().await?;

    message::Entity::delete_many()
      .filter(message::Column::ChatId.eq(id))
      .exec(&txn)
      .await?;
    let res = chat::Entity::delete_by_id(id).exec(&txn).await?;

    if res.rows_affected == 0 {
      txn.rollback().await?;
      return Err(AppError::not_found(format!("chat {id} not found")));
    }

    txn.commit().await?;
    tracing::info!(chat_id = id, "chat deleted");

    Ok(())
  }

  /// Remove every chat and message. All or nothing.
  pub async fn clear_all(db: &DatabaseConnection) -> Result<ClearedHistory, AppError> {
    let txn = db.begin().await?;

    match Self::delete_everything(&txn).await {
      Ok(cleared) => {
        txn.commit().await?;
        tracing::info!(
          deleted_chats = cleared.deleted_chats,
          deleted_messages = cleared.deleted_messages,
          "history cleared"
        );
        Ok(cleared)
      }
      Err(err) => {
        tracing::error!(error = %err, "clearing history failed, rolling back");
        txn.rollback().await?;
        Err(AppError::new(err))
      }
    }
  }

  async fn delete_everything(txn: &DatabaseTransaction) -> Result<ClearedHistory, DbErr> {
    let deleted_messages = message::Entity::delete_many().exec(txn).await?.rows_affected;
    let deleted_chats = chat::Entity::delete_many().exec(txn).await?.rows_affected;

    Ok(ClearedHistory {
      deleted_chats,
      deleted_messages,
    })
  }

  async fn find(id: i32, db: &DatabaseConnection) -> Result<Self, AppError> {
    chat::Entity::find_by_id(id)
      .one(db)
      .await?
      .map(Self::from_model)
      .ok_or_else(|| AppError::not_found(format!("chat {id} not found")))
  }

  async fn message_count<C: ConnectionTrait>(id: i32, db: &C) -> Result<u64, AppError> {
    Ok(
      message::Entity::find()
        .filter(message::Column::ChatId.eq(id))
        .count(db)
        .await?,
    )
  }
}
