use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Author class of a stored message.
#[derive(
  Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageRole {
  User,
  Assistant,
  System,
}
