use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::extract::extract_balanced_object;
use super::sanitize::sanitize;

pub const MAX_CONDITIONS: usize = 5;
pub const MAX_RECOMMENDATIONS: usize = 6;
/// Characters of unstructured output kept for display.
pub const FALLBACK_CHAR_LIMIT: usize = 1000;
const ELLIPSIS: &str = "...";

/// One entry of `possible_conditions`. Models emit either bare names or
/// `{name, reason}` objects, and not always with string values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Condition {
  Named {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
  },
  Plain(String),
}

/// Keys a model may use for the condition name.
const NAME_KEYS: [&str; 3] = ["name", "condition", "title"];

impl Condition {
  fn from_value(value: Value) -> Self {
    let mut fields = match value {
      Value::Object(fields) => fields,
      other => return Self::Plain(value_text(other).unwrap_or_default()),
    };

    let name = NAME_KEYS
      .iter()
      .find_map(|key| fields.remove(*key).and_then(value_text));

    match name {
      Some(name) => Self::Named {
        name,
        reason: fields.remove("reason").and_then(value_text),
      },
      None => Self::Plain(Value::Object(fields).to_string()),
    }
  }
}

impl<'de> Deserialize<'de> for Condition {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Value::deserialize(deserializer).map(Self::from_value)
  }
}

/// The JSON object the model is asked to produce.
///
/// Every field decodes leniently: a malformed entry degrades to text rather
/// than rejecting the whole reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StructuredReply {
  #[serde(
    default,
    alias = "possibleConditions",
    alias = "probable_conditions",
    deserialize_with = "conditions"
  )]
  pub possible_conditions: Vec<Condition>,
  #[serde(default, deserialize_with = "texts")]
  pub recommendations: Vec<String>,
  #[serde(default, deserialize_with = "text")]
  pub disclaimer: String,
}

/// Strings pass through, `null` is absent, anything else is rendered as JSON.
fn value_text(value: Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(text) => Some(text),
    other => Some(other.to_string()),
  }
}

/// `null` is empty, a lone value is a one-item list, `null` items are skipped.
fn entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::Null => Vec::new(),
    Value::Array(items) => items.into_iter().filter(|item| !item.is_null()).collect(),
    single => vec![single],
  })
}

fn conditions<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Condition>, D::Error> {
  Ok(entries(deserializer)?.into_iter().map(Condition::from_value).collect())
}

fn texts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
  Ok(entries(deserializer)?.into_iter().filter_map(value_text).collect())
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Outcome of reading model output. Absence of structure is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
  Structured {
    reply: StructuredReply,
    /// Canonical re-serialisation of `reply`.
    json: String,
  },
  /// Sanitized text, cut to [`FALLBACK_CHAR_LIMIT`] characters.
  Fallback(String),
}

impl ParsedReply {
  #[must_use]
  pub const fn structured(&self) -> Option<&StructuredReply> {
    match self {
      Self::Structured { reply, .. } => Some(reply),
      Self::Fallback(_) => None,
    }
  }
}

/// Read a [`StructuredReply`] out of raw model output.
///
/// Only the first balanced object is considered. Output without one, or
/// whose first object is not valid JSON, falls back to truncated display text.
#[must_use]
pub fn parse_reply(raw: &str) -> ParsedReply {
  let text = sanitize(raw);

  let parsed = extract_balanced_object(&text).and_then(parse_candidate);

  match parsed {
    Some((reply, json)) => ParsedReply::Structured { reply, json },
    None => ParsedReply::Fallback(truncate_for_display(&text)),
  }
}

fn parse_candidate(candidate: &str) -> Option<(StructuredReply, String)> {
  let mut reply = match serde_json::from_str::<StructuredReply>(candidate) {
    Ok(reply) => reply,
    Err(err) => {
      tracing::debug!(error = %err, "candidate is not valid JSON");
      return None;
    }
  };

  reply.possible_conditions.truncate(MAX_CONDITIONS);
  reply.recommendations.truncate(MAX_RECOMMENDATIONS);

  let json = serde_json::to_string(&reply).ok()?;
  Some((reply, json))
}

pub(crate) fn truncate_for_display(text: &str) -> String {
  match text.char_indices().nth(FALLBACK_CHAR_LIMIT) {
    Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
    None => text.to_owned(),
  }
}
