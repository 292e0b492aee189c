use serde::Serialize;
use symptomchat_ai::ChatModel;
use utoipa::ToSchema;

use super::parse::{ParsedReply, StructuredReply, parse_reply, truncate_for_display};
use super::sanitize::sanitize;

pub const SYSTEM_INSTRUCTION: &str = "You are a medical-knowledgeable assistant for educational purposes only. \
Provide possible conditions and recommended next steps given symptoms. \
Always include a clear medical disclaimer and suggest seeking professional care when appropriate.";

/// Shown while no language model is configured.
pub const EXAMPLE_REPLY: &str = r#"{"possible_conditions": [{"name": "Viral upper respiratory infection", "reason": "Common with fever and runny nose"}],"recommendations": ["Rest and hydrate", "OTC pain reliever as needed", "See doctor if severe or persistent"],"disclaimer": "Educational only; not medical advice. Consult a healthcare professional."}"#;

#[must_use]
pub fn build_prompt(symptoms: &str) -> String {
  format!(
    "You are a medical-educational assistant.\n\
     Given the user's symptoms, return a concise JSON object with three keys:\n  \
     - possible_conditions: a list of objects {{name: str, reason: str}} (max 5, very short).\n  \
     - recommendations: a list of short action items (max 6).\n  \
     - disclaimer: a single short educational disclaimer string.\n\
     Do NOT include extra text beyond the JSON. Output must be valid JSON.\n\n\
     Symptoms: {symptoms}\n"
  )
}

/// What gets stored and returned as the assistant's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssistantReply {
  /// Display text: the formatted reply, the raw fallback, or an error notice.
  pub content: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parsed: Option<StructuredReply>,
}

impl AssistantReply {
  #[must_use]
  pub fn from_raw(raw: &str) -> Self {
    match parse_reply(raw) {
      ParsedReply::Structured { reply, json } if reply.has_content() => {
        tracing::debug!(%json, "model returned a structured reply");
        Self {
          content: reply.to_display_text(),
          parsed: Some(reply),
        }
      }
      ParsedReply::Structured { .. } => Self {
        content: truncate_for_display(&sanitize(raw)),
        parsed: None,
      },
      ParsedReply::Fallback(content) => Self {
        content,
        parsed: None,
      },
    }
  }
}

/// Ask the model about `symptoms` and turn whatever comes back into a reply.
///
/// Never fails: model errors become the reply text.
pub async fn generate_reply(model: &ChatModel, symptoms: &str) -> AssistantReply {
  let raw = match model {
    ChatModel::Unconfigured => {
      tracing::debug!("language model not configured, using example reply");
      EXAMPLE_REPLY.to_owned()
    }
    ChatModel::OpenAi(client) => {
      match client
        .generate_text(&build_prompt(symptoms), Some(SYSTEM_INSTRUCTION))
        .await
      {
        Ok(text) => text,
        Err(err) => {
          let err = err.into_inner();
          tracing::warn!(error = %err, "language model call failed");
          return AssistantReply {
            content: format!("Error contacting language model: {err:#}"),
            parsed: None,
          };
        }
      }
    }
  };

  AssistantReply::from_raw(&raw)
}
