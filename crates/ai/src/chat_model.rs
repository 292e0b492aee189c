use async_openai::{Client, config::OpenAIConfig};
use symptomchat_shared::AppEnv;

/// The language model replies are generated with.
///
/// Passed explicitly to whoever needs it; a missing API key is a normal
/// configuration state rather than a failure.
#[derive(Clone, Debug)]
pub enum ChatModel {
  OpenAi(OpenAiChatModel),
  /// No API key configured. Callers substitute a canned reply.
  Unconfigured,
}

impl ChatModel {
  #[must_use]
  pub fn from_env(env: &AppEnv) -> Self {
    env
      .openai_api_key
      .as_deref()
      .map_or(Self::Unconfigured, |api_key| {
        Self::OpenAi(OpenAiChatModel::new(
          &env.openai_base_url,
          api_key,
          &env.openai_chat_model,
        ))
      })
  }

  #[must_use]
  pub const fn is_configured(&self) -> bool {
    matches!(self, Self::OpenAi(_))
  }
}

/// Client for any OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiChatModel {
  pub(crate) client: Client<OpenAIConfig>,
  pub(crate) model: String,
}

impl OpenAiChatModel {
  #[must_use]
  pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
    let config = OpenAIConfig::new()
      .with_api_key(api_key)
      .with_api_base(base_url);

    Self {
      client: Client::with_config(config),
      model: model.to_owned(),
    }
  }

  #[must_use]
  pub fn model(&self) -> &str {
    &self.model
  }
}
