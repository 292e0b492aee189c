use std::env;
use std::sync::LazyLock;

const DEFAULT_DATABASE_URL: &str = "sqlite://data.db?mode=rwc";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
// Gemini's OpenAI-compatible endpoint
const DEFAULT_OPENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_OPENAI_CHAT_MODEL: &str = "gemini-2.5-flash";

pub struct AppEnv {
  pub database_url: String,
  pub listen_addr: String,
  pub openai_base_url: String,
  /// `None` leaves the language model unconfigured.
  pub openai_api_key: Option<String>,
  pub openai_chat_model: String,
}

impl AppEnv {
  #[must_use]
  pub fn from_env() -> Self {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build from an arbitrary variable source. Blank values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    Self {
      database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
      listen_addr: get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned()),
      openai_base_url: get("OPENAI_BASE_URL")
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_owned()),
      openai_api_key: get("OPENAI_API_KEY").or_else(|| get("GENAI_API_KEY")),
      openai_chat_model: get("OPENAI_CHAT_MODEL")
        .unwrap_or_else(|| DEFAULT_OPENAI_CHAT_MODEL.to_owned()),
    }
  }
}

pub static APP_ENV: LazyLock<AppEnv> = LazyLock::new(AppEnv::from_env);
