use anyhow::anyhow;
use async_openai::types::chat::{
  ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
  ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
};
use symptomchat_shared::AppError;

use crate::OpenAiChatModel;

impl OpenAiChatModel {
  /// Single-turn completion of `prompt`, optionally under a system instruction.
  ///
  /// Returns the last non-empty choice content. No timeout or retry is applied.
  pub async fn generate_text(
    &self,
    prompt: &str,
    system_instruction: Option<&str>,
  ) -> Result<String, AppError> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system_instruction {
      messages.push(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessage::from(system),
      ));
    }
    messages.push(ChatCompletionRequestMessage::User(
      ChatCompletionRequestUserMessage::from(prompt.to_owned()),
    ));

    let request = CreateChatCompletionRequestArgs::default()
      .model(&self.model)
      .messages(messages)
      .build()?;

    tracing::debug!(model = %self.model, "requesting chat completion");

    self
      .client
      .chat()
      .create(request)
      .await
      .map(|r| r.choices.into_iter())?
      .filter_map(|c| c.message.content)
      .filter(|content| !content.trim().is_empty())
      .last()
      .ok_or_else(|| anyhow!("empty message content").into())
  }
}
