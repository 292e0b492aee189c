mod chat;
pub use chat::{Chat, ChatMessage, ChatWithMessages, ClearedHistory, DEFAULT_CHAT_TITLE};

pub mod reply;
pub use reply::{AssistantReply, Condition, ParsedReply, StructuredReply, generate_reply};

#[cfg(test)]
mod test_utils;
