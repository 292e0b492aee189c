mod chat_model;
pub use chat_model::{ChatModel, OpenAiChatModel};

mod generate_text;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
