//! Turning free-form model output into something displayable.
//!
//! The pipeline is sanitize, extract, parse, then format. Each step is pure;
//! [`generate_reply`] wires it to the language model.

mod extract;
pub use extract::extract_balanced_object;

mod format;

mod generate;
pub use generate::{
  AssistantReply, EXAMPLE_REPLY, SYSTEM_INSTRUCTION, build_prompt, generate_reply,
};

mod parse;
pub use parse::{
  Condition, FALLBACK_CHAR_LIMIT, MAX_CONDITIONS, MAX_RECOMMENDATIONS, ParsedReply,
  StructuredReply, parse_reply,
};

mod sanitize;
pub use sanitize::sanitize;
