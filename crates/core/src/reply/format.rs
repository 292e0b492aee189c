use std::fmt::Write;

use super::parse::{Condition, StructuredReply};

impl Condition {
  fn bullet(&self) -> String {
    match self {
      Self::Plain(text) => format!("- {text}"),
      Self::Named { name, reason } => match reason.as_deref().map(str::trim) {
        Some(reason) if !reason.is_empty() => format!("- {name}: {reason}"),
        _ => format!("- {name}"),
      },
    }
  }
}

impl StructuredReply {
  /// Whether any section would be rendered.
  #[must_use]
  pub fn has_content(&self) -> bool {
    !self.possible_conditions.is_empty()
      || !self.recommendations.is_empty()
      || !self.disclaimer.trim().is_empty()
  }

  /// Render as plain text for the chat log. Empty sections are omitted.
  #[must_use]
  pub fn to_display_text(&self) -> String {
    let mut sections = Vec::with_capacity(3);

    if !self.possible_conditions.is_empty() {
      let mut out = String::from("Possible conditions:");
      for condition in &self.possible_conditions {
        let _ = write!(out, "\n{}", condition.bullet());
      }
      sections.push(out);
    }

    if !self.recommendations.is_empty() {
      let mut out = String::from("Recommended next steps:");
      for recommendation in &self.recommendations {
        let _ = write!(out, "\n- {recommendation}");
      }
      sections.push(out);
    }

    let disclaimer = self.disclaimer.trim();
    if !disclaimer.is_empty() {
      sections.push(format!("Disclaimer: {disclaimer}"));
    }

    sections.join("\n\n").trim().to_owned()
  }
}
