const FENCE: &str = "```";

/// Trim surrounding whitespace and unwrap a markdown code fence.
///
/// A fenced block must span at least three lines; its first line (the opening
/// fence, possibly with a language tag) and last line are dropped.
#[must_use]
pub fn sanitize(raw: &str) -> String {
  let trimmed = raw.trim();

  if trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE) {
    let lines = trimmed.lines().collect::<Vec<_>>();
    if lines.len() >= 3 {
      return lines[1..lines.len() - 1].join("\n").trim().to_owned();
    }
  }

  trimmed.to_owned()
}
