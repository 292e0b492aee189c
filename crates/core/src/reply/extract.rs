/// Return the first balanced `{...}` object in `text`.
///
/// Scanning starts at the first `{`. Braces inside string literals are not
/// counted, and a backslash inside a string escapes the next character.
/// Returns `None` if there is no `{` or the object never closes.
#[must_use]
pub fn extract_balanced_object(text: &str) -> Option<&str> {
  let start = text.find('{')?;

  let mut depth = 0_usize;
  let mut in_string = false;
  let mut escaped = false;

  for (offset, ch) in text[start..].char_indices() {
    if in_string {
      if escaped {
        escaped = false;
      } else if ch == '\\' {
        escaped = true;
      } else if ch == '"' {
        in_string = false;
      }
      continue;
    }

    match ch {
      '"' => in_string = true,
      '{' => depth += 1,
      '}' => {
        // depth >= 1 here: the scan opened on '{'
        depth -= 1;
        if depth == 0 {
          return Some(&text[start..=start + offset]);
        }
      }
      _ => {}
    }
  }

  None
}
