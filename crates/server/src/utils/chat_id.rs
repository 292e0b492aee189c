use axum::extract::{Path, rejection::PathRejection};
use symptomchat_shared::AppError;

/// Resolve the `{chat_id}` path segment.
///
/// Digits beyond the id range name a chat that cannot exist, so they are a
/// 404 like any other unknown id. Anything else is a 400.
pub fn chat_id_from_path(path: Result<Path<String>, PathRejection>) -> Result<i32, AppError> {
  let Path(raw) = path.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

  match raw.parse::<i32>() {
    Ok(id) => Ok(id),
    Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
      Err(AppError::not_found(format!("chat {raw} not found")))
    }
    Err(_) => Err(AppError::bad_request(format!("invalid chat id `{raw}`"))),
  }
}
