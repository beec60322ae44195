use super::models::ErrorResponse;
use crate::error::{ChatError, Result};
use serde_json::Value;

/// Extract `choices[0].message.content` from a completion response.
///
/// Any deviation from that shape is an error; an absent or non-string
/// content is never coerced to an empty reply.
pub fn extract_reply(response_json: &Value) -> Result<String> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| ChatError::ResponseFormat("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| ChatError::ResponseFormat("Empty choices array".to_string()))?;

    let message = first_choice
        .get("message")
        .ok_or_else(|| ChatError::ResponseFormat("No message in response".to_string()))?;

    message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ChatError::ResponseFormat("No text content in message".to_string()))
}

/// Best-effort message from an error body: the provider's `error.message`
/// when present, the raw body otherwise.
pub fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(wrapper) => wrapper.error.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
