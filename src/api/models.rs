use crate::models::Message;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct RequestBody<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
}

#[derive(Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
