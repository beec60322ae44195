mod filesystem;
mod storage;

pub use filesystem::FilesystemSessionStore;
pub use storage::SessionStore;

use crate::models::Message;
use uuid::Uuid;

pub const MAX_MESSAGES: usize = 1000;

/// Drop the oldest messages so at most `max` remain. Returns how many were dropped.
pub fn trim_history(messages: &mut Vec<Message>, max: usize) -> usize {
    if messages.len() <= max {
        return 0;
    }
    let excess = messages.len() - max;
    messages.drain(..excess);
    excess
}

/// Generate a fresh session id
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
