use std::path::PathBuf;

pub const DEFAULT_API_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

pub fn default_max_messages() -> usize {
    crate::session::MAX_MESSAGES
}

pub fn default_max_file_chars() -> usize {
    crate::attachment::DEFAULT_MAX_FILE_CHARS
}

/// `<data dir>/deepchat/chats.json`, or `chats.json` in the working
/// directory when the platform has no data dir.
pub fn default_chats_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("deepchat").join("chats.json"))
        .unwrap_or_else(|| PathBuf::from("chats.json"))
}
