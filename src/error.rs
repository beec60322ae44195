use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ChatError {
    /// Persisted chat history exists but could not be parsed.
    StorageCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// An attachment could not be read from disk.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The endpoint answered with a non-success status or a body without
    /// the expected shape.
    ResponseFormat(String),
    Cancelled,
    ConfigError(String),
    SessionError(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl ChatError {
    /// True for failures raised after the request left the process.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ChatError::Transport(_) | ChatError::ResponseFormat(_)
        )
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::StorageCorrupt { path, source } => {
                write!(f, "Chat storage {} is corrupt: {}", path.display(), source)
            }
            ChatError::FileRead { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ChatError::Transport(e) => write!(f, "Network error: {}", e),
            ChatError::ResponseFormat(msg) => write!(f, "Unexpected response: {}", msg),
            ChatError::Cancelled => write!(f, "Request cancelled"),
            ChatError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ChatError::SessionError(msg) => write!(f, "Session error: {}", msg),
            ChatError::IoError(e) => write!(f, "IO error: {}", e),
            ChatError::JsonError(e) => write!(f, "JSON error: {}", e),
            ChatError::YamlError(e) => write!(f, "YAML error: {}", e),
            ChatError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::StorageCorrupt { source, .. } => Some(source),
            ChatError::FileRead { source, .. } => Some(source),
            ChatError::Transport(e) => Some(e),
            ChatError::IoError(e) => Some(e),
            ChatError::JsonError(e) => Some(e),
            ChatError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err)
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::IoError(err)
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for ChatError {
    fn from(err: serde_yaml::Error) -> Self {
        ChatError::YamlError(err)
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Other(format!("{:#}", err))
    }
}

impl From<String> for ChatError {
    fn from(msg: String) -> Self {
        ChatError::Other(msg)
    }
}

impl From<&str> for ChatError {
    fn from(msg: &str) -> Self {
        ChatError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
