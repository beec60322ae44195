use super::storage::SessionStore;
use super::MAX_MESSAGES;
use crate::error::{ChatError, Result};
use crate::models::SessionMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keeps every session in one pretty-printed JSON file.
pub struct FilesystemSessionStore {
    path: PathBuf,
    max_messages: usize,
}

impl FilesystemSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_messages: MAX_MESSAGES,
        }
    }

    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "chats.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FilesystemSessionStore {
    fn load(&self) -> Result<SessionMap> {
        if !self.path.exists() {
            return Ok(SessionMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SessionMap::new());
        }

        serde_json::from_str(&content).map_err(|source| ChatError::StorageCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, sessions: &SessionMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(sessions)?;

        // Write next to the target, then rename over it
        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);
        fs::rename(&tmp_path, &self.path)?;

        log::debug!(
            "saved {} session(s) to {}",
            sessions.len(),
            self.path.display()
        );
        Ok(())
    }

    fn max_messages(&self) -> usize {
        self.max_messages
    }
}
