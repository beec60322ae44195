mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use crate::error::{ChatError, Result as ChatResult};
use crate::models::registry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use api::{normalize_endpoint, ApiConfig};
pub use defaults::{
    default_chats_file, default_max_file_chars, default_max_messages, DEFAULT_API_ENDPOINT,
};
pub use validation::expand_env_var_in_string;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub chats_file: Option<String>,
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            chats_file: None,
            max_messages: default_max_messages(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttachmentsConfig {
    #[serde(default = "default_max_file_chars")]
    pub max_file_chars: usize,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_file_chars: default_max_file_chars(),
        }
    }
}

/// On-disk configuration, YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub attachments: AttachmentsConfig,
}

pub struct Config {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub model_label: String,
    pub model_id: String,
    pub system_prompt: Option<String>,
    pub chats_file: PathBuf,
    pub max_messages: usize,
    pub max_file_chars: usize,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> ChatResult<Self> {
        let file_config = FileConfig::load()?;
        Self::resolve(args, file_config, |name| env::var(name).ok())
    }

    /// Merge CLI args > environment > config file > defaults.
    pub fn resolve(
        args: &Args,
        file_config: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> ChatResult<Self> {
        let expand = |value: String| expand_env_var_in_string(&value, &env);

        // Only ever read from the environment
        let api_key = env("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty());

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env("DEEPCHAT_API_ENDPOINT"))
            .or_else(|| file_config.api.endpoint.clone().map(&expand))
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model_label = args
            .model
            .clone()
            .or_else(|| env("DEEPCHAT_MODEL"))
            .or(file_config.model.default_model.clone())
            .unwrap_or_else(|| registry::DEFAULT_MODEL_LABEL.to_string());
        let model_id = registry::resolve(&model_label)?.to_string();

        let system_prompt = env("DEEPCHAT_SYSTEM_PROMPT")
            .or_else(|| file_config.model.system_prompt.clone().map(&expand));

        let chats_file = args
            .chats_file
            .clone()
            .or_else(|| env("DEEPCHAT_CHATS_FILE").map(PathBuf::from))
            .or_else(|| file_config.storage.chats_file.clone().map(&expand).map(PathBuf::from))
            .unwrap_or_else(default_chats_file);

        if file_config.storage.max_messages == 0 {
            return Err(ChatError::ConfigError(
                "storage.max_messages must be at least 1".to_string(),
            ));
        }

        let verbose = args.verbose
            || env("DEEPCHAT_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        Ok(Config {
            api_key,
            api_endpoint,
            model_label,
            model_id,
            system_prompt,
            chats_file,
            max_messages: file_config.storage.max_messages,
            max_file_chars: file_config.attachments.max_file_chars,
            verbose,
        })
    }

    pub fn require_api_key(&self) -> ChatResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ChatError::ConfigError("OPENROUTER_API_KEY environment variable not set".to_string())
        })
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                return Self::parse(&path, &contents);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn parse(path: &std::path::Path, contents: &str) -> Result<Self> {
        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        if is_yaml {
            serde_yaml::from_str(contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))
        } else {
            serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))
        }
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory overrides the global config
            PathBuf::from(".deepchat.yaml"),
            PathBuf::from(".deepchat.yml"),
            PathBuf::from(".deepchat.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("deepchat");
            paths.push(config_dir.join("deepchat.yaml"));
            paths.push(config_dir.join("deepchat.yml"));
            paths.push(config_dir.join("deepchat.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let config = Config::resolve(&Args::default(), FileConfig::default(), env_from(&[])).unwrap();
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.model_label, registry::DEFAULT_MODEL_LABEL);
        assert_eq!(config.model_id, "nex-agi/deepseek-v3.1-nex-n1:free");
        assert_eq!(config.max_messages, 1000);
        assert_eq!(config.max_file_chars, 12_000);
        assert!(config.api_key.is_none());
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn args_beat_env_and_env_beats_file() {
        let mut file_config = FileConfig::default();
        file_config.model.default_model = Some("GLM 4.5 Air".to_string());
        file_config.api.endpoint = Some("http://file-host/v1".to_string());

        let env = env_from(&[
            ("DEEPCHAT_MODEL", "Qwen3 Coder"),
            ("DEEPCHAT_API_ENDPOINT", "http://env-host/v1"),
            ("OPENROUTER_API_KEY", "sk-test"),
        ]);
        let args = Args {
            api_endpoint: Some("http://arg-host".to_string()),
            ..Args::default()
        };

        let config = Config::resolve(&args, file_config, env).unwrap();
        assert_eq!(config.api_endpoint, "http://arg-host/v1/chat/completions");
        assert_eq!(config.model_id, "qwen/qwen3-coder:free");
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn file_paths_expand_env_vars() {
        let mut file_config = FileConfig::default();
        file_config.storage.chats_file = Some("${DATA}/chats.json".to_string());
        let env = env_from(&[("DATA", "/srv/chat")]);

        let config = Config::resolve(&Args::default(), file_config, env).unwrap();
        assert_eq!(config.chats_file, PathBuf::from("/srv/chat/chats.json"));
    }

    #[test]
    fn unknown_model_is_config_error() {
        let args = Args {
            model: Some("Nonexistent".to_string()),
            ..Args::default()
        };
        let result = Config::resolve(&args, FileConfig::default(), env_from(&[]));
        assert!(matches!(result, Err(ChatError::ConfigError(_))));
    }

    #[test]
    fn parses_yaml_config() {
        let yaml = "model:\n  default_model: Olmo 32B Think\nstorage:\n  max_messages: 50\n";
        let config = FileConfig::parse(Path::new("deepchat.yaml"), yaml).unwrap();
        assert_eq!(config.model.default_model.as_deref(), Some("Olmo 32B Think"));
        assert_eq!(config.storage.max_messages, 50);
        assert_eq!(config.attachments.max_file_chars, 12_000);
    }
}
