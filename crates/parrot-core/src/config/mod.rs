mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::ParrotError;
use crate::language::LanguageTag;
use defaults::*;

/// Top-level Parrot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parrot: ParrotConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParrotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write a daily rolling log under `{data_dir}/logs/`.
    #[serde(default)]
    pub log_file: bool,
}

impl Default for ParrotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_file: false,
        }
    }
}

/// The bot account and the languages it answers in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// The bot's own handle, without `@`. Stripped from every reply.
    #[serde(default)]
    pub handle: String,
    /// Language the incoming posts are written in.
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<LanguageTag>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            handle: String::new(),
            source_language: default_source_language(),
            supported_languages: default_supported_languages(),
        }
    }
}

/// Translation service config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// `libretranslate` or `google`.
    #[serde(default = "default_translate_backend")]
    pub backend: String,
    /// Service root. `None` uses the backend's public default.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            backend: default_translate_backend(),
            base_url: None,
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Reply-posting API config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    #[serde(default = "default_twitter_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            base_url: default_twitter_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where posting credentials come from, and under which names.
///
/// With `backend = "env"` the names are environment variables; with
/// `backend = "file"` they are keys of the TOML file at `path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    #[serde(default = "default_secrets_backend")]
    pub backend: String,
    #[serde(default = "default_secrets_path")]
    pub path: String,
    #[serde(default = "default_consumer_key_name")]
    pub consumer_key: String,
    #[serde(default = "default_consumer_secret_name")]
    pub consumer_secret: String,
    #[serde(default = "default_access_token_name")]
    pub access_token: String,
    #[serde(default = "default_access_secret_name")]
    pub access_secret: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            backend: default_secrets_backend(),
            path: default_secrets_path(),
            consumer_key: default_consumer_key_name(),
            consumer_secret: default_consumer_secret_name(),
            access_token: default_access_token_name(),
            access_secret: default_access_secret_name(),
        }
    }
}

/// Interaction store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            table: default_table(),
        }
    }
}

/// Webhook HTTP server config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    /// Bearer token for webhook authentication. Empty = no auth.
    #[serde(default)]
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Apply `PARROT_*` overrides from a variable lookup (normally the environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(handle) = lookup("PARROT_BOT_HANDLE") {
            self.bot.handle = handle;
        }
        if let Some(table) = lookup("PARROT_TABLE") {
            self.memory.table = table;
        }
        if let Some(key) = lookup("PARROT_TRANSLATE_API_KEY") {
            self.translate.api_key = key;
        }
        self.bot.handle = self.bot.handle.trim().trim_start_matches('@').to_string();
    }

    /// Reject values that would break the pipeline at request time.
    pub fn validate(&self) -> Result<(), ParrotError> {
        if self.bot.supported_languages.is_empty() {
            return Err(ParrotError::Config(
                "bot.supported_languages must not be empty".to_string(),
            ));
        }
        if self.bot.supported_languages.contains(&LanguageTag::Unknown) {
            return Err(ParrotError::Config(
                "bot.supported_languages must not contain 'unknown'".to_string(),
            ));
        }
        if self.bot.source_language.trim().is_empty() {
            return Err(ParrotError::Config(
                "bot.source_language must not be empty".to_string(),
            ));
        }
        if self.translate.timeout_secs == 0 {
            return Err(ParrotError::Config(
                "translate.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.twitter.timeout_secs == 0 {
            return Err(ParrotError::Config(
                "twitter.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !is_valid_table_name(&self.memory.table) {
            return Err(ParrotError::Config(format!(
                "memory.table '{}' is not a valid table name",
                self.memory.table
            )));
        }
        Ok(())
    }

    /// The bot handle is needed to strip self-mentions; refuse to serve without it.
    pub fn require_bot_handle(&self) -> Result<&str, ParrotError> {
        if self.bot.handle.is_empty() {
            return Err(ParrotError::Config(
                "bot.handle is empty. Set it in config.toml or PARROT_BOT_HANDLE env var."
                    .to_string(),
            ));
        }
        Ok(&self.bot.handle)
    }
}

/// SQL identifier check: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. Environment
/// overrides are applied afterwards, then the result is validated.
pub fn load(path: &str) -> Result<Config, ParrotError> {
    let mut config = read_file(Path::new(path))?;
    config.apply_overrides(|name| std::env::var(name).ok());
    config.validate()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config, ParrotError> {
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ParrotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| ParrotError::Config(format!("failed to parse config: {}", e)))
}
