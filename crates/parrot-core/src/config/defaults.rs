//! Default value functions used by serde for config deserialization.

use crate::language::LanguageTag;

pub fn default_name() -> String {
    "Parrot".to_string()
}

pub fn default_data_dir() -> String {
    "~/.parrot".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_source_language() -> String {
    "en".to_string()
}

pub fn default_supported_languages() -> Vec<LanguageTag> {
    LanguageTag::SUPPORTED.to_vec()
}

pub fn default_translate_backend() -> String {
    "libretranslate".to_string()
}

pub fn default_timeout_secs() -> u64 {
    10
}

pub fn default_twitter_base_url() -> String {
    "https://api.twitter.com".to_string()
}

pub fn default_secrets_backend() -> String {
    "env".to_string()
}

pub fn default_secrets_path() -> String {
    "~/.parrot/secrets.toml".to_string()
}

pub fn default_consumer_key_name() -> String {
    "TWITTER_CONSUMER_KEY".to_string()
}

pub fn default_consumer_secret_name() -> String {
    "TWITTER_CONSUMER_SECRET".to_string()
}

pub fn default_access_token_name() -> String {
    "TWITTER_ACCESS_TOKEN".to_string()
}

pub fn default_access_secret_name() -> String {
    "TWITTER_ACCESS_SECRET".to_string()
}

pub fn default_db_path() -> String {
    "~/.parrot/data/interactions.db".to_string()
}

pub fn default_table() -> String {
    "translations".to_string()
}

pub fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_api_port() -> u16 {
    3000
}
