//! # parrot-providers
//!
//! Translation service implementations for Parrot.

pub mod google;
pub mod libretranslate;

use parrot_core::{config::TranslateConfig, error::ParrotError, traits::Translator};
use std::time::Duration;

pub use google::GoogleTranslator;
pub use libretranslate::LibreTranslator;

/// Build the configured translation backend.
pub fn from_config(cfg: &TranslateConfig) -> Result<Box<dyn Translator>, ParrotError> {
    let client = http_client(cfg.timeout_secs)?;
    match cfg.backend.as_str() {
        "libretranslate" => Ok(Box::new(LibreTranslator::new(
            client,
            cfg.base_url
                .clone()
                .unwrap_or_else(|| libretranslate::DEFAULT_BASE_URL.to_string()),
            cfg.api_key.clone(),
        ))),
        "google" => Ok(Box::new(GoogleTranslator::new(
            client,
            cfg.base_url
                .clone()
                .unwrap_or_else(|| google::DEFAULT_BASE_URL.to_string()),
            cfg.api_key.clone(),
        ))),
        other => Err(ParrotError::Config(format!(
            "unsupported translate backend: {other}"
        ))),
    }
}

/// HTTP client with a bounded per-request timeout.
fn http_client(timeout_secs: u64) -> Result<reqwest::Client, ParrotError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ParrotError::Translation(format!("failed to build http client: {e}")))
}
