//! Twitter REST API reply channel.
//!
//! Posts replies with `statuses/update`, signed per request with the
//! credentials handed in by the caller.
//! Docs: <https://developer.twitter.com/en/docs/twitter-api/v1/tweets/post-and-engage/api-reference/post-statuses-update>

mod oauth;
mod send;

use parrot_core::{config::TwitterConfig, error::ParrotError};
use std::time::Duration;

/// Reply poster for the Twitter API.
pub struct TwitterChannel {
    client: reqwest::Client,
    base_url: String,
}

impl TwitterChannel {
    /// Create a channel from config; the client gets the configured timeout.
    pub fn new(config: &TwitterConfig) -> Result<Self, ParrotError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ParrotError::Channel(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn update_url(&self) -> String {
        format!("{}/1.1/statuses/update.json", self.base_url)
    }
}
