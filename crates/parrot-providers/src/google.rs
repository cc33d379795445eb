//! Google Cloud Translation (v2 REST, API-key auth).

use async_trait::async_trait;
use parrot_core::{error::ParrotError, traits::Translator};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com";

/// Google Cloud Translation backend.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/language/translate/v2",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: Option<TranslateData>,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

fn first_translation(resp: TranslateResponse) -> Option<String> {
    resp.data
        .and_then(|d| d.translations.into_iter().next())
        .map(|t| t.translated_text)
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ParrotError> {
        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
        };

        let url = self.endpoint();
        debug!("google: POST {url} {source}->{target}");

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ParrotError::Translation(format!("google request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ParrotError::Translation(format!(
                "google returned {status}: {text}"
            )));
        }

        let parsed: TranslateResponse = resp
            .json()
            .await
            .map_err(|e| ParrotError::Translation(format!("google: failed to parse response: {e}")))?;

        first_translation(parsed).ok_or_else(|| {
            ParrotError::Translation("google: response had no translations".to_string())
        })
    }

    async fn is_available(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("google: no API key configured");
            return false;
        }
        true
    }
}
