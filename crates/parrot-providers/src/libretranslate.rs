//! LibreTranslate-compatible translation backend.
//!
//! Works with the public instance and any self-hosted deployment.
//! Docs: <https://docs.libretranslate.com/>

use async_trait::async_trait;
use parrot_core::{error::ParrotError, traits::Translator};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://libretranslate.com";

/// LibreTranslate backend.
pub struct LibreTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LibreTranslator {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
pub(crate) struct TranslateRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

#[derive(Deserialize)]
pub(crate) struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
    pub error: Option<String>,
}

impl TranslateResponse {
    fn into_text(self) -> Result<String, ParrotError> {
        match (self.translated_text, self.error) {
            (Some(text), _) => Ok(text),
            (None, Some(err)) => Err(ParrotError::Translation(format!(
                "libretranslate error: {err}"
            ))),
            (None, None) => Err(ParrotError::Translation(
                "libretranslate: response had no translatedText".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    fn name(&self) -> &str {
        "libretranslate"
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
            api_key: (!self.api_key.is_empty()).then_some(self.api_key.as_str()),
        };

        let url = self.url("translate");
        debug!("libretranslate: POST {url} {source}->{target}");

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ParrotError::Translation(format!("libretranslate request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ParrotError::Translation(format!(
                "libretranslate returned {status}: {text}"
            )));
        }

        let parsed: TranslateResponse = resp.json().await.map_err(|e| {
            ParrotError::Translation(format!("libretranslate: failed to parse response: {e}"))
        })?;

        parsed.into_text()
    }

    async fn is_available(&self) -> bool {
        match self.client.get(self.url("languages")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("libretranslate not available: {e}");
                false
            }
        }
    }
}
