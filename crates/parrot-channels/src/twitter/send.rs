//! Reply posting: `POST statuses/update` with `in_reply_to_status_id`.

use super::oauth::{encode, Nonce, Signer};
use super::TwitterChannel;
use async_trait::async_trait;
use parrot_core::{error::ParrotError, message::Credentials, traits::ReplyPoster};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Deserialize)]
pub(crate) struct StatusResponse {
    pub id_str: Option<String>,
    pub id: Option<u64>,
}

impl StatusResponse {
    fn post_id(&self) -> String {
        self.id_str
            .clone()
            .or_else(|| self.id.map(|id| id.to_string()))
            .unwrap_or_default()
    }
}

/// Form body with the same encoding used for the signature base string.
pub(crate) fn form_body(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl ReplyPoster for TwitterChannel {
    fn name(&self) -> &str {
        "twitter"
    }

    async fn post_reply(
        &self,
        credentials: &Credentials,
        text: &str,
        in_reply_to: &str,
    ) -> Result<String, ParrotError> {
        let url = self.update_url();
        let params = [("status", text), ("in_reply_to_status_id", in_reply_to)];

        let auth = Signer::new(credentials).authorization_header(
            "POST",
            &url,
            &params,
            &Nonce::fresh(),
        )?;

        debug!("twitter: POST {url} in_reply_to={in_reply_to}");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", auth)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form_body(&params))
            .send()
            .await
            .map_err(|e| ParrotError::Channel(format!("twitter post failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(ParrotError::Channel(format!(
                "twitter post failed ({status}): {error_text}"
            )));
        }

        let parsed: StatusResponse = resp
            .json()
            .await
            .map_err(|e| ParrotError::Channel(format!("twitter: failed to parse response: {e}")))?;

        let id = parsed.post_id();
        info!("twitter: posted reply {id} to {in_reply_to}");
        Ok(id)
    }
}
