//! Poster that only logs. Used by `parrot translate --dry-run`.

use async_trait::async_trait;
use parrot_core::{error::ParrotError, message::Credentials, traits::ReplyPoster};
use tracing::info;

pub struct DryRunPoster;

#[async_trait]
impl ReplyPoster for DryRunPoster {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn post_reply(
        &self,
        _credentials: &Credentials,
        text: &str,
        in_reply_to: &str,
    ) -> Result<String, ParrotError> {
        info!("dry-run: would reply to {in_reply_to}: {text}");
        Ok(format!("dry-run:{in_reply_to}"))
    }
}
