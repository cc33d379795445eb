use crate::{
    error::ParrotError,
    message::{Credentials, InteractionRecord},
};
use async_trait::async_trait;

/// Machine translation service.
///
/// Every backend (LibreTranslate, Google Cloud Translation, test fakes)
/// implements this trait to provide a uniform interface.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Translate `text` from `source` to `target` (language codes).
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, ParrotError>;

    /// Check if the service is reachable and configured.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Append-only sink for interaction records.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn save(&self, record: &InteractionRecord) -> Result<(), ParrotError>;
}

/// Source of posting credentials. Fetched on every invocation, never cached.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Credentials, ParrotError>;
}

/// Social network reply posting.
#[async_trait]
pub trait ReplyPoster: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Post `text` as a reply to `in_reply_to`. Returns the new post id.
    async fn post_reply(
        &self,
        credentials: &Credentials,
        text: &str,
        in_reply_to: &str,
    ) -> Result<String, ParrotError>;
}
