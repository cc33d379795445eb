//! Gateway: the translation orchestrator.
//!
//! One call to [`Gateway::handle`] takes a webhook payload through language
//! extraction, translation, formatting, persistence and reply posting, in
//! that order. Only input validation is visible to the caller; every
//! downstream failure is logged and absorbed.

mod pipeline;


use parrot_core::{
    config::BotConfig,
    language::{hashtag_list, LanguageTag},
    message::{HandleResponse, WebhookPayload},
    reply::{ReplyFormatter, ReplySegments},
    traits::{CredentialsProvider, InteractionStore, ReplyPoster, Translator},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Reply used when the translation service fails.
pub const TRANSLATION_FAILED_REPLY: &str =
    "Hey! I had a problem translating that one. Maybe another time?";

/// The orchestrator. Holds read-only configuration and the four collaborators.
pub struct Gateway {
    pub(super) translator: Arc<dyn Translator>,
    pub(super) store: Arc<dyn InteractionStore>,
    pub(super) credentials: Arc<dyn CredentialsProvider>,
    pub(super) poster: Arc<dyn ReplyPoster>,
    pub(super) formatter: ReplyFormatter,
    pub(super) source_language: String,
    pub(super) supported: Vec<LanguageTag>,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        translator: Arc<dyn Translator>,
        store: Arc<dyn InteractionStore>,
        credentials: Arc<dyn CredentialsProvider>,
        poster: Arc<dyn ReplyPoster>,
        bot: &BotConfig,
    ) -> Self {
        Self {
            translator,
            store,
            credentials,
            poster,
            formatter: ReplyFormatter::new(&bot.handle),
            source_language: bot.source_language.clone(),
            supported: bot.supported_languages.clone(),
        }
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    pub fn bot_handle(&self) -> &str {
        self.formatter.bot_handle()
    }

    /// Reply used when no supported language tag is found.
    pub fn unknown_language_reply(&self) -> String {
        format!(
            "Hey! I didn't recognize the language you wanted me to translate that to. \
             You can use any of {}.",
            hashtag_list(&self.supported)
        )
    }

    /// Handle one webhook invocation.
    ///
    /// Returns 400 without side effects when a required field is missing,
    /// otherwise 200 regardless of downstream failures.
    pub async fn handle(&self, payload: &WebhookPayload) -> HandleResponse {
        let Some(request) = payload.validate() else {
            warn!("gateway: rejected payload with missing fields");
            return HandleResponse::bad_request();
        };

        let outcome = self.process(&request).await;
        info!(
            "gateway: handled @{} post {} -> {} | segments: {} | persisted: {} | posted: {}",
            request.requester,
            request.post_id,
            outcome.target,
            outcome.segments.len(),
            outcome.persisted,
            outcome.posted,
        );

        HandleResponse::ok()
    }

    /// Format a fallback or translated text for `requester`.
    pub(super) fn format(&self, text: &str, requester: &str) -> ReplySegments {
        self.formatter.format(text, requester)
    }
}
