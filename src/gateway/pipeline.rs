//! The per-request pipeline: extract, translate, format, persist, post.

use super::{Gateway, TRANSLATION_FAILED_REPLY};
use chrono::Utc;
use parrot_core::{
    language::{extract_language_from, LanguageTag},
    message::{IncomingRequest, InteractionRecord},
    reply::ReplySegments,
};
use tracing::{error, info, warn};

/// What happened to one request after validation.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub target: LanguageTag,
    pub segments: ReplySegments,
    pub persisted: bool,
    /// Number of segments the reply channel accepted.
    pub posted: usize,
}

impl Gateway {
    /// Run every step for a validated request. Never fails.
    pub async fn process(&self, request: &IncomingRequest) -> Outcome {
        let target = extract_language_from(&request.text, &self.supported);
        let text = self.reply_text(request, target).await;
        let segments = self.format(&text, &request.requester);

        let record = InteractionRecord::new(request, target, &segments, Utc::now());
        let persisted = self.persist(&record).await;
        let posted = self.post_replies(&segments, &request.post_id).await;

        Outcome {
            target,
            segments,
            persisted,
            posted,
        }
    }

    /// Translated text, or one of the fixed fallback replies.
    async fn reply_text(&self, request: &IncomingRequest, target: LanguageTag) -> String {
        if target.is_unknown() {
            info!("gateway: no language tag from @{}", request.requester);
            return self.unknown_language_reply();
        }

        match self
            .translator
            .translate(&request.text, &self.source_language, target.code())
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!(
                    "gateway: {} failed for {}->{}: {e}",
                    self.translator.name(),
                    self.source_language,
                    target
                );
                TRANSLATION_FAILED_REPLY.to_string()
            }
        }
    }

    async fn persist(&self, record: &InteractionRecord) -> bool {
        info!(
            "gateway: recording post from @{} with translation to {}",
            record.screen_name, record.target_language
        );
        match self.store.save(record).await {
            Ok(()) => true,
            Err(e) => {
                warn!("gateway: interaction log write failed: {e}");
                false
            }
        }
    }

    /// Post segments last-first under `post_id`. Returns how many succeeded.
    async fn post_replies(&self, segments: &ReplySegments, post_id: &str) -> usize {
        let credentials = match self.credentials.fetch().await {
            Ok(c) => c,
            Err(e) => {
                error!(
                    "gateway: {} credentials unavailable, not replying: {e}",
                    self.credentials.name()
                );
                return 0;
            }
        };

        let mut posted = 0;
        for segment in segments.posting_order() {
            info!("gateway: replying to {post_id}: {segment}");
            match self.poster.post_reply(&credentials, segment, post_id).await {
                Ok(id) => {
                    info!("gateway: {} accepted reply {id}", self.poster.name());
                    posted += 1;
                }
                Err(e) => warn!("gateway: {} reply failed: {e}", self.poster.name()),
            }
        }
        posted
    }
}
