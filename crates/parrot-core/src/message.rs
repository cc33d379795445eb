use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::language::LanguageTag;
use crate::reply::ReplySegments;

/// Timestamp layout stored with every interaction: second precision, no zone.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw webhook body as delivered by the mention notifier.
///
/// Every field is optional here; [`WebhookPayload::validate`] decides
/// whether the request is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub tweet: Option<String>,
    /// String or positive integer post id.
    #[serde(default)]
    pub status_id: Option<Value>,
}

impl WebhookPayload {
    /// Build an [`IncomingRequest`], or `None` when a field is missing or empty.
    pub fn validate(&self) -> Option<IncomingRequest> {
        let requester = self.screen_name.as_deref().filter(|s| !s.is_empty())?;
        let text = self.tweet.as_deref().filter(|s| !s.is_empty())?;
        let post_id = match self.status_id.as_ref()? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => match n.as_u64() {
                Some(id) if id != 0 => id.to_string(),
                _ => return None,
            },
            _ => return None,
        };
        Some(IncomingRequest {
            requester: requester.to_string(),
            text: text.to_string(),
            post_id,
        })
    }
}

/// A validated translation request: who asked, what to translate, and
/// which post to reply under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingRequest {
    pub requester: String,
    pub text: String,
    pub post_id: String,
}

/// One row of the append-only interaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub screen_name: String,
    pub tweet: String,
    /// UTC, formatted with [`RECORD_TIMESTAMP_FORMAT`].
    pub date_tweeted: String,
    pub target_language: String,
    /// Reply segments joined by a single space.
    pub translated_tweet: String,
}

impl InteractionRecord {
    pub fn new(
        request: &IncomingRequest,
        target: LanguageTag,
        reply: &ReplySegments,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            screen_name: request.requester.clone(),
            tweet: request.text.clone(),
            date_tweeted: at.format(RECORD_TIMESTAMP_FORMAT).to_string(),
            target_language: target.code().to_string(),
            translated_tweet: reply.joined(),
        }
    }
}

/// OAuth 1.0a user credentials for the posting account.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("access_token", &"[redacted]")
            .field("access_secret", &"[redacted]")
            .finish()
    }
}

/// HTTP-style result of one orchestrated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandleResponse {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: "OK".to_string(),
        }
    }

    pub fn bad_request() -> Self {
        Self {
            status_code: 400,
            body: "Did not receive proper arguments".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload(json: &str) -> WebhookPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_validate_complete_payload() {
        let req = payload(r#"{"screen_name":"alice","tweet":"hi #es","status_id":"123"}"#)
            .validate()
            .unwrap();
        assert_eq!(req.requester, "alice");
        assert_eq!(req.text, "hi #es");
        assert_eq!(req.post_id, "123");
    }

    #[test]
    fn test_validate_numeric_status_id() {
        let req = payload(r#"{"screen_name":"alice","tweet":"hi","status_id":1234567890123456789}"#)
            .validate()
            .unwrap();
        assert_eq!(req.post_id, "1234567890123456789");
    }

    #[test]
    fn test_validate_rejects_missing_or_empty_fields() {
        let cases = [
            r#"{"tweet":"hi","status_id":"1"}"#,
            r#"{"screen_name":"","tweet":"hi","status_id":"1"}"#,
            r#"{"screen_name":"alice","status_id":"1"}"#,
            r#"{"screen_name":"alice","tweet":"","status_id":"1"}"#,
            r#"{"screen_name":"alice","tweet":"hi"}"#,
            r#"{"screen_name":"alice","tweet":"hi","status_id":""}"#,
            r#"{"screen_name":"alice","tweet":"hi","status_id":null}"#,
            r#"{"screen_name":"alice","tweet":"hi","status_id":true}"#,
            r#"{"screen_name":"alice","tweet":"hi","status_id":0}"#,
            r#"{"screen_name":"alice","tweet":"hi","status_id":-5}"#,
            r#"{"screen_name":"alice","tweet":"hi","status_id":1.5}"#,
        ];
        for case in cases {
            assert!(payload(case).validate().is_none(), "should reject {case}");
        }
    }

    #[test]
    fn test_interaction_record_fields() {
        let request = IncomingRequest {
            requester: "alice".into(),
            text: "@bot translate this #es".into(),
            post_id: "123".into(),
        };
        let reply = ReplySegments::from(vec!["@alice uno".to_string(), "@alice dos".to_string()]);
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let record = InteractionRecord::new(&request, LanguageTag::Spanish, &reply, at);

        assert_eq!(record.screen_name, "alice");
        assert_eq!(record.tweet, "@bot translate this #es");
        assert_eq!(record.date_tweeted, "2024-03-09 07:05:01");
        assert_eq!(record.target_language, "es");
        assert_eq!(record.translated_tweet, "@alice uno @alice dos");
    }

    #[test]
    fn test_credentials_debug_redacts_values() {
        let creds = Credentials {
            consumer_key: "ck-secret".into(),
            consumer_secret: "cs-secret".into(),
            access_token: "at-secret".into(),
            access_secret: "as-secret".into(),
        };
        let shown = format!("{creds:?}");
        for value in ["ck-secret", "cs-secret", "at-secret", "as-secret"] {
            assert!(!shown.contains(value), "leaked {value}");
        }
        assert!(shown.contains("[redacted]"));
    }

    #[test]
    fn test_handle_response_constants() {
        assert_eq!(HandleResponse::ok().status_code, 200);
        assert_eq!(HandleResponse::ok().body, "OK");
        assert_eq!(HandleResponse::bad_request().status_code, 400);
        assert_eq!(
            HandleResponse::bad_request().body,
            "Did not receive proper arguments"
        );
    }
}
