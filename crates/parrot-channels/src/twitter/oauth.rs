//! OAuth 1.0a request signing (HMAC-SHA1), as required for user-context
//! calls to the Twitter REST API.
//! Docs: <https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature>

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use parrot_core::{error::ParrotError, message::Credentials};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 percent-encoding: everything except `A-Z a-z 0-9 - . _ ~`.
pub(crate) fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Per-request values that must differ between calls.
pub(crate) struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    pub fn fresh() -> Self {
        Self {
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Signs requests on behalf of one user.
pub(crate) struct Signer<'a> {
    credentials: &'a Credentials,
}

impl<'a> Signer<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    fn oauth_params(&self, nonce: &Nonce) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.consumer_key.clone()),
            ("oauth_nonce", nonce.nonce.clone()),
            ("oauth_signature_method", "HMAC-SHA1".to_string()),
            ("oauth_timestamp", nonce.timestamp.to_string()),
            ("oauth_token", self.credentials.access_token.clone()),
            ("oauth_version", "1.0".to_string()),
        ]
    }

    /// Compute `oauth_signature` for a request.
    ///
    /// `params` are the query and form-body parameters, unencoded.
    pub fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &Nonce,
    ) -> Result<String, ParrotError> {
        let oauth = self.oauth_params(nonce);

        let mut pairs: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (encode(k), encode(v)))
            .chain(oauth.iter().map(|(k, v)| (encode(k), encode(v))))
            .collect();
        pairs.sort();

        let param_string = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base = format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            encode(url),
            encode(&param_string)
        );
        let key = format!(
            "{}&{}",
            encode(&self.credentials.consumer_secret),
            encode(&self.credentials.access_secret)
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| ParrotError::Channel(format!("oauth signing key rejected: {e}")))?;
        mac.update(base.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Build the `Authorization: OAuth ...` header value.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &Nonce,
    ) -> Result<String, ParrotError> {
        let signature = self.signature(method, url, params, nonce)?;
        let mut oauth = self.oauth_params(nonce);
        oauth.push(("oauth_signature", signature));
        oauth.sort();

        let fields = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Values from the published "Creating a signature" walkthrough.
    fn reference_credentials() -> Credentials {
        Credentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".into(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".into(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into(),
            access_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".into(),
        }
    }

    fn reference_nonce() -> Nonce {
        Nonce {
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".into(),
            timestamp: 1318622958,
        }
    }

    const REFERENCE_PARAMS: [(&str, &str); 2] = [
        ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
        ("include_entities", "true"),
    ];

    #[test]
    fn test_signature_matches_reference() {
        let creds = reference_credentials();
        let sig = Signer::new(&creds)
            .signature(
                "POST",
                "https://api.twitter.com/1.1/statuses/update.json",
                &REFERENCE_PARAMS,
                &reference_nonce(),
            )
            .unwrap();
        assert_eq!(sig, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_authorization_header_layout() {
        let creds = reference_credentials();
        let header = Signer::new(&creds)
            .authorization_header(
                "post",
                "https://api.twitter.com/1.1/statuses/update.json",
                &REFERENCE_PARAMS,
                &reference_nonce(),
            )
            .unwrap();
        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains("oauth_timestamp=\"1318622958\""));
        assert!(header.ends_with("oauth_version=\"1.0\""));
        // Request parameters never leak into the header.
        assert!(!header.contains("status"));
    }

    #[test]
    fn test_encode_is_rfc3986() {
        assert_eq!(encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(encode("!*'()"), "%21%2A%27%28%29");
        assert_eq!(encode("ñ"), "%C3%B1");
    }

    #[test]
    fn test_fresh_nonces_differ() {
        let a = Nonce::fresh();
        let b = Nonce::fresh();
        assert_ne!(a.nonce, b.nonce);
        assert_eq!(a.nonce.len(), 32);
    }
}
