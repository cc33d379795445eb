//! Credential providers for the posting account.
//!
//! Both backends re-read their source on every `fetch()` so rotated
//! secrets take effect without a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::config::{shellexpand, SecretsConfig};
use crate::error::ParrotError;
use crate::message::Credentials;
use crate::traits::CredentialsProvider;

/// The four secret names to look up.
#[derive(Debug, Clone)]
pub struct SecretNames {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl From<&SecretsConfig> for SecretNames {
    fn from(cfg: &SecretsConfig) -> Self {
        Self {
            consumer_key: cfg.consumer_key.clone(),
            consumer_secret: cfg.consumer_secret.clone(),
            access_token: cfg.access_token.clone(),
            access_secret: cfg.access_secret.clone(),
        }
    }
}

impl SecretNames {
    /// Resolve every name through `lookup`, failing on the first missing or empty one.
    fn resolve(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<Credentials, ParrotError> {
        let get = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ParrotError::Secrets(format!("secret '{name}' is missing or empty")))
        };
        Ok(Credentials {
            consumer_key: get(&self.consumer_key)?,
            consumer_secret: get(&self.consumer_secret)?,
            access_token: get(&self.access_token)?,
            access_secret: get(&self.access_secret)?,
        })
    }
}

/// Reads credentials from environment variables.
pub struct EnvCredentials {
    names: SecretNames,
}

impl EnvCredentials {
    pub fn new(names: SecretNames) -> Self {
        Self { names }
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentials {
    fn name(&self) -> &str {
        "env"
    }

    async fn fetch(&self) -> Result<Credentials, ParrotError> {
        self.names.resolve(|name| std::env::var(name).ok())
    }
}

/// Reads credentials from a flat TOML file of `NAME = "value"` pairs.
pub struct FileCredentials {
    path: String,
    names: SecretNames,
}

impl FileCredentials {
    pub fn new(path: &str, names: SecretNames) -> Self {
        Self {
            path: shellexpand(path),
            names,
        }
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentials {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<Credentials, ParrotError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ParrotError::Secrets(format!("failed to read {}: {e}", self.path)))?;

        let values: HashMap<String, String> = toml::from_str(&content)
            .map_err(|e| ParrotError::Secrets(format!("failed to parse {}: {e}", self.path)))?;

        debug!("secrets: loaded {} entries from {}", values.len(), self.path);
        self.names.resolve(|name| values.get(name).cloned())
    }
}

/// Build the configured credentials provider.
pub fn from_config(cfg: &SecretsConfig) -> Result<Box<dyn CredentialsProvider>, ParrotError> {
    let names = SecretNames::from(cfg);
    match cfg.backend.as_str() {
        "env" => Ok(Box::new(EnvCredentials::new(names))),
        "file" => Ok(Box::new(FileCredentials::new(&cfg.path, names))),
        other => Err(ParrotError::Config(format!(
            "unsupported secrets backend: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(prefix: &str) -> SecretNames {
        SecretNames {
            consumer_key: format!("{prefix}_CONSUMER_KEY"),
            consumer_secret: format!("{prefix}_CONSUMER_SECRET"),
            access_token: format!("{prefix}_ACCESS_TOKEN"),
            access_secret: format!("{prefix}_ACCESS_SECRET"),
        }
    }

    #[tokio::test]
    async fn test_env_credentials_fetch() {
        let n = names("__PARROT_TEST_ENV_OK");
        std::env::set_var(&n.consumer_key, "ck");
        std::env::set_var(&n.consumer_secret, "cs");
        std::env::set_var(&n.access_token, "at");
        std::env::set_var(&n.access_secret, "as");

        let creds = EnvCredentials::new(n).fetch().await.unwrap();
        assert_eq!(creds.consumer_key, "ck");
        assert_eq!(creds.consumer_secret, "cs");
        assert_eq!(creds.access_token, "at");
        assert_eq!(creds.access_secret, "as");
    }

    #[tokio::test]
    async fn test_env_credentials_missing_names_the_secret() {
        let n = names("__PARROT_TEST_ENV_MISSING");
        std::env::set_var(&n.consumer_key, "ck");
        std::env::set_var(&n.consumer_secret, "cs");
        std::env::set_var(&n.access_token, "   ");

        let err = EnvCredentials::new(n).fetch().await.unwrap_err();
        assert!(matches!(err, ParrotError::Secrets(_)));
        assert!(err
            .to_string()
            .contains("__PARROT_TEST_ENV_MISSING_ACCESS_TOKEN"));
    }

    #[tokio::test]
    async fn test_file_credentials_reread_on_every_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        let write = |token: &str| {
            std::fs::write(
                &path,
                format!(
                    "TWITTER_CONSUMER_KEY = \"ck\"\n\
                     TWITTER_CONSUMER_SECRET = \"cs\"\n\
                     TWITTER_ACCESS_TOKEN = \"{token}\"\n\
                     TWITTER_ACCESS_SECRET = \"as\"\n"
                ),
            )
            .unwrap();
        };

        let provider = FileCredentials::new(
            path.to_str().unwrap(),
            SecretNames::from(&SecretsConfig::default()),
        );

        write("first");
        assert_eq!(provider.fetch().await.unwrap().access_token, "first");
        write("rotated");
        assert_eq!(provider.fetch().await.unwrap().access_token, "rotated");
    }

    #[tokio::test]
    async fn test_file_credentials_missing_file() {
        let provider = FileCredentials::new(
            "/nonexistent/parrot/secrets.toml",
            SecretNames::from(&SecretsConfig::default()),
        );
        let err = provider.fetch().await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[tokio::test]
    async fn test_file_credentials_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "TWITTER_CONSUMER_KEY = \"ck\"\n").unwrap();
        let provider = FileCredentials::new(
            path.to_str().unwrap(),
            SecretNames::from(&SecretsConfig::default()),
        );
        let err = provider.fetch().await.unwrap_err();
        assert!(err.to_string().contains("TWITTER_CONSUMER_SECRET"));
    }

    #[test]
    fn test_from_config_backends() {
        let mut cfg = SecretsConfig::default();
        assert_eq!(from_config(&cfg).unwrap().name(), "env");
        cfg.backend = "file".to_string();
        assert_eq!(from_config(&cfg).unwrap().name(), "file");
        cfg.backend = "vault".to_string();
        assert!(from_config(&cfg).is_err());
    }
}
