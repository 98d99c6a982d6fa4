//! Client secrets owned by an [`Application`](super::Application).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientSecretType {
    SharedSecret,
    X509Thumbprint,
    X509Name,
    X509CertificateBase64,
}

impl Default for ClientSecretType {
    fn default() -> Self {
        Self::SharedSecret
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecret {
    #[serde(default)]
    pub secret_type: ClientSecretType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl ClientSecret {
    pub fn new(secret_type: ClientSecretType, value: impl Into<String>) -> Self {
        Self {
            secret_type,
            value: value.into(),
            expiration: None,
        }
    }

    /// Shared secret stored as `base64(sha256(plaintext))`; the plaintext is not kept.
    pub fn shared_secret(plaintext: &str) -> Self {
        Self::new(ClientSecretType::SharedSecret, hash_secret(plaintext))
    }

    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration.map(|at| at <= now).unwrap_or(false)
    }

    /// Compare a presented plaintext against a stored shared secret.
    pub fn matches(&self, plaintext: &str) -> bool {
        self.secret_type == ClientSecretType::SharedSecret && self.value == hash_secret(plaintext)
    }
}

pub fn hash_secret(plaintext: &str) -> String {
    STANDARD.encode(Sha256::digest(plaintext.as_bytes()))
}
