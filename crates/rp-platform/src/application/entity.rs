//! Application Entity
//!
//! An OAuth/OIDC client registered with the platform.

use serde::{Deserialize, Serialize};

use super::client_secret::ClientSecret;
use crate::shared::audit_info::AuditInfo;
use crate::shared::error::{PlatformError, Result};

pub const DEFAULT_ACCESS_TOKEN_LIFETIME: i32 = 3600;

/// OAuth grant types an application may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantType {
    #[serde(rename = "implicit")]
    Implicit,
    #[serde(rename = "authorization_code")]
    AuthorizationCode,
    #[serde(rename = "hybrid")]
    Hybrid,
    #[serde(rename = "client_credentials")]
    ClientCredentials,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "urn:ietf:params:oauth:grant-type:device_code")]
    DeviceCode,
}

/// Application entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Unique business key among live applications, e.g. "admin-console"
    pub code: String,

    pub name: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether self-registration is offered on the login page
    #[serde(default)]
    pub register_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    #[serde(default)]
    pub allowed_grant_types: Vec<GrantType>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub post_logout_redirect_uris: Vec<String>,
    #[serde(default)]
    pub allowed_cors_origins: Vec<String>,
    #[serde(default)]
    pub allowed_scopes: Vec<String>,

    #[serde(default)]
    pub require_consent: bool,
    #[serde(default)]
    pub allow_offline_access: bool,
    #[serde(default)]
    pub allow_access_tokens_via_browser: bool,

    /// Seconds
    #[serde(default = "default_access_token_lifetime")]
    pub access_token_lifetime: i32,

    #[serde(default)]
    pub client_secrets: Vec<ClientSecret>,

    #[serde(default)]
    pub audit: AuditInfo,

    #[serde(default)]
    pub is_deleted: bool,
}

fn default_true() -> bool {
    true
}

fn default_access_token_lifetime() -> i32 {
    DEFAULT_ACCESS_TOKEN_LIFETIME
}

impl Application {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            code: code.into(),
            name: name.into(),
            enabled: true,
            register_enabled: false,
            remark: None,
            allowed_grant_types: Vec::new(),
            redirect_uris: Vec::new(),
            post_logout_redirect_uris: Vec::new(),
            allowed_cors_origins: Vec::new(),
            allowed_scopes: Vec::new(),
            require_consent: false,
            allow_offline_access: false,
            allow_access_tokens_via_browser: false,
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
            client_secrets: Vec::new(),
            audit: AuditInfo::default(),
            is_deleted: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(PlatformError::validation("Application code is required"));
        }
        if self.name.trim().is_empty() {
            return Err(PlatformError::validation(format!(
                "Application name is required (code '{}')",
                self.code
            )));
        }
        if self.access_token_lifetime <= 0 {
            return Err(PlatformError::validation(format!(
                "Access token lifetime must be positive, got {}",
                self.access_token_lifetime
            )));
        }
        if self.client_secrets.iter().any(|s| s.value.is_empty()) {
            return Err(PlatformError::validation(format!(
                "Application '{}' has a client secret with an empty value",
                self.code
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let app = Application::new("app1", "App One");
        assert!(app.enabled);
        assert_eq!(app.access_token_lifetime, 3600);
        assert!(app.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_code() {
        let err = Application::new("  ", "App").validate().unwrap_err();
        assert!(err.is_warning());
    }

    #[test]
    fn test_grant_type_wire_names() {
        let json = serde_json::to_string(&vec![GrantType::AuthorizationCode, GrantType::DeviceCode]).unwrap();
        assert_eq!(
            json,
            r#"["authorization_code","urn:ietf:params:oauth:grant-type:device_code"]"#
        );
    }

    #[test]
    fn test_document_defaults_for_missing_fields() {
        let doc = bson::doc! { "_id": "a", "code": "app1", "name": "App One" };
        let app: Application = bson::from_document(doc).unwrap();

        assert!(app.enabled);
        assert!(!app.is_deleted);
        assert_eq!(app.access_token_lifetime, DEFAULT_ACCESS_TOKEN_LIFETIME);
    }
}
