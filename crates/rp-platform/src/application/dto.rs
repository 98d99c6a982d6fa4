//! Application request/response shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client_secret::ClientSecret;
use super::entity::{Application, GrantType, DEFAULT_ACCESS_TOKEN_LIFETIME};
use crate::shared::audit_info::AuditInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDto {
    /// Ignored on create, required on update
    #[serde(default)]
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
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
    #[serde(default = "default_access_token_lifetime")]
    pub access_token_lifetime: i32,
    #[serde(default)]
    pub client_secrets: Vec<ClientSecret>,

    /// Read-only; filled on responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

fn default_access_token_lifetime() -> i32 {
    DEFAULT_ACCESS_TOKEN_LIFETIME
}

impl ApplicationDto {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from(Application::new(code, name))
    }
}

impl From<ApplicationDto> for Application {
    fn from(dto: ApplicationDto) -> Self {
        Self {
            id: dto.id,
            code: dto.code.trim().to_string(),
            name: dto.name,
            enabled: dto.enabled,
            register_enabled: dto.register_enabled,
            remark: dto.remark,
            allowed_grant_types: dto.allowed_grant_types,
            redirect_uris: dto.redirect_uris,
            post_logout_redirect_uris: dto.post_logout_redirect_uris,
            allowed_cors_origins: dto.allowed_cors_origins,
            allowed_scopes: dto.allowed_scopes,
            require_consent: dto.require_consent,
            allow_offline_access: dto.allow_offline_access,
            allow_access_tokens_via_browser: dto.allow_access_tokens_via_browser,
            access_token_lifetime: dto.access_token_lifetime,
            client_secrets: dto.client_secrets,
            audit: AuditInfo::default(),
            is_deleted: false,
        }
    }
}

impl From<Application> for ApplicationDto {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            code: app.code,
            name: app.name,
            enabled: app.enabled,
            register_enabled: app.register_enabled,
            remark: app.remark,
            allowed_grant_types: app.allowed_grant_types,
            redirect_uris: app.redirect_uris,
            post_logout_redirect_uris: app.post_logout_redirect_uris,
            allowed_cors_origins: app.allowed_cors_origins,
            allowed_scopes: app.allowed_scopes,
            require_consent: app.require_consent,
            allow_offline_access: app.allow_offline_access,
            allow_access_tokens_via_browser: app.allow_access_tokens_via_browser,
            access_token_lifetime: app.access_token_lifetime,
            client_secrets: app.client_secrets,
            created_at: Some(app.audit.created_at),
            updated_at: Some(app.audit.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_request() {
        let dto: ApplicationDto =
            serde_json::from_str(r#"{"code":"app1","name":"App One","allowedGrantTypes":["client_credentials"]}"#)
                .unwrap();

        assert!(dto.id.is_empty());
        assert!(dto.enabled);
        assert_eq!(dto.access_token_lifetime, 3600);
        assert_eq!(dto.allowed_grant_types, vec![GrantType::ClientCredentials]);
    }

    #[test]
    fn test_code_is_trimmed_on_the_way_in() {
        let app = Application::from(ApplicationDto::new(" app1 ", "App One"));
        assert_eq!(app.code, "app1");
    }
}
