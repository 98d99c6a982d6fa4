//! API resource request/response shape: common resource fields with the
//! extend fields merged in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::ApiResource;
use crate::resource::ApiResourceExtend;
use crate::shared::audit_info::AuditInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceDto {
    #[serde(default)]
    pub id: String,
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub sort_id: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub claims: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl ApiResourceDto {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from(ApiResource::new(uri, name))
    }
}

impl From<ApiResourceDto> for ApiResource {
    fn from(dto: ApiResourceDto) -> Self {
        Self {
            id: dto.id,
            uri: dto.uri.trim().to_string(),
            name: dto.name,
            remark: dto.remark,
            enabled: dto.enabled,
            sort_id: dto.sort_id,
            extend: ApiResourceExtend {
                display_name: dto.display_name,
                claims: dto.claims,
                scopes: dto.scopes,
            },
            audit: AuditInfo::default(),
        }
    }
}

impl From<ApiResource> for ApiResourceDto {
    fn from(api: ApiResource) -> Self {
        Self {
            id: api.id,
            uri: api.uri,
            name: api.name,
            remark: api.remark,
            enabled: api.enabled,
            sort_id: api.sort_id,
            display_name: api.extend.display_name,
            claims: api.extend.claims,
            scopes: api.extend.scopes,
            created_at: Some(api.audit.created_at),
            updated_at: Some(api.audit.updated_at),
        }
    }
}
