//! Identity resource request/response shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::IdentityResource;
use crate::resource::IdentityResourceExtend;
use crate::shared::audit_info::AuditInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResourceDto {
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
    pub required: bool,
    #[serde(default)]
    pub emphasize: bool,
    #[serde(default = "default_true")]
    pub show_in_discovery_document: bool,
    #[serde(default)]
    pub claims: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl IdentityResourceDto {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from(IdentityResource::new(uri, name))
    }
}

impl From<IdentityResourceDto> for IdentityResource {
    fn from(dto: IdentityResourceDto) -> Self {
        Self {
            id: dto.id,
            uri: dto.uri.trim().to_string(),
            name: dto.name,
            remark: dto.remark,
            enabled: dto.enabled,
            sort_id: dto.sort_id,
            extend: IdentityResourceExtend {
                display_name: dto.display_name,
                required: dto.required,
                emphasize: dto.emphasize,
                show_in_discovery_document: dto.show_in_discovery_document,
                claims: dto.claims,
            },
            audit: AuditInfo::default(),
        }
    }
}

impl From<IdentityResource> for IdentityResourceDto {
    fn from(resource: IdentityResource) -> Self {
        Self {
            id: resource.id,
            uri: resource.uri,
            name: resource.name,
            remark: resource.remark,
            enabled: resource.enabled,
            sort_id: resource.sort_id,
            display_name: resource.extend.display_name,
            required: resource.extend.required,
            emphasize: resource.extend.emphasize,
            show_in_discovery_document: resource.extend.show_in_discovery_document,
            claims: resource.extend.claims,
            created_at: Some(resource.audit.created_at),
            updated_at: Some(resource.audit.updated_at),
        }
    }
}
