//! Module request/response shapes.
//!
//! `url` maps onto the stored resource `uri`; `icon` and `expanded` come
//! from the extend column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Module;
use crate::resource::ModuleExtend;
use crate::shared::audit_info::AuditInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDto {
    #[serde(default)]
    pub id: String,
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub sort_id: i32,

    /// Derived; ignored on update
    #[serde(default)]
    pub level: i32,
    /// Derived; ignored on update
    #[serde(default)]
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub expanded: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub sort_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub expanded: bool,
}

fn default_true() -> bool {
    true
}

impl CreateModuleRequest {
    pub fn new(application_id: impl Into<String>, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            parent_id: None,
            url: url.into(),
            name: name.into(),
            remark: None,
            enabled: true,
            sort_id: 0,
            icon: None,
            expanded: false,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_sort_id(mut self, sort_id: i32) -> Self {
        self.sort_id = sort_id;
        self
    }
}

impl From<CreateModuleRequest> for Module {
    fn from(request: CreateModuleRequest) -> Self {
        Self {
            id: String::new(),
            application_id: request.application_id.trim().to_string(),
            parent_id: request.parent_id.filter(|parent| !parent.trim().is_empty()),
            url: request.url.trim().to_string(),
            name: request.name,
            remark: request.remark,
            enabled: request.enabled,
            sort_id: request.sort_id,
            level: 0,
            path: String::new(),
            extend: ModuleExtend {
                icon: request.icon,
                expanded: request.expanded,
            },
            audit: AuditInfo::default(),
        }
    }
}

impl From<ModuleDto> for Module {
    fn from(dto: ModuleDto) -> Self {
        Self {
            id: dto.id,
            application_id: dto.application_id.trim().to_string(),
            parent_id: dto.parent_id.filter(|parent| !parent.trim().is_empty()),
            url: dto.url.trim().to_string(),
            name: dto.name,
            remark: dto.remark,
            enabled: dto.enabled,
            sort_id: dto.sort_id,
            level: dto.level,
            path: dto.path,
            extend: ModuleExtend {
                icon: dto.icon,
                expanded: dto.expanded,
            },
            audit: AuditInfo::default(),
        }
    }
}

impl From<Module> for ModuleDto {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            application_id: module.application_id,
            parent_id: module.parent_id,
            url: module.url,
            name: module.name,
            remark: module.remark,
            enabled: module.enabled,
            sort_id: module.sort_id,
            level: module.level,
            path: module.path,
            icon: module.extend.icon,
            expanded: module.extend.expanded,
            created_at: Some(module.audit.created_at),
            updated_at: Some(module.audit.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_parent_means_root() {
        let request = CreateModuleRequest::new("app", "/home", "Home").with_parent("  ");
        let module = Module::from(request);
        assert!(module.parent_id.is_none());
    }

    #[test]
    fn test_dto_json_shape() {
        let json = r#"{"applicationId":"app","url":"/users","name":"Users","icon":"user"}"#;
        let dto: ModuleDto = serde_json::from_str(json).unwrap();
        let module = Module::from(dto);

        assert_eq!(module.url, "/users");
        assert_eq!(module.extend.icon.as_deref(), Some("user"));
        assert!(module.enabled);
    }
}
