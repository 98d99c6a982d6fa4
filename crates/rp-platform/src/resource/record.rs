//! Resource Record
//!
//! Modules, identity resources and API resources share one stored row shape
//! in the `resources` collection, told apart by `type`. Kind-specific fields
//! live in `extend`, a JSON text column.

use serde::{Deserialize, Serialize};

use super::extend::ResourceExtend;
use crate::shared::audit_info::AuditInfo;
use crate::shared::error::{PlatformError, Result};

pub const RESOURCE_COLLECTION: &str = "resources";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Module,
    IdentityResource,
    ApiResource,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "MODULE",
            Self::IdentityResource => "IDENTITY_RESOURCE",
            Self::ApiResource => "API_RESOURCE",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ResourceKind,

    /// Owning application; modules only
    #[serde(default)]
    pub application_id: Option<String>,

    /// Natural key; a module's url
    #[serde(default)]
    pub uri: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub sort_id: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Comma-terminated ancestor chain ending with this row's id
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub level: i32,

    /// Kind-specific fields as JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend: Option<String>,

    #[serde(default)]
    pub audit: AuditInfo,

    #[serde(default)]
    pub is_deleted: bool,
}

fn default_true() -> bool {
    true
}

impl ResourceRecord {
    pub fn new(kind: ResourceKind, id: impl Into<String>, uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            application_id: None,
            uri: uri.into(),
            name: name.into(),
            remark: None,
            enabled: true,
            sort_id: 0,
            parent_id: None,
            path: String::new(),
            level: 0,
            extend: None,
            audit: AuditInfo::default(),
            is_deleted: false,
        }
    }

    pub fn from_document(document: bson::Document) -> Result<Self> {
        Ok(bson::from_document(document)?)
    }

    pub fn to_document(&self) -> Result<bson::Document> {
        Ok(bson::to_document(self)?)
    }

    /// Fail with a data-integrity error unless this row is of `expected` kind.
    pub fn expect_kind(&self, expected: ResourceKind) -> Result<()> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(PlatformError::ResourceTypeMismatch {
                resource_id: self.id.clone(),
                expected: expected.as_str(),
                actual: self.kind.as_str(),
            })
        }
    }

    /// Decode the extend column for this row's kind. Absent or blank text
    /// yields the kind's default; malformed text is a data-integrity error.
    pub fn extend(&self) -> Result<ResourceExtend> {
        ResourceExtend::decode(self.kind, self.extend.as_deref()).map_err(|source| {
            PlatformError::CorruptExtend {
                resource_id: self.id.clone(),
                source,
            }
        })
    }

    pub fn set_extend(&mut self, extend: &ResourceExtend) -> Result<()> {
        if extend.kind() != self.kind {
            return Err(PlatformError::ResourceTypeMismatch {
                resource_id: self.id.clone(),
                expected: self.kind.as_str(),
                actual: extend.kind().as_str(),
            });
        }
        self.extend = Some(extend.encode()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::extend::{ApiResourceExtend, ModuleExtend};

    #[test]
    fn test_kind_wire_names() {
        let record = ResourceRecord::new(ResourceKind::IdentityResource, "r1", "openid", "OpenID");
        let doc = record.to_document().unwrap();
        assert_eq!(doc.get_str("type").unwrap(), "IDENTITY_RESOURCE");
        assert_eq!(doc.get_str("_id").unwrap(), "r1");
    }

    #[test]
    fn test_blank_extend_decodes_to_default() {
        let mut record = ResourceRecord::new(ResourceKind::Module, "m1", "", "Root");
        assert_eq!(record.extend().unwrap(), ResourceExtend::Module(ModuleExtend::default()));

        record.extend = Some("   ".into());
        assert_eq!(record.extend().unwrap(), ResourceExtend::Module(ModuleExtend::default()));
    }

    #[test]
    fn test_malformed_extend_is_internal() {
        let mut record = ResourceRecord::new(ResourceKind::Module, "m1", "", "Root");
        record.extend = Some("{\"icon\":".into());

        let err = record.extend().unwrap_err();
        assert!(matches!(err, PlatformError::CorruptExtend { ref resource_id, .. } if resource_id == "m1"));
        assert!(!err.is_warning());
    }

    #[test]
    fn test_expect_kind() {
        let record = ResourceRecord::new(ResourceKind::ApiResource, "r1", "api1", "API");
        assert!(record.expect_kind(ResourceKind::ApiResource).is_ok());

        let err = record.expect_kind(ResourceKind::Module).unwrap_err();
        assert!(matches!(err, PlatformError::ResourceTypeMismatch { expected: "MODULE", .. }));
    }

    #[test]
    fn test_set_extend_checks_kind() {
        let mut record = ResourceRecord::new(ResourceKind::Module, "m1", "", "Root");
        let api = ResourceExtend::ApiResource(ApiResourceExtend::default());

        assert!(record.set_extend(&api).is_err());
        assert!(record.extend.is_none());
    }
}
