//! Identity Resource Entity
//!
//! A named group of user claims (e.g. `openid`, `profile`) a client can
//! request as a scope.

use bson::{Bson, Document};

use crate::resource::{IdentityResourceExtend, ResourceExtend, ResourceKind, ResourceRecord, RESOURCE_COLLECTION};
use crate::shared::audit_info::AuditInfo;
use crate::shared::error::{PlatformError, Result};
use crate::store::Filter;
use crate::usecase::Aggregate;

#[derive(Debug, Clone, PartialEq)]
pub struct IdentityResource {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub remark: Option<String>,
    pub enabled: bool,
    pub sort_id: i32,
    pub extend: IdentityResourceExtend,
    pub audit: AuditInfo,
}

impl IdentityResource {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            uri: uri.into(),
            name: name.into(),
            remark: None,
            enabled: true,
            sort_id: 0,
            extend: IdentityResourceExtend::default(),
            audit: AuditInfo::default(),
        }
    }

    pub fn to_record(&self) -> Result<ResourceRecord> {
        let mut record = ResourceRecord::new(ResourceKind::IdentityResource, &self.id, &self.uri, &self.name);
        record.remark = self.remark.clone();
        record.enabled = self.enabled;
        record.sort_id = self.sort_id;
        record.audit = self.audit.clone();
        record.set_extend(&ResourceExtend::IdentityResource(self.extend.clone()))?;
        Ok(record)
    }
}

impl TryFrom<ResourceRecord> for IdentityResource {
    type Error = PlatformError;

    fn try_from(record: ResourceRecord) -> Result<Self> {
        record.expect_kind(ResourceKind::IdentityResource)?;
        let ResourceExtend::IdentityResource(extend) = record.extend()? else {
            return Err(PlatformError::internal(format!(
                "Identity resource {} decoded to a foreign extend",
                record.id
            )));
        };

        Ok(Self {
            id: record.id,
            uri: record.uri,
            name: record.name,
            remark: record.remark,
            enabled: record.enabled,
            sort_id: record.sort_id,
            extend,
            audit: record.audit,
        })
    }
}

impl Aggregate for IdentityResource {
    const ENTITY_TYPE: &'static str = "IdentityResource";
    const COLLECTION: &'static str = RESOURCE_COLLECTION;
    const KEY_FIELD: &'static str = "uri";
    const KEY_NAME: &'static str = "uri";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.uri)
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(PlatformError::validation("Identity resource uri is required"));
        }
        if self.name.trim().is_empty() {
            return Err(PlatformError::validation(format!(
                "Identity resource name is required (uri '{}')",
                self.uri
            )));
        }
        Ok(())
    }

    fn type_filter() -> Filter {
        Filter::new().eq("type", ResourceKind::IdentityResource.as_str())
    }

    fn key_scope(&self) -> Filter {
        Self::type_filter().eq("applicationId", Bson::Null)
    }

    fn to_document(&self) -> Result<Document> {
        self.to_record()?.to_document()
    }

    fn from_document(document: Document) -> Result<Self> {
        Self::try_from(ResourceRecord::from_document(document)?)
    }
}
