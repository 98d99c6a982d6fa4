//! API Resource Entity
//!
//! A protected API, identified by a uri unique among live API resources.

use bson::{Bson, Document};

use crate::resource::{ApiResourceExtend, ResourceExtend, ResourceKind, ResourceRecord, RESOURCE_COLLECTION};
use crate::shared::audit_info::AuditInfo;
use crate::shared::error::{PlatformError, Result};
use crate::store::Filter;
use crate::usecase::Aggregate;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResource {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub remark: Option<String>,
    pub enabled: bool,
    pub sort_id: i32,
    pub extend: ApiResourceExtend,
    pub audit: AuditInfo,
}

impl ApiResource {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            uri: uri.into(),
            name: name.into(),
            remark: None,
            enabled: true,
            sort_id: 0,
            extend: ApiResourceExtend::default(),
            audit: AuditInfo::default(),
        }
    }

    pub fn to_record(&self) -> Result<ResourceRecord> {
        let mut record = ResourceRecord::new(ResourceKind::ApiResource, &self.id, &self.uri, &self.name);
        record.remark = self.remark.clone();
        record.enabled = self.enabled;
        record.sort_id = self.sort_id;
        record.audit = self.audit.clone();
        record.set_extend(&ResourceExtend::ApiResource(self.extend.clone()))?;
        Ok(record)
    }
}

impl TryFrom<ResourceRecord> for ApiResource {
    type Error = PlatformError;

    fn try_from(record: ResourceRecord) -> Result<Self> {
        record.expect_kind(ResourceKind::ApiResource)?;
        let ResourceExtend::ApiResource(extend) = record.extend()? else {
            return Err(PlatformError::internal(format!(
                "API resource {} decoded to a foreign extend",
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

impl Aggregate for ApiResource {
    const ENTITY_TYPE: &'static str = "ApiResource";
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
            return Err(PlatformError::validation("API resource uri is required"));
        }
        if self.name.trim().is_empty() {
            return Err(PlatformError::validation(format!(
                "API resource name is required (uri '{}')",
                self.uri
            )));
        }
        Ok(())
    }

    fn type_filter() -> Filter {
        Filter::new().eq("type", ResourceKind::ApiResource.as_str())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip_keeps_extend() {
        let mut api = ApiResource::new("api1", "Orders");
        api.extend.scopes = vec!["orders.read".into()];
        api.id = "r1".into();
        api.extend.display_name = Some("Orders API".into());

        let record = api.to_record().unwrap();
        assert_eq!(record.kind, ResourceKind::ApiResource);
        assert!(record.extend.as_deref().unwrap().contains("orders.read"));

        let back = ApiResource::try_from(record).unwrap();
        assert_eq!(back, api);
    }

    #[test]
    fn test_module_row_is_rejected() {
        let record = ResourceRecord::new(ResourceKind::Module, "m1", "home", "Home");
        let err = ApiResource::try_from(record).unwrap_err();
        assert!(matches!(err, PlatformError::ResourceTypeMismatch { .. }));
    }

    #[test]
    fn test_validate() {
        assert!(ApiResource::new("api1", "Orders").validate().is_ok());
        assert!(ApiResource::new(" ", "Orders").validate().unwrap_err().is_warning());
    }
}
