//! Module Entity
//!
//! A navigation node of an application. Modules form a tree per application;
//! `path` lists the ids from the root down to the module itself, each
//! followed by a comma, and `level` is the depth (roots are 1).

use bson::Document;

use crate::resource::{ModuleExtend, ResourceExtend, ResourceKind, ResourceRecord, RESOURCE_COLLECTION};
use crate::shared::audit_info::AuditInfo;
use crate::shared::error::{PlatformError, Result};
use crate::store::Filter;
use crate::usecase::Aggregate;

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: String,
    pub application_id: String,
    pub parent_id: Option<String>,
    /// Route of the module; empty for pure grouping nodes
    pub url: String,
    pub name: String,
    pub remark: Option<String>,
    pub enabled: bool,
    pub sort_id: i32,
    pub level: i32,
    pub path: String,
    pub extend: ModuleExtend,
    pub audit: AuditInfo,
}

impl Module {
    pub fn new(application_id: impl Into<String>, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            application_id: application_id.into(),
            parent_id: None,
            url: url.into(),
            name: name.into(),
            remark: None,
            enabled: true,
            sort_id: 0,
            level: 0,
            path: String::new(),
            extend: ModuleExtend::default(),
            audit: AuditInfo::default(),
        }
    }

    /// Derive `path` and `level` from the parent (or as a root).
    pub fn place_under(&mut self, parent: Option<&Module>) {
        match parent {
            Some(parent) => {
                self.parent_id = Some(parent.id.clone());
                self.path = format!("{}{},", parent.path, self.id);
                self.level = parent.level + 1;
            }
            None => {
                self.parent_id = None;
                self.path = format!("{},", self.id);
                self.level = 1;
            }
        }
    }

    /// Whether `other` sits strictly below this module.
    pub fn is_ancestor_of(&self, other: &Module) -> bool {
        other.id != self.id && !self.path.is_empty() && other.path.starts_with(&self.path)
    }

    pub fn to_record(&self) -> Result<ResourceRecord> {
        let mut record = ResourceRecord::new(ResourceKind::Module, &self.id, &self.url, &self.name);
        record.application_id = Some(self.application_id.clone());
        record.parent_id = self.parent_id.clone();
        record.remark = self.remark.clone();
        record.enabled = self.enabled;
        record.sort_id = self.sort_id;
        record.level = self.level;
        record.path = self.path.clone();
        record.audit = self.audit.clone();
        record.set_extend(&ResourceExtend::Module(self.extend.clone()))?;
        Ok(record)
    }
}

impl TryFrom<ResourceRecord> for Module {
    type Error = PlatformError;

    fn try_from(record: ResourceRecord) -> Result<Self> {
        record.expect_kind(ResourceKind::Module)?;
        let ResourceExtend::Module(extend) = record.extend()? else {
            return Err(PlatformError::internal(format!(
                "Module {} decoded to a foreign extend",
                record.id
            )));
        };

        Ok(Self {
            id: record.id,
            application_id: record.application_id.unwrap_or_default(),
            parent_id: record.parent_id,
            url: record.uri,
            name: record.name,
            remark: record.remark,
            enabled: record.enabled,
            sort_id: record.sort_id,
            level: record.level,
            path: record.path,
            extend,
            audit: record.audit,
        })
    }
}

impl Aggregate for Module {
    const ENTITY_TYPE: &'static str = "Module";
    const COLLECTION: &'static str = RESOURCE_COLLECTION;
    const KEY_FIELD: &'static str = "uri";
    const KEY_NAME: &'static str = "url";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// Empty urls mark grouping nodes and never conflict.
    fn natural_key(&self) -> Option<&str> {
        Some(self.url.as_str()).filter(|url| !url.is_empty())
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn validate(&self) -> Result<()> {
        if self.application_id.trim().is_empty() {
            return Err(PlatformError::validation(format!(
                "Module '{}' must belong to an application",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(PlatformError::validation("Module name is required"));
        }
        if self.parent_id.as_deref().is_some_and(|parent| parent == self.id && !self.id.is_empty()) {
            return Err(PlatformError::validation(format!(
                "Module {} cannot be its own parent",
                self.id
            )));
        }
        Ok(())
    }

    fn type_filter() -> Filter {
        Filter::new().eq("type", ResourceKind::Module.as_str())
    }

    /// Urls are unique per application.
    fn key_scope(&self) -> Filter {
        Self::type_filter().eq("applicationId", self.application_id.as_str())
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

    fn module(id: &str) -> Module {
        let mut module = Module::new("app", "", id);
        module.id = id.into();
        module
    }

    #[test]
    fn test_place_under() {
        let mut root = module("A");
        root.place_under(None);
        assert_eq!(root.path, "A,");
        assert_eq!(root.level, 1);

        let mut child = module("B");
        child.place_under(Some(&root));
        assert_eq!(child.path, "A,B,");
        assert_eq!(child.level, 2);
        assert_eq!(child.parent_id.as_deref(), Some("A"));

        assert!(root.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&root));
        assert!(!root.is_ancestor_of(&root));
    }

    #[test]
    fn test_blank_url_has_no_key() {
        assert_eq!(module("A").natural_key(), None);

        let mut routed = module("A");
        routed.url = "/users".into();
        assert_eq!(routed.natural_key(), Some("/users"));
    }

    #[test]
    fn test_url_is_stored_as_uri() {
        let mut routed = module("A");
        routed.url = "/users".into();
        routed.extend.icon = Some("user".into());
        routed.place_under(None);

        let record = routed.to_record().unwrap();
        assert_eq!(record.uri, "/users");
        assert_eq!(record.application_id.as_deref(), Some("app"));

        let back = Module::try_from(record).unwrap();
        assert_eq!(back, routed);
    }
}
