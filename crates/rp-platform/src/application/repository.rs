//! Application Repository

use bson::Document;

use super::entity::Application;
use crate::shared::audit_info::AuditInfo;
use crate::shared::error::Result;
use crate::usecase::{Aggregate, StoreRepository};

pub const APPLICATION_COLLECTION: &str = "applications";

pub type ApplicationRepository = StoreRepository<Application>;

impl Aggregate for Application {
    const ENTITY_TYPE: &'static str = "Application";
    const COLLECTION: &'static str = APPLICATION_COLLECTION;
    const KEY_FIELD: &'static str = "code";
    const KEY_NAME: &'static str = "code";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.code)
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn validate(&self) -> Result<()> {
        Application::validate(self)
    }

    fn to_document(&self) -> Result<Document> {
        Ok(bson::to_document(self)?)
    }

    fn from_document(document: Document) -> Result<Self> {
        Ok(bson::from_document(document)?)
    }
}
