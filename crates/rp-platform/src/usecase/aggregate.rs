//! Persistence contract shared by every aggregate root.

use bson::Document;

use crate::shared::audit_info::AuditInfo;
use crate::shared::error::Result;
use crate::store::{Filter, KeyClaim};

pub trait Aggregate: Clone + Send + Sync + 'static {
    /// Name used in errors and audit entries
    const ENTITY_TYPE: &'static str;
    const COLLECTION: &'static str;
    /// Stored field holding the natural key
    const KEY_FIELD: &'static str;
    /// Key name as reported in duplicate warnings
    const KEY_NAME: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Natural key; `None` or empty never conflicts.
    fn natural_key(&self) -> Option<&str>;

    fn audit(&self) -> &AuditInfo;
    fn audit_mut(&mut self) -> &mut AuditInfo;

    /// Field-level checks run before any read or write.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Rows of the collection that belong to this aggregate.
    fn type_filter() -> Filter {
        Filter::new()
    }

    /// Rows among which the natural key must be unique.
    fn key_scope(&self) -> Filter {
        Self::type_filter()
    }

    fn to_document(&self) -> Result<Document>;
    fn from_document(document: Document) -> Result<Self>;

    fn key_claim(&self) -> Option<KeyClaim> {
        self.natural_key()
            .filter(|key| !key.is_empty())
            .map(|key| KeyClaim {
                entity_type: Self::ENTITY_TYPE,
                field: Self::KEY_NAME,
                value: key.to_string(),
            })
    }
}
