//! Document Store
//!
//! The storage seam under every repository. A store answers filtered reads
//! and applies a batch of writes atomically; repositories and the unit of
//! work never talk to a database directly.
//!
//! - [`MongoStore`] - MongoDB, batches applied in a multi-document transaction
//! - [`MemoryStore`] - process-local, used by the dev binary and tests

use async_trait::async_trait;
use bson::{Bson, Document};

use crate::shared::error::Result;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Field holding the primary key in every collection
pub const ID_FIELD: &str = "_id";

/// Soft-delete marker; rows with `true` are invisible to reads
pub const DELETED_FIELD: &str = "isDeleted";

/// Read-side filter understood by every store.
///
/// Field equality, an id allow-list and a single excluded id. Soft-deleted
/// rows are skipped unless `include_deleted` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub equals: Vec<(String, Bson)>,
    pub id_in: Option<Vec<String>>,
    pub id_not: Option<String>,
    pub include_deleted: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.equals.push((field.into(), value.into()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.ids(vec![id.into()])
    }

    pub fn ids(mut self, ids: Vec<String>) -> Self {
        self.id_in = Some(ids);
        self
    }

    pub fn exclude_id(mut self, id: impl Into<String>) -> Self {
        self.id_not = Some(id.into());
        self
    }

    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Evaluate against a single document; `null` matches a missing field.
    pub fn matches(&self, doc: &Document) -> bool {
        if !self.include_deleted && doc.get_bool(DELETED_FIELD).unwrap_or(false) {
            return false;
        }

        let id = doc.get_str(ID_FIELD).unwrap_or_default();
        if let Some(ids) = &self.id_in {
            if !ids.iter().any(|candidate| candidate == id) {
                return false;
            }
        }
        if self.id_not.as_deref() == Some(id) {
            return false;
        }

        self.equals.iter().all(|(field, expected)| match doc.get(field) {
            Some(actual) => actual == expected,
            None => matches!(expected, Bson::Null),
        })
    }
}

/// Identifies which natural key a write touches, so a store-level
/// uniqueness violation can be reported as the same warning the
/// service-level check would have produced.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyClaim {
    pub entity_type: &'static str,
    pub field: &'static str,
    pub value: String,
}

/// A single staged write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Insert a new row; fails if the id already exists.
    Insert {
        collection: &'static str,
        document: Document,
        claim: Option<KeyClaim>,
    },
    /// Replace the row with this id wholesale, inserting it if missing.
    Replace {
        collection: &'static str,
        id: String,
        document: Document,
        claim: Option<KeyClaim>,
    },
}

impl WriteOp {
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Insert { collection, .. } | Self::Replace { collection, .. } => collection,
        }
    }

    pub fn claim(&self) -> Option<&KeyClaim> {
        match self {
            Self::Insert { claim, .. } | Self::Replace { claim, .. } => claim.as_ref(),
        }
    }
}

/// A uniqueness constraint enforced by the store itself.
///
/// Only live rows (not soft-deleted) whose `key_field` is a non-empty
/// string take part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueIndex {
    pub name: &'static str,
    pub collection: &'static str,
    /// Scope fields followed by the key field
    pub fields: &'static [&'static str],
    pub key_field: &'static str,
}

/// Every uniqueness constraint the platform relies on.
pub const UNIQUE_INDEXES: &[UniqueIndex] = &[
    UniqueIndex {
        name: "ux_applications_code",
        collection: "applications",
        fields: &["code"],
        key_field: "code",
    },
    UniqueIndex {
        name: "ux_resources_type_application_uri",
        collection: "resources",
        fields: &["type", "applicationId", "uri"],
        key_field: "uri",
    },
];

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Count live rows matching `filter`.
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Fetch rows matching `filter`, in storage order.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Apply every op or none of them.
    async fn apply(&self, ops: Vec<WriteOp>) -> Result<()>;
}
