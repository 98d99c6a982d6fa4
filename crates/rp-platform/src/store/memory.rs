//! In-memory document store.
//!
//! Collections are insertion-ordered maps of id → document behind one
//! `RwLock`. A batch is applied to a copy of the touched collections, checked
//! against the unique indexes, and swapped in only if every op succeeded.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bson::{Bson, Document};
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{DocumentStore, Filter, UniqueIndex, WriteOp, ID_FIELD, DELETED_FIELD, UNIQUE_INDEXES};
use crate::shared::error::{PlatformError, Result};

type Rows = IndexMap<String, Document>;

pub struct MemoryStore {
    collections: RwLock<HashMap<String, Rows>>,
    unique_indexes: Vec<UniqueIndex>,
    reads: AtomicUsize,
    commits: AtomicUsize,
}

impl MemoryStore {
    /// Store enforcing the platform's [`UNIQUE_INDEXES`].
    pub fn new() -> Self {
        Self::with_unique_indexes(UNIQUE_INDEXES.to_vec())
    }

    pub fn with_unique_indexes(unique_indexes: Vec<UniqueIndex>) -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            unique_indexes,
            reads: AtomicUsize::new(0),
            commits: AtomicUsize::new(0),
        }
    }

    /// Number of `count`/`find` calls served.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of batches successfully applied.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Every row in a collection, soft-deleted ones included.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .get(collection)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Write a row directly, bypassing batches and constraints.
    pub fn put_raw(&self, collection: &str, document: Document) {
        let id = document.get_str(ID_FIELD).unwrap_or_default().to_string();
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id, document);
    }

    fn apply_op(staged: &mut HashMap<String, Rows>, op: &WriteOp) -> Result<()> {
        let rows = staged.entry(op.collection().to_string()).or_default();

        match op {
            WriteOp::Insert { collection, document, .. } => {
                let id = document_id(document)?;
                if rows.contains_key(&id) {
                    return Err(PlatformError::transaction(format!(
                        "{} already contains a row with id {}",
                        collection, id
                    )));
                }
                rows.insert(id, document.clone());
            }
            WriteOp::Replace { id, document, .. } => {
                let mut document = document.clone();
                document.insert(ID_FIELD, id.as_str());
                rows.insert(id.clone(), document);
            }
        }

        Ok(())
    }

    /// First unique-index violation in `rows`, as (index, key tuple).
    fn find_violation<'a>(&'a self, collection: &str, rows: &Rows) -> Option<(&'a UniqueIndex, Vec<String>)> {
        for index in self.unique_indexes.iter().filter(|i| i.collection == collection) {
            let mut seen: HashMap<Vec<String>, &str> = HashMap::new();

            for (id, row) in rows {
                if row.get_bool(DELETED_FIELD).unwrap_or(false) {
                    continue;
                }
                match row.get_str(index.key_field) {
                    Ok(key) if !key.is_empty() => {}
                    _ => continue,
                }

                let tuple: Vec<String> = index
                    .fields
                    .iter()
                    .map(|field| row.get(*field).map(key_part).unwrap_or_else(|| key_part(&Bson::Null)))
                    .collect();

                if let Some(other) = seen.insert(tuple.clone(), id.as_str()) {
                    debug!(index = index.name, first = other, second = %id, "Unique index violated");
                    return Some((index, tuple));
                }
            }
        }
        None
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let collections = self.collections.read();
        let count = collections
            .get(collection)
            .map(|rows| rows.values().filter(|row| filter.matches(row)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|rows| rows.values().filter(|row| filter.matches(row)).cloned().collect())
            .unwrap_or_default())
    }

    async fn apply(&self, ops: Vec<WriteOp>) -> Result<()> {
        let mut collections = self.collections.write();

        let mut staged: HashMap<String, Rows> = HashMap::new();
        for op in &ops {
            let name = op.collection();
            if !staged.contains_key(name) {
                staged.insert(name.to_string(), collections.get(name).cloned().unwrap_or_default());
            }
        }

        for op in &ops {
            Self::apply_op(&mut staged, op)?;
        }

        for (name, rows) in &staged {
            if let Some((index, tuple)) = self.find_violation(name, rows) {
                warn!(index = index.name, "Rejecting batch on unique index violation");
                let key = tuple.last().cloned().unwrap_or_default();
                let claim = ops
                    .iter()
                    .filter(|op| op.collection() == index.collection)
                    .filter_map(WriteOp::claim)
                    .find(|claim| key_part(&Bson::String(claim.value.clone())) == key);

                return Err(match claim {
                    Some(claim) => PlatformError::duplicate(claim.entity_type, claim.field, claim.value.clone()),
                    None => PlatformError::transaction(format!("unique index {} violated", index.name)),
                });
            }
        }

        collections.extend(staged);
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn document_id(document: &Document) -> Result<String> {
    document
        .get_str(ID_FIELD)
        .map(str::to_string)
        .map_err(|_| PlatformError::transaction("document is missing a string _id"))
}

fn key_part(value: &Bson) -> String {
    match value {
        Bson::Null => String::from("\u{0}null"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeyClaim;
    use bson::doc;

    fn claim(value: &str) -> Option<KeyClaim> {
        Some(KeyClaim {
            entity_type: "Application",
            field: "code",
            value: value.to_string(),
        })
    }

    fn insert(id: &str, code: &str) -> WriteOp {
        WriteOp::Insert {
            collection: "applications",
            document: doc! { "_id": id, "code": code, "isDeleted": false },
            claim: claim(code),
        }
    }

    #[test]
    fn test_reads_see_committed_rows() {
        let store = MemoryStore::new();
        tokio_test::block_on(store.apply(vec![insert("a", "one"), insert("b", "two")])).unwrap();

        let count = tokio_test::block_on(store.count("applications", &Filter::new())).unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.commit_count(), 1);
        assert_eq!(store.read_count(), 1);
    }

    #[test]
    fn test_conflicting_batch_is_rejected_whole() {
        let store = MemoryStore::new();
        tokio_test::block_on(store.apply(vec![insert("a", "one")])).unwrap();

        let err = tokio_test::block_on(store.apply(vec![insert("b", "two"), insert("c", "one")])).unwrap_err();
        assert!(err.is_duplicate());
        assert!(err.to_string().contains("'one'"));

        // "b" must not have landed
        assert_eq!(store.documents("applications").len(), 1);
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn test_soft_deleted_rows_release_their_key() {
        let store = MemoryStore::new();
        tokio_test::block_on(store.apply(vec![insert("a", "one")])).unwrap();
        tokio_test::block_on(store.apply(vec![WriteOp::Replace {
            collection: "applications",
            id: "a".to_string(),
            document: doc! { "code": "one", "isDeleted": true },
            claim: None,
        }]))
        .unwrap();

        tokio_test::block_on(store.apply(vec![insert("b", "one")])).unwrap();
        let live = tokio_test::block_on(store.find("applications", &Filter::new())).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].get_str("_id").unwrap(), "b");
    }

    #[test]
    fn test_scoped_index_allows_same_key_in_other_scope() {
        let store = MemoryStore::new();
        let resource = |id: &str, kind: &str| WriteOp::Insert {
            collection: "resources",
            document: doc! { "_id": id, "type": kind, "applicationId": Bson::Null, "uri": "shared", "isDeleted": false },
            claim: None,
        };

        tokio_test::block_on(store.apply(vec![
            resource("r1", "API_RESOURCE"),
            resource("r2", "IDENTITY_RESOURCE"),
        ]))
        .unwrap();

        let err = tokio_test::block_on(store.apply(vec![resource("r3", "API_RESOURCE")])).unwrap_err();
        assert!(matches!(err, PlatformError::Transaction { .. }));
    }

    #[test]
    fn test_empty_keys_never_conflict() {
        let store = MemoryStore::new();
        let module = |id: &str| WriteOp::Insert {
            collection: "resources",
            document: doc! { "_id": id, "type": "MODULE", "applicationId": "app", "uri": "", "isDeleted": false },
            claim: None,
        };

        tokio_test::block_on(store.apply(vec![module("m1"), module("m2")])).unwrap();
        assert_eq!(store.documents("resources").len(), 2);
    }

    #[test]
    fn test_insert_existing_id_fails() {
        let store = MemoryStore::new();
        tokio_test::block_on(store.apply(vec![insert("a", "one")])).unwrap();

        let err = tokio_test::block_on(store.apply(vec![insert("a", "two")])).unwrap_err();
        assert!(matches!(err, PlatformError::Transaction { .. }));
    }
}
