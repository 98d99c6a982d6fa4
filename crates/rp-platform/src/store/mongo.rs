//! MongoDB document store.
//!
//! Every batch runs in a multi-document transaction, so a replica set (or a
//! single-node replica set in development) is required.

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, ClientSession, Database};
use tracing::{debug, error, info};

use super::{DocumentStore, Filter, KeyClaim, WriteOp, DELETED_FIELD, ID_FIELD};
use crate::shared::error::{PlatformError, Result};

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub fn new(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    /// Connect and verify the server answers a ping.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let store = Self::new(client, database_name);
        store.database.run_command(doc! { "ping": 1 }).await?;
        info!(database = database_name, "Connected to MongoDB");
        Ok(store)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    async fn apply_op(&self, session: &mut ClientSession, op: &WriteOp) -> Result<()> {
        match op {
            WriteOp::Insert { collection, document, claim } => {
                self.database
                    .collection::<Document>(collection)
                    .insert_one(document)
                    .session(&mut *session)
                    .await
                    .map_err(|e| map_write_error(e, claim.as_ref()))?;
            }
            WriteOp::Replace { collection, id, document, claim } => {
                self.database
                    .collection::<Document>(collection)
                    .replace_one(doc! { ID_FIELD: id.as_str() }, document)
                    .upsert(true)
                    .session(&mut *session)
                    .await
                    .map_err(|e| map_write_error(e, claim.as_ref()))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let count = self
            .database
            .collection::<Document>(collection)
            .count_documents(to_query(filter))
            .await?;
        Ok(count)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(to_query(filter))
            .sort(doc! { ID_FIELD: 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn apply(&self, ops: Vec<WriteOp>) -> Result<()> {
        if ops.is_empty() {
            return Ok(());
        }

        let mut session = self.client.start_session().await.map_err(|e| {
            error!("Failed to start MongoDB session: {}", e);
            PlatformError::transaction(format!("Failed to start session: {}", e))
        })?;

        session.start_transaction().await.map_err(|e| {
            error!("Failed to start transaction: {}", e);
            PlatformError::transaction(format!("Failed to start transaction: {}", e))
        })?;

        for op in &ops {
            if let Err(e) = self.apply_op(&mut session, op).await {
                let _ = session.abort_transaction().await;
                if !e.is_duplicate() {
                    error!(collection = op.collection(), "Failed to apply write: {}", e);
                }
                return Err(e);
            }
        }

        session.commit_transaction().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            PlatformError::transaction(format!("Failed to commit transaction: {}", e))
        })?;

        debug!(ops = ops.len(), "Committed batch");
        Ok(())
    }
}

/// Translate a [`Filter`] into a query document.
pub(crate) fn to_query(filter: &Filter) -> Document {
    let mut query = Document::new();

    for (field, value) in &filter.equals {
        query.insert(field.clone(), value.clone());
    }

    let mut id_clause = Document::new();
    if let Some(ids) = &filter.id_in {
        id_clause.insert("$in", ids.iter().map(|id| Bson::String(id.clone())).collect::<Vec<_>>());
    }
    if let Some(id) = &filter.id_not {
        id_clause.insert("$ne", id.as_str());
    }
    if !id_clause.is_empty() {
        query.insert(ID_FIELD, id_clause);
    }

    if !filter.include_deleted {
        query.insert(DELETED_FIELD, doc! { "$ne": true });
    }

    query
}

/// Surface a duplicate-key rejection as the same warning the service-level
/// check produces.
fn map_write_error(err: mongodb::error::Error, claim: Option<&KeyClaim>) -> PlatformError {
    let duplicate = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY,
        _ => false,
    };

    match (duplicate, claim) {
        (true, Some(claim)) => {
            PlatformError::duplicate(claim.entity_type, claim.field, claim.value.clone())
        }
        _ => PlatformError::Database(err),
    }
}
