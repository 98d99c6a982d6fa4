//! Unit of Work
//!
//! A [`Transaction`] collects the writes (and their audit entries) staged by
//! repositories during one service call. [`UnitOfWork::commit`] hands them to
//! the store as a single atomic batch. A transaction dropped without commit
//! discards everything it staged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::audit::{AuditAction, AuditLog, AUDIT_LOG_COLLECTION};
use crate::shared::error::Result;
use crate::store::{DocumentStore, WriteOp};
use crate::usecase::ExecutionContext;

pub struct Transaction {
    ctx: ExecutionContext,
    ops: Vec<WriteOp>,
    audit_logs: Vec<AuditLog>,
    finished: bool,
}

impl Transaction {
    pub fn new(ctx: &ExecutionContext) -> Self {
        Self {
            ctx: ctx.clone(),
            ops: Vec::new(),
            audit_logs: Vec::new(),
            finished: false,
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Stage a write together with its audit entry.
    pub fn stage(&mut self, op: WriteOp, entity_type: &str, entity_id: &str, action: AuditAction) {
        self.ops.push(op);
        self.audit_logs
            .push(AuditLog::new(entity_type, entity_id, action, &self.ctx));
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn into_parts(mut self) -> (Vec<WriteOp>, Vec<AuditLog>) {
        self.finished = true;
        (
            std::mem::take(&mut self.ops),
            std::mem::take(&mut self.audit_logs),
        )
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished && !self.ops.is_empty() {
            debug!(
                execution_id = %self.ctx.execution_id,
                discarded = self.ops.len(),
                "Transaction dropped without commit"
            );
        }
    }
}

/// Transaction boundary for a service call.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn begin(&self, ctx: &ExecutionContext) -> Transaction {
        Transaction::new(ctx)
    }

    /// Apply every staged write and audit entry atomically.
    async fn commit(&self, tx: Transaction) -> Result<()>;
}

/// Unit of work backed by a [`DocumentStore`].
pub struct StoreUnitOfWork {
    store: Arc<dyn DocumentStore>,
}

impl StoreUnitOfWork {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UnitOfWork for StoreUnitOfWork {
    async fn commit(&self, tx: Transaction) -> Result<()> {
        if tx.is_empty() {
            debug!(execution_id = %tx.context().execution_id, "Nothing staged, skipping commit");
            return Ok(());
        }

        let execution_id = tx.context().execution_id.clone();
        let (mut ops, audit_logs) = tx.into_parts();

        let writes = ops.len();
        for log in &audit_logs {
            ops.push(WriteOp::Insert {
                collection: AUDIT_LOG_COLLECTION,
                document: bson::to_document(log)?,
                claim: None,
            });
        }

        self.store.apply(ops).await?;

        debug!(execution_id = %execution_id, writes, "Successfully committed transaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Filter, MemoryStore};
    use bson::doc;

    fn insert(id: &str) -> WriteOp {
        WriteOp::Insert {
            collection: "applications",
            document: doc! { "_id": id, "code": id, "isDeleted": false },
            claim: None,
        }
    }

    #[tokio::test]
    async fn test_commit_writes_rows_and_audit_logs() {
        let store = Arc::new(MemoryStore::new());
        let uow = StoreUnitOfWork::new(store.clone());
        let ctx = ExecutionContext::create("alice");

        let mut tx = uow.begin(&ctx);
        tx.stage(insert("a"), "Application", "a", AuditAction::Create);
        tx.stage(insert("b"), "Application", "b", AuditAction::Create);
        uow.commit(tx).await.unwrap();

        assert_eq!(store.commit_count(), 1);
        assert_eq!(store.count("applications", &Filter::new()).await.unwrap(), 2);
        assert_eq!(store.count(AUDIT_LOG_COLLECTION, &Filter::new()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_commit_touches_nothing() {
        let store = Arc::new(MemoryStore::new());
        let uow = StoreUnitOfWork::new(store.clone());

        let tx = uow.begin(&ExecutionContext::system());
        assert!(tx.is_empty());
        uow.commit(tx).await.unwrap();

        assert_eq!(store.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = Arc::new(MemoryStore::new());
        let uow = StoreUnitOfWork::new(store.clone());

        {
            let mut tx = uow.begin(&ExecutionContext::system());
            tx.stage(insert("a"), "Application", "a", AuditAction::Create);
            assert_eq!(tx.len(), 1);
        }

        assert_eq!(store.commit_count(), 0);
        assert!(store.documents("applications").is_empty());
    }
}
