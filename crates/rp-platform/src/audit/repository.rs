//! Audit Log Repository
//!
//! Read side only; entries are written by the unit of work.

use std::sync::Arc;

use crate::audit::entity::AuditLog;
use crate::shared::error::Result;
use crate::store::{DocumentStore, Filter};

pub const AUDIT_LOG_COLLECTION: &str = "audit_logs";

pub struct AuditLogRepository {
    store: Arc<dyn DocumentStore>,
}

impl AuditLogRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Entries for one entity, newest first.
    pub async fn find_by_entity(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditLog>> {
        let filter = Filter::new()
            .eq("entityType", entity_type)
            .eq("entityId", entity_id);
        self.collect(filter).await
    }

    pub async fn find_by_correlation(&self, correlation_id: &str) -> Result<Vec<AuditLog>> {
        self.collect(Filter::new().eq("correlationId", correlation_id)).await
    }

    async fn collect(&self, filter: Filter) -> Result<Vec<AuditLog>> {
        let mut logs = self
            .store
            .find(AUDIT_LOG_COLLECTION, &filter)
            .await?
            .into_iter()
            .map(bson::from_document::<AuditLog>)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        logs.sort_by(|a, b| b.performed_at.cmp(&a.performed_at).then_with(|| b.id.cmp(&a.id)));
        Ok(logs)
    }
}
