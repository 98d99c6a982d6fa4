//! Audit Log Entity
//!
//! One entry per staged write, committed in the same batch as the write.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::tsid::TsidGenerator;
use crate::usecase::ExecutionContext;

/// Audit action type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Entity created
    Create,
    /// Entity updated
    Update,
    /// Entity soft-deleted
    Delete,
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Entity type affected (e.g., "Application", "Module")
    pub entity_type: String,

    pub entity_id: String,

    pub action: AuditAction,

    /// Principal who performed the action
    pub principal_id: String,

    pub execution_id: String,

    pub correlation_id: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub performed_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        action: AuditAction,
        ctx: &ExecutionContext,
    ) -> Self {
        Self {
            id: TsidGenerator::generate(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            action,
            principal_id: ctx.principal_id.clone(),
            execution_id: ctx.execution_id.clone(),
            correlation_id: ctx.correlation_id.clone(),
            performed_at: ctx.initiated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_copies_context() {
        let ctx = ExecutionContext::with_correlation("alice", "corr-1");
        let log = AuditLog::new("Application", "app-1", AuditAction::Create, &ctx);

        assert_eq!(log.principal_id, "alice");
        assert_eq!(log.correlation_id, "corr-1");
        assert_eq!(log.performed_at, ctx.initiated_at);
        assert_eq!(log.id.len(), 13);
    }

    #[test]
    fn test_action_serializes_screaming() {
        let json = serde_json::to_string(&AuditAction::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
    }
}
