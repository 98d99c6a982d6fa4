//! Execution Context
//!
//! Carries tracing IDs and principal information through a single service
//! call. Audit stamps and audit log entries are populated from it.

use chrono::{DateTime, Utc};

use crate::shared::tsid::TsidGenerator;

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Unique ID for this execution (generated)
    pub execution_id: String,
    /// ID for distributed tracing (usually from original request)
    pub correlation_id: String,
    /// ID of the principal performing the action
    pub principal_id: String,
    /// When the execution was initiated
    pub initiated_at: DateTime<Utc>,
}

impl ExecutionContext {
    /// Create a context for a fresh request; correlation starts as the execution ID.
    pub fn create(principal_id: impl Into<String>) -> Self {
        let exec_id = format!("exec-{}", TsidGenerator::generate());
        Self {
            execution_id: exec_id.clone(),
            correlation_id: exec_id,
            principal_id: principal_id.into(),
            initiated_at: Utc::now(),
        }
    }

    /// Create a context that joins an upstream correlation ID.
    pub fn with_correlation(
        principal_id: impl Into<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            execution_id: format!("exec-{}", TsidGenerator::generate()),
            correlation_id: correlation_id.into(),
            principal_id: principal_id.into(),
            initiated_at: Utc::now(),
        }
    }

    /// Context for work the platform does on its own behalf (seeding, migrations).
    pub fn system() -> Self {
        Self::create("system")
    }
}
