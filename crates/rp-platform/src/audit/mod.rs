//! Audit Aggregate
//!
//! Append-only log of writes made through the unit of work.

pub mod entity;
pub mod repository;

pub use entity::{AuditAction, AuditLog};
pub use repository::{AuditLogRepository, AUDIT_LOG_COLLECTION};
