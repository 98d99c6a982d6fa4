//! Shared Module
//!
//! Cross-cutting concerns and shared utilities.

pub mod audit_info;
pub mod error;
pub mod ids;
pub mod indexes;
pub mod tsid;

// Re-export commonly used items
pub use audit_info::AuditInfo;
pub use error::{ErrorKind, PlatformError, Result};
pub use ids::parse_id_list;
pub use indexes::initialize_indexes;
pub use tsid::TsidGenerator;
