//! Resources
//!
//! The generic stored row behind modules, identity resources and API
//! resources, the kind-specific extend payloads, and the conversions from a
//! row to each typed DTO.

pub mod convert;
pub mod extend;
pub mod record;

pub use convert::{to_api_resource_dto, to_identity_resource_dto, to_module_dto};
pub use extend::{ApiResourceExtend, IdentityResourceExtend, ModuleExtend, ResourceExtend};
pub use record::{ResourceKind, ResourceRecord, RESOURCE_COLLECTION};
