//! Resource row → typed DTO.
//!
//! Read-side entry point for callers holding raw `resources` rows (exports,
//! cross-kind scans) rather than going through a service. The services' `get`
//! and `list` produce the same DTOs from the same rows.
//!
//! Common columns map by name; the extend JSON is decoded for the row's kind
//! and its fields overlaid on the result. Malformed JSON or a row of the
//! wrong kind is an internal error, never a validation warning.

use super::record::ResourceRecord;
use crate::api_resource::{ApiResource, ApiResourceDto};
use crate::identity_resource::{IdentityResource, IdentityResourceDto};
use crate::module::{Module, ModuleDto};
use crate::shared::error::Result;

pub fn to_module_dto(record: ResourceRecord) -> Result<ModuleDto> {
    Module::try_from(record).map(ModuleDto::from)
}

pub fn to_identity_resource_dto(record: ResourceRecord) -> Result<IdentityResourceDto> {
    IdentityResource::try_from(record).map(IdentityResourceDto::from)
}

pub fn to_api_resource_dto(record: ResourceRecord) -> Result<ApiResourceDto> {
    ApiResource::try_from(record).map(ApiResourceDto::from)
}
