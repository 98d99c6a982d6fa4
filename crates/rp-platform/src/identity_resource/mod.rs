//! Identity Resource Aggregate

pub mod dto;
pub mod entity;
pub mod service;

pub use dto::IdentityResourceDto;
pub use entity::IdentityResource;
pub use service::IdentityResourceService;

use crate::usecase::StoreRepository;

pub type IdentityResourceRepository = StoreRepository<IdentityResource>;
