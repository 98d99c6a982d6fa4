//! API Resource Aggregate

pub mod dto;
pub mod entity;
pub mod service;

pub use dto::ApiResourceDto;
pub use entity::ApiResource;
pub use service::ApiResourceService;

use crate::usecase::StoreRepository;

pub type ApiResourceRepository = StoreRepository<ApiResource>;
