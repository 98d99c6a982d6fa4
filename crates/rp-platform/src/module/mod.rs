//! Module Aggregate
//!
//! Per-application navigation tree stored as `MODULE` resource rows.

pub mod dto;
pub mod entity;
pub mod service;

pub use dto::{CreateModuleRequest, ModuleDto};
pub use entity::Module;
pub use service::ModuleService;

use crate::usecase::StoreRepository;

pub type ModuleRepository = StoreRepository<Module>;
