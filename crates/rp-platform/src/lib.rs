//! Rampart Platform
//!
//! Administration layer for the identity platform:
//! - Applications (OAuth/OIDC clients) and their client secrets
//! - API resources and identity resources
//! - Per-application module trees
//! - Uniqueness-checked create / update / delete with audit logging
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entity and its persistence mapping
//! - `dto` - Request/response shapes
//! - `service` - Create / update / delete / read operations

// Aggregates
pub mod application;
pub mod api_resource;
pub mod identity_resource;
pub mod module;
pub mod resource;
pub mod audit;

// Infrastructure
pub mod shared;
pub mod store;
pub mod usecase;
pub mod services;
pub mod seed;

// Re-export common types from shared
pub use shared::error::{ErrorKind, PlatformError, Result};
pub use shared::tsid::TsidGenerator;
pub use shared::indexes::initialize_indexes;

// Re-export use case infrastructure
pub use usecase::{
    Aggregate, CrudOperations, ExecutionContext, Repository, StoreRepository,
    StoreUnitOfWork, Transaction, UnitOfWork,
};

// Re-export stores
pub use store::{DocumentStore, Filter, MemoryStore, MongoStore, WriteOp};

// Re-export entities, DTOs and services
pub use application::{Application, ApplicationDto, ApplicationService, ClientSecret, ClientSecretType, GrantType};
pub use api_resource::{ApiResource, ApiResourceDto, ApiResourceService};
pub use identity_resource::{IdentityResource, IdentityResourceDto, IdentityResourceService};
pub use module::{CreateModuleRequest, Module, ModuleDto, ModuleService};
pub use resource::{ResourceExtend, ResourceKind, ResourceRecord};
pub use audit::{AuditAction, AuditLog};

pub use services::PlatformServices;
pub use seed::DevDataSeeder;
