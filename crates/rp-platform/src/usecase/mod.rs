//! Use Case Infrastructure
//!
//! The foundational pieces every entity service is built from:
//! - `ExecutionContext` - tracing and principal context for a service call
//! - `Aggregate` - how an entity maps onto a store collection
//! - `Repository` - uniqueness checks, reads and staged writes
//! - `UnitOfWork` / `Transaction` - atomic commit of staged writes plus audit entries
//! - `CrudOperations` - the validate, stage, commit flow shared by all services

pub mod aggregate;
pub mod crud;
pub mod execution_context;
pub mod repository;
pub mod unit_of_work;

pub use aggregate::Aggregate;
pub use crud::CrudOperations;
pub use execution_context::ExecutionContext;
pub use repository::{Repository, StoreRepository};
pub use unit_of_work::{StoreUnitOfWork, Transaction, UnitOfWork};
