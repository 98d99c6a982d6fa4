//! Application Aggregate
//!
//! OAuth/OIDC clients, keyed by a unique code, with their client secrets.

pub mod client_secret;
pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use client_secret::{ClientSecret, ClientSecretType};
pub use dto::ApplicationDto;
pub use entity::{Application, GrantType};
pub use repository::{ApplicationRepository, APPLICATION_COLLECTION};
pub use service::ApplicationService;
