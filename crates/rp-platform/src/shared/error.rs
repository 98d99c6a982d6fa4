//! Platform Error Types

use thiserror::Error;

/// Which side of the boundary an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User-correctable; surfaced to the caller as-is.
    Warning,
    /// Data-integrity or infrastructure failure.
    Internal,
}

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("{entity_type} is required")]
    NullEntity { entity_type: &'static str },

    #[error("Duplicate {entity_type}: {field} '{value}' already exists")]
    Duplicate {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Corrupt extend document on resource {resource_id}: {source}")]
    CorruptExtend {
        resource_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Resource {resource_id} is a {actual}, expected {expected}")]
    ResourceTypeMismatch {
        resource_id: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transaction error: {message}")]
    Transaction { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn null_entity(entity_type: &'static str) -> Self {
        Self::NullEntity { entity_type }
    }

    pub fn duplicate(entity_type: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            field,
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NullEntity { .. }
            | Self::Duplicate { .. }
            | Self::Validation { .. }
            | Self::NotFound { .. } => ErrorKind::Warning,
            _ => ErrorKind::Internal,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.kind() == ErrorKind::Warning
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
