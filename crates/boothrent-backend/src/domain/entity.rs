//! Domain Layer - Core Entity Trait
//!
//! The basic contract for stored records: a unique identifier within the
//! owning user's collection. Used by the in-memory store for its generic
//! lookup helpers.

use serde::{Deserialize, Serialize};

/// Core trait for all stored entities
pub trait Entity: Sized + Clone + Send + Sync {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// "Not found" and validation failures are ordinary return values here, never
/// panics: the UI surfaces `message()` directly to the person on the other
/// side of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

impl DomainError {
    /// The user-facing message carried by this error, without any prefix.
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Conflict(msg)
            | DomainError::Internal(msg) => msg,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
