//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Replace the entity with the same ID, or append it when absent.
pub fn upsert_by_id<T: Entity>(entities: &mut Vec<T>, entity: T) {
    match entities.iter_mut().find(|e| e.id() == entity.id()) {
        Some(existing) => *existing = entity,
        None => entities.push(entity),
    }
}

/// Remove the entity with the given ID. Returns whether anything was removed.
pub fn remove_by_id<T: Entity>(entities: &mut Vec<T>, id: &T::Id) -> bool {
    let before = entities.len();
    entities.retain(|e| e.id() != id);
    entities.len() != before
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DomainError {
    /// A required field was empty or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A gift had none of name, URL or image URL.
    #[error("Invalid gift: fill in at least one of name, URL or image URL")]
    InvalidGift,

    /// The referenced list or gift does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store could not be reached or answered with something unusable.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }

    /// Validation errors are raised before any store call is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::InvalidInput(_) | DomainError::InvalidGift)
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::StorageUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::StorageUnavailable(format!("malformed document: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Named {
        id: u32,
        label: &'static str,
    }

    impl Entity for Named {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut v = vec![Named { id: 1, label: "a" }, Named { id: 2, label: "b" }];
        upsert_by_id(&mut v, Named { id: 1, label: "c" });
        assert_eq!(v[0].label, "c");
        assert_eq!(v.len(), 2);

        upsert_by_id(&mut v, Named { id: 3, label: "d" });
        assert_eq!(v.len(), 3);
        assert_eq!(v[2].id, 3);
    }

    #[test]
    fn test_remove_by_id() {
        let mut v = vec![Named { id: 1, label: "a" }];
        assert!(!remove_by_id(&mut v, &7));
        assert!(remove_by_id(&mut v, &1));
        assert!(v.is_empty());
    }

    #[test]
    fn test_error_classification() {
        assert!(DomainError::InvalidGift.is_validation());
        assert!(DomainError::InvalidInput("name".into()).is_validation());
        assert!(!DomainError::StorageUnavailable("down".into()).is_validation());
        assert!(DomainError::NotFound("x".into()).is_not_found());
    }
}
