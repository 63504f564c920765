//! Opaque identifiers
//!
//! List and gift IDs double as path segments in the document store
//! (`lists/{listId}/gifts/{giftId}`), so anything parsed from outside
//! (a shared URL, a form) goes through `parse`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{DomainError, DomainResult};

/// Longest key the hosted database accepts, in bytes.
const MAX_KEY_LEN: usize = 768;

/// Characters that would change the meaning of a store path.
const FORBIDDEN: &[char] = &['.', '#', '$', '[', ']', '/'];

fn check_segment(kind: &str, raw: &str) -> DomainResult<()> {
    if raw.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} id is empty", kind)));
    }
    if raw.len() > MAX_KEY_LEN {
        return Err(DomainError::InvalidInput(format!("{} id is too long", kind)));
    }
    if raw.chars().any(|c| FORBIDDEN.contains(&c) || c.is_control()) {
        return Err(DomainError::InvalidInput(format!(
            "{} id contains a reserved character: {}",
            kind, raw
        )));
    }
    Ok(())
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Allocate a fresh random ID.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Accept an ID from outside the crate, rejecting anything that
            /// is not a single store path segment.
            pub fn parse(raw: &str) -> DomainResult<Self> {
                let raw = raw.trim();
                check_segment($kind, raw)?;
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a gift list
    ListId,
    "list"
);

opaque_id!(
    /// Identifier of a gift, unique within its list
    GiftId,
    "gift"
);
