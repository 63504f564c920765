//! Gift Registry Core
//!
//! Layered architecture:
//! - domain: Lists, gifts and the rules they obey
//! - repository: Store abstraction and its backends
//! - view: Controller and per-screen caches used by the frontend

pub mod compat;
pub mod config;
pub mod domain;
pub mod repository;
pub mod view;

pub use config::{RegistryConfig, SyncStrategy};
pub use domain::{
    DomainError, DomainResult, Entity, Gift, GiftDraft, GiftId, GiftList, GiftPatch, GiftStatus,
    ListId, ListSummary,
};
pub use repository::{ListStore, ListStream, MemoryStore, RemoteStore};
pub use view::{Controller, DetailState, DetailView, IndexView, Screen, ViewChange};
