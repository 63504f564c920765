//! Repository Layer
//!
//! Store abstraction and implementations.

mod traits;
mod memory_repo;
mod remote_repo;
pub mod document;
pub mod sse;
pub mod tree;

#[cfg(test)]
mod tests;

pub use traits::{ListStore, ListStream};
pub use memory_repo::MemoryStore;
pub use remote_repo::RemoteStore;
