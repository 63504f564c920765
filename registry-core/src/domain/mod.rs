//! Domain Layer
//!
//! Lists, gifts and their rules. Nothing here touches the network.

mod entity;
mod gift;
mod ids;
mod list;

pub use entity::{remove_by_id, upsert_by_id, DomainError, DomainResult, Entity};
pub use gift::{Gift, GiftDraft, GiftPatch, GiftStatus};
pub use ids::{GiftId, ListId};
pub use list::{validate_list_name, GiftList, ListSummary};
