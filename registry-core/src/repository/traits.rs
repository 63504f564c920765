//! Repository Layer - Core Traits
//!
//! Defines the abstract interface to the list store.
//! Implementations: in-memory, hosted realtime database.

use async_trait::async_trait;

use crate::compat::BoxedStream;
use crate::domain::{
    DomainResult, Gift, GiftDraft, GiftId, GiftList, GiftPatch, ListId, ListSummary,
};

/// Snapshots of one list, pushed on every change. `None` means the list
/// no longer exists. Dropping the stream ends the subscription.
pub type ListStream = BoxedStream<DomainResult<Option<GiftList>>>;

/// Storage of lists and their gifts
///
/// Gift writes use merge semantics: fields a patch does not mention are
/// left as stored, so concurrent edits to different fields both survive.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ListStore: Send + Sync {
    /// Every list, without gifts
    async fn list_all(&self) -> DomainResult<Vec<ListSummary>>;

    /// Create an empty list
    async fn create_list(&self, name: &str) -> DomainResult<GiftList>;

    /// Delete a list and all its gifts. Deleting a missing list is a no-op.
    async fn delete_list(&self, id: &ListId) -> DomainResult<()>;

    /// One list with all its gifts, or `NotFound`
    async fn get_list(&self, id: &ListId) -> DomainResult<GiftList>;

    /// Current state of the list followed by every later change
    async fn subscribe_list(&self, id: &ListId) -> DomainResult<ListStream>;

    /// Validate and append a gift, assigning its ID
    async fn add_gift(&self, list_id: &ListId, draft: GiftDraft) -> DomainResult<Gift>;

    /// Merge `patch` into an existing gift and return the result
    async fn update_gift(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        patch: GiftPatch,
    ) -> DomainResult<Gift>;

    /// Remove a gift. `NotFound` only when the list itself is gone.
    async fn delete_gift(&self, list_id: &ListId, gift_id: &GiftId) -> DomainResult<()>;

    /// Set (`Some`) or clear (`None`) who reserved the gift
    async fn set_reservation(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        reserver: Option<&str>,
    ) -> DomainResult<Gift> {
        let patch = GiftPatch::reservation(reserver)?;
        self.update_gift(list_id, gift_id, patch).await
    }

    /// Mark or unmark as purchased. The reserver is kept either way.
    async fn set_purchased(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        purchased: bool,
    ) -> DomainResult<Gift> {
        self.update_gift(list_id, gift_id, GiftPatch::purchased(purchased))
            .await
    }
}
