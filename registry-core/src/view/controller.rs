//! View Controller
//!
//! Turns user intent into store calls. Validation happens here, before
//! anything reaches the store, so a rejected form never costs a round trip.
//!
//! Gift operations return `Some(ViewChange)` only under the optimistic
//! strategy; with subscriptions the pushed snapshot carries the change.

use std::sync::Arc;

use crate::config::SyncStrategy;
use crate::domain::{
    validate_list_name, DomainError, DomainResult, Gift, GiftDraft, GiftId, GiftList, GiftPatch,
    ListId, ListSummary,
};
use crate::repository::{ListStore, ListStream};

use super::cache::ViewChange;

pub struct Controller<S: ListStore + ?Sized> {
    store: Arc<S>,
    strategy: SyncStrategy,
}

impl<S: ListStore + ?Sized> Clone for Controller<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            strategy: self.strategy,
        }
    }
}

fn logged<T>(operation: &str, result: DomainResult<T>) -> DomainResult<T> {
    if let Err(e) = &result {
        match e {
            DomainError::StorageUnavailable(_) => log::warn!("{} failed: {}", operation, e),
            _ => log::debug!("{} rejected: {}", operation, e),
        }
    }
    result
}

impl<S: ListStore + ?Sized> Controller<S> {
    pub fn new(store: Arc<S>, strategy: SyncStrategy) -> Self {
        Self { store, strategy }
    }

    pub fn strategy(&self) -> SyncStrategy {
        self.strategy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn reconcile(&self, change: ViewChange) -> Option<ViewChange> {
        match self.strategy {
            SyncStrategy::Optimistic => Some(change),
            SyncStrategy::Subscription => None,
        }
    }

    // ========================
    // Lists
    // ========================

    pub async fn load_index(&self) -> DomainResult<Vec<ListSummary>> {
        logged("load lists", self.store.list_all().await)
    }

    /// The index has no subscription, so list changes always come back.
    pub async fn create_list(&self, name: &str) -> DomainResult<ViewChange> {
        let name = validate_list_name(name)?;
        let list = logged("create list", self.store.create_list(&name).await)?;
        log::info!("created list {}", list.id);
        Ok(ViewChange::ListCreated(list.summary()))
    }

    pub async fn delete_list(&self, id: &ListId) -> DomainResult<ViewChange> {
        logged("delete list", self.store.delete_list(id).await)?;
        Ok(ViewChange::ListRemoved(id.clone()))
    }

    pub async fn open_list(&self, id: &ListId) -> DomainResult<GiftList> {
        logged("open list", self.store.get_list(id).await)
    }

    pub async fn watch_list(&self, id: &ListId) -> DomainResult<ListStream> {
        let stream = logged("watch list", self.store.subscribe_list(id).await)?;
        log::info!("watching list {}", id);
        Ok(stream)
    }

    // ========================
    // Gifts
    // ========================

    pub async fn add_gift(
        &self,
        list_id: &ListId,
        draft: GiftDraft,
    ) -> DomainResult<Option<ViewChange>> {
        let draft = draft.normalized();
        draft.validate()?;
        let gift = logged("add gift", self.store.add_gift(list_id, draft).await)?;
        Ok(self.gift_updated(list_id, gift, true))
    }

    /// Save the edit form: every descriptive field takes the form's value.
    pub async fn edit_gift(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        draft: GiftDraft,
    ) -> DomainResult<Option<ViewChange>> {
        let draft = draft.normalized();
        draft.validate()?;
        self.update_gift(list_id, gift_id, draft.into_patch()).await
    }

    pub async fn update_gift(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        patch: GiftPatch,
    ) -> DomainResult<Option<ViewChange>> {
        let gift = logged(
            "update gift",
            self.store.update_gift(list_id, gift_id, patch).await,
        )?;
        Ok(self.gift_updated(list_id, gift, false))
    }

    pub async fn delete_gift(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
    ) -> DomainResult<Option<ViewChange>> {
        logged("delete gift", self.store.delete_gift(list_id, gift_id).await)?;
        Ok(self.reconcile(ViewChange::GiftRemoved {
            list_id: list_id.clone(),
            gift_id: gift_id.clone(),
        }))
    }

    pub async fn reserve(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        reserver: &str,
    ) -> DomainResult<Option<ViewChange>> {
        let patch = GiftPatch::reservation(Some(reserver))?;
        self.update_gift(list_id, gift_id, patch).await
    }

    pub async fn cancel_reservation(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
    ) -> DomainResult<Option<ViewChange>> {
        self.update_gift(list_id, gift_id, GiftPatch::reservation(None)?)
            .await
    }

    pub async fn set_purchased(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        purchased: bool,
    ) -> DomainResult<Option<ViewChange>> {
        self.update_gift(list_id, gift_id, GiftPatch::purchased(purchased))
            .await
    }

    /// Flip the purchased flag of a gift as currently displayed.
    pub async fn toggle_purchased(
        &self,
        list_id: &ListId,
        gift: &Gift,
    ) -> DomainResult<Option<ViewChange>> {
        self.set_purchased(list_id, &gift.id, !gift.purchased).await
    }

    fn gift_updated(&self, list_id: &ListId, gift: Gift, added: bool) -> Option<ViewChange> {
        let list_id = list_id.clone();
        self.reconcile(if added {
            ViewChange::GiftAdded { list_id, gift }
        } else {
            ViewChange::GiftUpdated { list_id, gift }
        })
    }
}
