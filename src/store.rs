//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each screen
//! keeps exactly one cache here.

use gift_registry_lib::{DetailView, GiftList, IndexView, ListId, ListSummary, ViewChange};
use leptos::prelude::*;
use reactive_stores::Store;

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// List overview
    pub index: IndexView,
    /// Open list, if the detail screen is showing
    pub detail: Option<DetailView>,
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_index(store: &AppStore, lists: Vec<ListSummary>) {
    store.index().write().replace(lists);
}

/// Fold a successful write into whichever caches it touches
pub fn store_apply(store: &AppStore, change: &ViewChange) {
    store.index().write().apply(change);
    if let Some(detail) = store.detail().write().as_mut() {
        detail.apply(change);
    }
}

pub fn store_toggle_expanded(store: &AppStore, id: &ListId) {
    store.index().write().toggle_expanded(id);
}

/// Start the detail cache for `id` in the loading state
pub fn store_open_detail(store: &AppStore, id: ListId) {
    *store.detail().write() = Some(DetailView::new(id));
}

/// Replace the detail cache with a snapshot, if `id` is still open
pub fn store_replace_detail(store: &AppStore, id: &ListId, list: Option<GiftList>) {
    if let Some(detail) = store.detail().write().as_mut() {
        if &detail.list_id == id {
            detail.replace(list);
        }
    }
}

pub fn store_close_detail(store: &AppStore) {
    *store.detail().write() = None;
}
