//! In-Memory List Store
//!
//! Keeps every list in process. Subscribers are woken through a broadcast
//! channel carrying the ID of the list that changed and re-read the
//! current snapshot, so a lagging subscriber never sees a stale list.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::RwLock;

use super::traits::{ListStore, ListStream};
use crate::compat;
use crate::domain::{
    DomainError, DomainResult, Gift, GiftDraft, GiftId, GiftList, GiftPatch, ListId, ListSummary,
};

/// Pending change notifications per subscriber before it counts as lagging
const CHANGE_CHANNEL_CAPACITY: usize = 64;

type Lists = Arc<RwLock<BTreeMap<ListId, GiftList>>>;

/// Process-local store, used by tests and as a drop-in offline backend
pub struct MemoryStore {
    lists: Lists,
    changes: broadcast::Sender<ListId>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            lists: Arc::new(RwLock::new(BTreeMap::new())),
            changes,
            available: AtomicBool::new(true),
        }
    }

    /// Simulate losing (or regaining) the connection to the store. While
    /// unavailable every operation fails with `StorageUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.available.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(DomainError::StorageUnavailable(
                "memory store is offline".to_string(),
            ))
        }
    }

    fn notify(&self, id: &ListId) {
        // No receivers is fine: nobody is watching.
        let _ = self.changes.send(id.clone());
    }

    /// Run `f` against one list under the write lock, notifying watchers
    /// when it succeeds.
    async fn mutate_list<R>(
        &self,
        id: &ListId,
        f: impl FnOnce(&mut GiftList) -> DomainResult<R>,
    ) -> DomainResult<R> {
        self.check_available()?;
        let result = {
            let mut lists = self.lists.write().await;
            let list = lists
                .get_mut(id)
                .ok_or_else(|| DomainError::NotFound(format!("list {}", id)))?;
            f(list)?
        };
        self.notify(id);
        Ok(result)
    }
}

async fn snapshot(lists: &Lists, id: &ListId) -> Option<GiftList> {
    lists.read().await.get(id).cloned()
}

struct Watch {
    lists: Lists,
    changes: broadcast::Receiver<ListId>,
    id: ListId,
    primed: bool,
}

async fn next_snapshot(mut watch: Watch) -> Option<(DomainResult<Option<GiftList>>, Watch)> {
    if !watch.primed {
        watch.primed = true;
        let current = snapshot(&watch.lists, &watch.id).await;
        return Some((Ok(current), watch));
    }
    loop {
        match watch.changes.recv().await {
            Ok(changed) if changed == watch.id => break,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                log::warn!(
                    "subscriber for list {} lagged by {} changes, resyncing",
                    watch.id,
                    skipped
                );
                break;
            }
            Err(RecvError::Closed) => return None,
        }
    }
    let current = snapshot(&watch.lists, &watch.id).await;
    Some((Ok(current), watch))
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ListStore for MemoryStore {
    async fn list_all(&self) -> DomainResult<Vec<ListSummary>> {
        self.check_available()?;
        let lists = self.lists.read().await;
        Ok(lists.values().map(GiftList::summary).collect())
    }

    async fn create_list(&self, name: &str) -> DomainResult<GiftList> {
        self.check_available()?;
        let list = GiftList::new(name)?;
        self.lists
            .write()
            .await
            .insert(list.id.clone(), list.clone());
        log::debug!("created list {} ({})", list.id, list.name);
        self.notify(&list.id);
        Ok(list)
    }

    async fn delete_list(&self, id: &ListId) -> DomainResult<()> {
        self.check_available()?;
        let removed = self.lists.write().await.remove(id).is_some();
        if removed {
            log::debug!("deleted list {}", id);
            self.notify(id);
        }
        Ok(())
    }

    async fn get_list(&self, id: &ListId) -> DomainResult<GiftList> {
        self.check_available()?;
        snapshot(&self.lists, id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("list {}", id)))
    }

    async fn subscribe_list(&self, id: &ListId) -> DomainResult<ListStream> {
        self.check_available()?;
        // Subscribe before the first read so no change can slip between them.
        let watch = Watch {
            lists: Arc::clone(&self.lists),
            changes: self.changes.subscribe(),
            id: id.clone(),
            primed: false,
        };
        Ok(compat::boxed(futures::stream::unfold(watch, next_snapshot)))
    }

    async fn add_gift(&self, list_id: &ListId, draft: GiftDraft) -> DomainResult<Gift> {
        let gift = Gift::from_draft(draft)?;
        self.mutate_list(list_id, |list| Ok(list.append_gift(gift)))
            .await
    }

    async fn update_gift(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        patch: GiftPatch,
    ) -> DomainResult<Gift> {
        let patch = patch.normalized();
        self.mutate_list(list_id, |list| {
            let gift = list
                .gift_mut(gift_id)
                .ok_or_else(|| DomainError::NotFound(format!("gift {} in list {}", gift_id, list_id)))?;
            gift.apply(&patch)?;
            Ok(gift.clone())
        })
        .await
    }

    async fn delete_gift(&self, list_id: &ListId, gift_id: &GiftId) -> DomainResult<()> {
        self.mutate_list(list_id, |list| {
            if list.remove_gift(gift_id) {
                log::debug!("deleted gift {} from list {}", gift_id, list_id);
            }
            Ok(())
        })
        .await
    }
}
