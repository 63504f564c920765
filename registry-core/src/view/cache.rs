//! Screen Caches
//!
//! Each screen owns one cache. `ViewChange` is what a successful write
//! looks like from the screen's point of view; folding it in is the
//! optimistic strategy, while `DetailView::replace` is what a pushed
//! snapshot does.

use serde::{Deserialize, Serialize};

use crate::domain::{remove_by_id, upsert_by_id, Gift, GiftId, GiftList, ListId, ListSummary};

/// A write that succeeded, expressed as a change to cached state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewChange {
    ListCreated(ListSummary),
    ListRemoved(ListId),
    GiftAdded { list_id: ListId, gift: Gift },
    GiftUpdated { list_id: ListId, gift: Gift },
    GiftRemoved { list_id: ListId, gift_id: GiftId },
}

impl ViewChange {
    pub fn list_id(&self) -> &ListId {
        match self {
            ViewChange::ListCreated(summary) => &summary.id,
            ViewChange::ListRemoved(id) => id,
            ViewChange::GiftAdded { list_id, .. }
            | ViewChange::GiftUpdated { list_id, .. }
            | ViewChange::GiftRemoved { list_id, .. } => list_id,
        }
    }
}

/// The list overview
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexView {
    pub lists: Vec<ListSummary>,
    /// At most one list is expanded at a time
    pub expanded: Option<ListId>,
    pub loaded: bool,
}

impl IndexView {
    pub fn replace(&mut self, lists: Vec<ListSummary>) {
        if let Some(expanded) = &self.expanded {
            if !lists.iter().any(|l| &l.id == expanded) {
                self.expanded = None;
            }
        }
        self.lists = lists;
        self.sort();
        self.loaded = true;
    }

    /// Case-insensitive by owner name
    fn sort(&mut self) {
        self.lists.sort_by_cached_key(|l| l.name.to_lowercase());
    }

    pub fn apply(&mut self, change: &ViewChange) {
        match change {
            ViewChange::ListCreated(summary) => {
                upsert_by_id(&mut self.lists, summary.clone());
                self.sort();
            }
            ViewChange::ListRemoved(id) => {
                remove_by_id(&mut self.lists, id);
                if self.expanded.as_ref() == Some(id) {
                    self.expanded = None;
                }
            }
            // Gift changes do not show on the index.
            _ => {}
        }
    }

    /// Expand `id`, collapsing any other list. Toggling the expanded list
    /// collapses it.
    pub fn toggle_expanded(&mut self, id: &ListId) {
        if self.is_expanded(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.clone());
        }
    }

    pub fn is_expanded(&self, id: &ListId) -> bool {
        self.expanded.as_ref() == Some(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Loading,
    Ready(GiftList),
    /// The list does not exist (or was deleted while open)
    Missing,
}

/// One list with its gifts
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub list_id: ListId,
    pub state: DetailState,
}

impl DetailView {
    pub fn new(list_id: ListId) -> Self {
        Self {
            list_id,
            state: DetailState::Loading,
        }
    }

    /// Replace the whole cache with a snapshot; `None` means the list is gone.
    pub fn replace(&mut self, list: Option<GiftList>) {
        self.state = match list {
            Some(list) if list.id == self.list_id => DetailState::Ready(list),
            Some(list) => {
                log::warn!(
                    "ignoring snapshot of list {} in view of {}",
                    list.id,
                    self.list_id
                );
                return;
            }
            None => DetailState::Missing,
        };
    }

    pub fn apply(&mut self, change: &ViewChange) {
        if change.list_id() != &self.list_id {
            return;
        }
        if let ViewChange::ListRemoved(_) = change {
            self.state = DetailState::Missing;
            return;
        }
        let DetailState::Ready(list) = &mut self.state else {
            return;
        };
        match change {
            ViewChange::GiftAdded { gift, .. } | ViewChange::GiftUpdated { gift, .. } => {
                list.put_gift(gift.clone())
            }
            ViewChange::GiftRemoved { gift_id, .. } => {
                list.remove_gift(gift_id);
            }
            ViewChange::ListCreated(summary) => list.name = summary.name.clone(),
            ViewChange::ListRemoved(_) => {}
        }
    }

    pub fn list(&self) -> Option<&GiftList> {
        match &self.state {
            DetailState::Ready(list) => Some(list),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GiftDraft;

    fn summary(name: &str) -> ListSummary {
        GiftList::new(name).unwrap().summary()
    }

    fn gift(name: &str) -> Gift {
        Gift::from_draft(GiftDraft {
            name: Some(name.into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_index_replace_sorts_by_name() {
        let mut index = IndexView::default();
        index.replace(vec![summary("bob"), summary("Alice")]);
        assert!(index.loaded);
        assert_eq!(index.lists[0].name, "Alice");
    }

    #[test]
    fn test_created_list_takes_its_sorted_place() {
        let mut index = IndexView::default();
        index.replace(vec![summary("Bob"), summary("dora")]);

        let alice = summary("alice");
        index.apply(&ViewChange::ListCreated(alice.clone()));
        index.apply(&ViewChange::ListCreated(summary("Carl")));
        let names: Vec<_> = index.lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "Bob", "Carl", "dora"]);

        // Same order as a fresh load of the same lists
        let mut reloaded = IndexView::default();
        reloaded.replace(index.lists.iter().rev().cloned().collect());
        assert_eq!(reloaded.lists, index.lists);
        assert_eq!(index.lists[0].id, alice.id);
    }

    #[test]
    fn test_single_expanded_list() {
        let a = summary("Alice");
        let b = summary("Bob");
        let mut index = IndexView::default();
        index.replace(vec![a.clone(), b.clone()]);

        index.toggle_expanded(&a.id);
        assert!(index.is_expanded(&a.id));
        index.toggle_expanded(&b.id);
        assert!(index.is_expanded(&b.id));
        assert!(!index.is_expanded(&a.id));
        index.toggle_expanded(&b.id);
        assert_eq!(index.expanded, None);
    }

    #[test]
    fn test_index_removal_collapses() {
        let a = summary("Alice");
        let mut index = IndexView::default();
        index.apply(&ViewChange::ListCreated(a.clone()));
        index.toggle_expanded(&a.id);
        index.apply(&ViewChange::ListRemoved(a.id.clone()));
        assert!(index.lists.is_empty());
        assert_eq!(index.expanded, None);
    }

    #[test]
    fn test_detail_applies_gift_changes() {
        let list = GiftList::new("Alice").unwrap();
        let mut view = DetailView::new(list.id.clone());
        assert!(view.is_loading());

        // Changes before the first snapshot are dropped.
        let bike = gift("Bike");
        view.apply(&ViewChange::GiftAdded {
            list_id: list.id.clone(),
            gift: bike.clone(),
        });
        assert!(view.list().is_none());

        view.replace(Some(list.clone()));
        view.apply(&ViewChange::GiftAdded {
            list_id: list.id.clone(),
            gift: bike.clone(),
        });
        let mut bought = bike.clone();
        bought.purchased = true;
        view.apply(&ViewChange::GiftUpdated {
            list_id: list.id.clone(),
            gift: bought,
        });
        assert_eq!(view.list().unwrap().gifts.len(), 1);
        assert!(view.list().unwrap().gifts[0].purchased);

        view.apply(&ViewChange::GiftRemoved {
            list_id: list.id.clone(),
            gift_id: bike.id,
        });
        assert!(view.list().unwrap().gifts.is_empty());
    }

    #[test]
    fn test_detail_ignores_other_lists() {
        let list = GiftList::new("Alice").unwrap();
        let other = GiftList::new("Bob").unwrap();
        let mut view = DetailView::new(list.id.clone());
        view.replace(Some(list.clone()));

        view.replace(Some(other.clone()));
        view.apply(&ViewChange::GiftAdded {
            list_id: other.id.clone(),
            gift: gift("Kite"),
        });
        assert_eq!(view.list(), Some(&list));
    }

    #[test]
    fn test_detail_missing() {
        let list = GiftList::new("Alice").unwrap();
        let mut view = DetailView::new(list.id.clone());
        view.replace(Some(list.clone()));
        view.replace(None);
        assert_eq!(view.state, DetailState::Missing);

        let mut view = DetailView::new(list.id.clone());
        view.replace(Some(list.clone()));
        view.apply(&ViewChange::ListRemoved(list.id));
        assert_eq!(view.state, DetailState::Missing);
    }
}
