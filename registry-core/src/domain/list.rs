//! List Entity
//!
//! A named, shareable collection of gifts. The list owns its gifts: they are
//! created inside it and deleted with it.

use serde::{Deserialize, Serialize};

use super::entity::{remove_by_id, upsert_by_id, DomainError, DomainResult, Entity};
use super::gift::Gift;
use super::ids::{GiftId, ListId};

/// A gift list with its full gift collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftList {
    pub id: ListId,
    pub name: String,
    /// In append order (see `sort_gifts`)
    #[serde(default)]
    pub gifts: Vec<Gift>,
}

/// Index entry: what the list overview needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
}

/// Trim a list name, rejecting blank ones.
pub fn validate_list_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput(
            "list name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

impl GiftList {
    /// Create an empty list with a fresh ID.
    pub fn new(name: &str) -> DomainResult<Self> {
        Ok(Self {
            id: ListId::generate(),
            name: validate_list_name(name)?,
            gifts: Vec::new(),
        })
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn gift(&self, id: &GiftId) -> Option<&Gift> {
        self.gifts.iter().find(|g| &g.id == id)
    }

    pub fn gift_mut(&mut self, id: &GiftId) -> Option<&mut Gift> {
        self.gifts.iter_mut().find(|g| &g.id == id)
    }

    pub fn require_gift(&self, id: &GiftId) -> DomainResult<&Gift> {
        self.gift(id)
            .ok_or_else(|| DomainError::NotFound(format!("gift {} in list {}", id, self.id)))
    }

    /// Add a new gift after every existing one, assigning its position.
    pub fn append_gift(&mut self, mut gift: Gift) -> Gift {
        gift.position = self.next_position();
        self.gifts.push(gift.clone());
        gift
    }

    /// Replace a gift in place, or append it if the list does not have it.
    pub fn put_gift(&mut self, gift: Gift) {
        upsert_by_id(&mut self.gifts, gift);
    }

    pub fn remove_gift(&mut self, id: &GiftId) -> bool {
        remove_by_id(&mut self.gifts, id)
    }

    fn next_position(&self) -> u64 {
        self.gifts.iter().map(|g| g.position).max().unwrap_or(0) + 1
    }

    /// Order by position, then creation time. The sort is stable, so gifts
    /// that tie (older records without positions or timestamps) keep the
    /// order they were stored in.
    pub fn sort_gifts(&mut self) {
        self.gifts.sort_by_key(|g| (g.position, g.added_at));
    }

    /// Number gifts 1..=n in their current order.
    pub fn renumber(&mut self) {
        for (index, gift) in self.gifts.iter_mut().enumerate() {
            gift.position = index as u64 + 1;
        }
    }

    pub fn reserved_count(&self) -> usize {
        self.gifts.iter().filter(|g| g.is_reserved()).count()
    }

    pub fn purchased_count(&self) -> usize {
        self.gifts.iter().filter(|g| g.purchased).count()
    }
}

impl Entity for GiftList {
    type Id = ListId;

    fn id(&self) -> &ListId {
        &self.id
    }
}

impl Entity for ListSummary {
    type Id = ListId;

    fn id(&self) -> &ListId {
        &self.id
    }
}
