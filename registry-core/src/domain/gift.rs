//! Gift Entity
//!
//! A single wishlist entry. Descriptive fields are all optional, but a gift
//! needs at least one of name, URL or image URL to be worth keeping.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::ids::GiftId;

/// Where a gift sits in the available → reserved → purchased lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GiftStatus {
    #[default]
    Available,
    Reserved,
    Purchased,
}

impl GiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftStatus::Available => "available",
            GiftStatus::Reserved => "reserved",
            GiftStatus::Purchased => "purchased",
        }
    }
}

/// A gift stored inside a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    /// Unique within the owning list. Older documents may omit it; the
    /// document codec fills it from the record key.
    #[serde(default)]
    pub id: GiftId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Who intends to buy it. Some older records call this `reserved`.
    #[serde(default, alias = "reserved", skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
    #[serde(default)]
    pub purchased: bool,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub added_at: i64,
    /// Append sequence within the owning list, starting at 1. Zero on
    /// records written before positions existed.
    #[serde(default)]
    pub position: u64,
}

impl Gift {
    /// Build a new gift from user input, assigning a fresh ID.
    pub fn from_draft(draft: GiftDraft) -> DomainResult<Self> {
        let draft = draft.normalized();
        draft.validate()?;
        Ok(Self {
            id: GiftId::generate(),
            name: draft.name,
            price: draft.price,
            url: draft.url,
            image_url: draft.image_url,
            reserved_by: None,
            purchased: false,
            added_at: chrono::Utc::now().timestamp_millis(),
            position: 0,
        })
    }

    pub fn has_descriptive_field(&self) -> bool {
        self.name.is_some() || self.url.is_some() || self.image_url.is_some()
    }

    pub fn status(&self) -> GiftStatus {
        if self.purchased {
            GiftStatus::Purchased
        } else if self.reserved_by.is_some() {
            GiftStatus::Reserved
        } else {
            GiftStatus::Available
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved_by.is_some()
    }

    /// Label for headings and alt text.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or("Gift")
    }

    /// Merge a patch into this gift.
    ///
    /// Either the whole patch applies or nothing does.
    pub fn apply(&mut self, patch: &GiftPatch) -> DomainResult<()> {
        let mut next = self.clone();

        if let Some(name) = &patch.name {
            next.name = non_empty(name.clone());
        }
        if let Some(price) = patch.price {
            next.price = finite(price);
        }
        if let Some(url) = &patch.url {
            next.url = non_empty(url.clone());
        }
        if let Some(image_url) = &patch.image_url {
            next.image_url = non_empty(image_url.clone());
        }
        if let Some(purchased) = patch.purchased {
            next.purchased = purchased;
        }
        if let Some(reserved_by) = &patch.reserved_by {
            match reserved_by {
                Some(reserver) => {
                    let reserver = reserver.trim();
                    if reserver.is_empty() {
                        return Err(DomainError::InvalidInput(
                            "a reservation needs a name".to_string(),
                        ));
                    }
                    let changes_reserver = self.reserved_by.as_deref() != Some(reserver);
                    if next.purchased && changes_reserver {
                        return Err(DomainError::InvalidInput(format!(
                            "{} is already purchased",
                            self.display_name()
                        )));
                    }
                    next.reserved_by = Some(reserver.to_string());
                }
                None => next.reserved_by = None,
            }
        }

        if !next.has_descriptive_field() {
            return Err(DomainError::InvalidGift);
        }

        *self = next;
        Ok(())
    }
}

impl Entity for Gift {
    type Id = GiftId;

    fn id(&self) -> &GiftId {
        &self.id
    }
}

/// User input for a new gift (or the edit form of an existing one)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

impl GiftDraft {
    /// Prefill an edit form.
    pub fn from_gift(gift: &Gift) -> Self {
        Self {
            name: gift.name.clone(),
            price: gift.price,
            url: gift.url.clone(),
            image_url: gift.image_url.clone(),
        }
    }

    /// Trim text fields; blank text and non-finite prices become absent.
    pub fn normalized(self) -> Self {
        Self {
            name: non_empty(self.name),
            price: self.price.and_then(|p| finite(Some(p))),
            url: non_empty(self.url),
            image_url: non_empty(self.image_url),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> DomainResult<()> {
        let present = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.trim().is_empty());
        if present(&self.name) || present(&self.url) || present(&self.image_url) {
            Ok(())
        } else {
            Err(DomainError::InvalidGift)
        }
    }

    /// Patch that sets every descriptive field to this draft's value,
    /// clearing the ones left blank.
    pub fn into_patch(self) -> GiftPatch {
        let draft = self.normalized();
        GiftPatch {
            name: Some(draft.name),
            price: Some(draft.price),
            url: Some(draft.url),
            image_url: Some(draft.image_url),
            ..Default::default()
        }
    }

    /// Parse a price typed into a form. Blank means no price; a decimal
    /// comma is accepted.
    pub fn parse_price(raw: &str) -> DomainResult<Option<f64>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let cleaned: String = raw
            .trim_end_matches('€')
            .trim()
            .replace(',', ".");
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .map(Some)
            .ok_or_else(|| DomainError::InvalidInput(format!("not a price: {}", raw)))
    }
}

/// Partial update of a gift.
///
/// Outer `None` leaves the field untouched, `Some(None)` clears it. The
/// serialized form is a merge document: cleared fields become `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,
}

impl GiftPatch {
    /// Set or clear the reserver. A name must not be blank.
    pub fn reservation(reserver: Option<&str>) -> DomainResult<Self> {
        let reserved_by = match reserver {
            Some(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(DomainError::InvalidInput(
                        "a reservation needs a name".to_string(),
                    ));
                }
                Some(name.to_string())
            }
            None => None,
        };
        Ok(Self {
            reserved_by: Some(reserved_by),
            ..Default::default()
        })
    }

    pub fn purchased(purchased: bool) -> Self {
        Self {
            purchased: Some(purchased),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.url.is_none()
            && self.image_url.is_none()
            && self.reserved_by.is_none()
            && self.purchased.is_none()
    }

    /// Same normalization as `GiftDraft::normalized`, applied to the fields
    /// this patch touches.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(non_empty),
            price: self.price.map(finite),
            url: self.url.map(non_empty),
            image_url: self.image_url.map(non_empty),
            reserved_by: self
                .reserved_by
                .map(|r| r.map(|name| name.trim().to_string())),
            purchased: self.purchased,
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn finite(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite())
}
