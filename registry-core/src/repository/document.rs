//! Document Codec
//!
//! Maps lists to and from the hosted database's JSON layout:
//!
//! ```text
//! lists/{listId}                 { id, name, gifts }
//! lists/{listId}/gifts/{giftId}  { id, name, price, url, imageUrl, reservedBy, purchased, addedAt }
//! ```
//!
//! Older documents store `gifts` as an array (the database turns arrays
//! into `"0"`, `"1"`, ... keys, possibly with holes). Those still decode;
//! writers migrate them to the keyed layout before patching a gift.

use serde_json::{json, Map, Value};

use crate::domain::{DomainError, DomainResult, Gift, GiftId, GiftList, ListId, ListSummary};

pub const LISTS_ROOT: &str = "lists";

pub fn list_path(id: &ListId) -> String {
    format!("{}/{}", LISTS_ROOT, id)
}

pub fn gift_path(list_id: &ListId, gift_id: &GiftId) -> String {
    format!("{}/{}/gifts/{}", LISTS_ROOT, list_id, gift_id)
}

/// How a document stores its gifts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftLayout {
    /// `gifts/{giftId}`
    Keyed,
    /// `gifts/{index}`
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedList {
    pub list: GiftList,
    pub layout: GiftLayout,
}

/// Decode the value stored at `lists/{id}`. `null` means no such list.
pub fn decode_list(id: &ListId, value: Value) -> DomainResult<Option<DecodedList>> {
    let mut doc = match value {
        Value::Null => return Ok(None),
        Value::Object(doc) => doc,
        other => {
            return Err(DomainError::StorageUnavailable(format!(
                "list {} is not a document: {}",
                id, other
            )))
        }
    };

    let name = match doc.remove("name") {
        Some(Value::String(name)) => name,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let (gifts, layout) = match doc.remove("gifts") {
        None | Some(Value::Null) => (Vec::new(), GiftLayout::Keyed),
        Some(Value::Object(entries)) => (decode_keyed(id, entries), GiftLayout::Keyed),
        Some(Value::Array(entries)) => (decode_legacy(id, entries), GiftLayout::Legacy),
        Some(other) => {
            log::warn!("list {} has unreadable gifts: {}", id, other);
            (Vec::new(), GiftLayout::Keyed)
        }
    };

    let mut list = GiftList {
        id: id.clone(),
        name,
        gifts,
    };
    list.sort_gifts();
    Ok(Some(DecodedList { list, layout }))
}

fn decode_keyed(list_id: &ListId, entries: Map<String, Value>) -> Vec<Gift> {
    entries
        .into_iter()
        .filter_map(|(key, value)| {
            let id = match GiftId::parse(&key) {
                Ok(id) => id,
                Err(e) => {
                    log::warn!("skipping gift in list {}: {}", list_id, e);
                    return None;
                }
            };
            decode_gift(list_id, id, value)
        })
        .collect()
}

fn decode_legacy(list_id: &ListId, entries: Vec<Value>) -> Vec<Gift> {
    entries
        .into_iter()
        .enumerate()
        .filter(|(_, value)| !value.is_null())
        .filter_map(|(index, value)| {
            // The stored id wins; the index is only a fallback.
            let fallback = GiftId::parse(&index.to_string()).ok()?;
            let mut gift = decode_gift(list_id, fallback.clone(), value.clone())?;
            if let Some(stored) = value.get("id").and_then(Value::as_str) {
                gift.id = GiftId::parse(stored).unwrap_or(fallback);
            }
            Some(gift)
        })
        .collect()
}

/// Decode one gift record; the record key is authoritative for the ID.
fn decode_gift(list_id: &ListId, id: GiftId, value: Value) -> Option<Gift> {
    match serde_json::from_value::<Gift>(value) {
        Ok(mut gift) => {
            gift.id = id;
            Some(gift)
        }
        Err(e) => {
            log::warn!("skipping malformed gift {} in list {}: {}", id, list_id, e);
            None
        }
    }
}

/// Decode the value stored at `lists`: summaries only.
pub fn decode_index(value: Value) -> DomainResult<Vec<ListSummary>> {
    let docs = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(docs) => docs,
        other => {
            return Err(DomainError::StorageUnavailable(format!(
                "list index is not a document: {}",
                other
            )))
        }
    };

    Ok(docs
        .into_iter()
        .filter_map(|(key, doc)| {
            let id = match ListId::parse(&key) {
                Ok(id) => id,
                Err(e) => {
                    log::warn!("skipping list: {}", e);
                    return None;
                }
            };
            let name = doc
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Some(ListSummary { id, name })
        })
        .collect())
}

/// Full document for `lists/{id}`, gifts keyed by ID.
pub fn encode_list(list: &GiftList) -> DomainResult<Value> {
    let mut gifts = Map::new();
    for gift in &list.gifts {
        gifts.insert(gift.id.to_string(), encode_gift(gift)?);
    }
    Ok(json!({
        "id": list.id,
        "name": list.name,
        "gifts": Value::Object(gifts),
    }))
}

pub fn encode_gift(gift: &Gift) -> DomainResult<Value> {
    Ok(serde_json::to_value(gift)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GiftDraft;

    fn list_id() -> ListId {
        ListId::parse("l1").unwrap()
    }

    #[test]
    fn test_paths() {
        let g = GiftId::parse("g1").unwrap();
        assert_eq!(list_path(&list_id()), "lists/l1");
        assert_eq!(gift_path(&list_id(), &g), "lists/l1/gifts/g1");
    }

    #[test]
    fn test_missing_list_decodes_to_none() {
        assert_eq!(decode_list(&list_id(), Value::Null).unwrap(), None);
    }

    #[test]
    fn test_keyed_document() {
        let value = json!({
            "id": "l1",
            "name": "Alice",
            "gifts": {
                "g2": { "name": "Kite", "addedAt": 20 },
                "g1": { "id": "stale", "name": "Bike", "price": 150, "addedAt": 10 }
            }
        });
        let decoded = decode_list(&list_id(), value).unwrap().unwrap();
        assert_eq!(decoded.layout, GiftLayout::Keyed);
        assert_eq!(decoded.list.name, "Alice");
        let ids: Vec<_> = decoded.list.gifts.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2"]);
        assert_eq!(decoded.list.gifts[0].price, Some(150.0));
    }

    #[test]
    fn test_document_without_gifts() {
        let decoded = decode_list(&list_id(), json!({ "name": "Alice" }))
            .unwrap()
            .unwrap();
        assert!(decoded.list.gifts.is_empty());
    }

    #[test]
    fn test_legacy_array_document() {
        let value = json!({
            "name": "Alice",
            "gifts": [
                { "id": "a-1", "name": "Bike", "reservedBy": "Bob" },
                null,
                { "url": "https://shop.example/kite" }
            ]
        });
        let decoded = decode_list(&list_id(), value).unwrap().unwrap();
        assert_eq!(decoded.layout, GiftLayout::Legacy);
        assert_eq!(decoded.list.gifts.len(), 2);
        assert_eq!(decoded.list.gifts[0].id.as_str(), "a-1");
        assert_eq!(decoded.list.gifts[1].id.as_str(), "2");
    }

    #[test]
    fn test_malformed_gift_skipped() {
        let value = json!({
            "name": "Alice",
            "gifts": { "g1": { "name": "Bike" }, "g2": { "price": "lots" } }
        });
        let decoded = decode_list(&list_id(), value).unwrap().unwrap();
        assert_eq!(decoded.list.gifts.len(), 1);
    }

    #[test]
    fn test_non_object_is_an_error() {
        let err = decode_list(&list_id(), json!("oops")).unwrap_err();
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }

    #[test]
    fn test_index() {
        let value = json!({
            "l1": { "name": "Alice", "gifts": { "g1": { "name": "Bike" } } },
            "l2": { "name": "Bob" }
        });
        let index = decode_index(value).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index[0].name, "Alice");
        assert!(decode_index(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_encode_then_decode_keeps_list() {
        let mut list = GiftList::new("Alice").unwrap();
        list.put_gift(
            Gift::from_draft(GiftDraft {
                name: Some("Bike".into()),
                price: Some(150.0),
                ..Default::default()
            })
            .unwrap(),
        );
        let value = encode_list(&list).unwrap();
        assert!(value["gifts"].is_object());
        let decoded = decode_list(&list.id, value).unwrap().unwrap();
        assert_eq!(decoded.list, list);
    }
}
