//! Repository Integration Tests
//!
//! Tests for ListStore against the in-memory backend.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, GiftDraft, GiftId, GiftPatch, ListId};
    use crate::repository::{ListStore, MemoryStore};
    use futures::StreamExt;
    use std::sync::Arc;

    fn named(name: &str) -> GiftDraft {
        GiftDraft {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_list_all() {
        let store = MemoryStore::new();
        let alice = store.create_list("Alice").await.expect("Failed to create");
        store.create_list("  Bob  ").await.expect("Failed to create");

        assert!(!alice.id.is_empty());
        assert!(alice.gifts.is_empty());

        let mut names: Vec<_> = store
            .list_all()
            .await
            .expect("List failed")
            .into_iter()
            .map(|s| s.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_create_blank_name_rejected() {
        let store = MemoryStore::new();
        let err = store.create_list("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_list() {
        let store = MemoryStore::new();
        let err = store.get_list(&ListId::generate()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_list_removes_gifts() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();

        store.delete_list(&list.id).await.expect("Delete failed");

        assert!(store.get_list(&list.id).await.unwrap_err().is_not_found());
        assert!(store
            .update_gift(&list.id, &gift.id, GiftPatch::purchased(true))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store
            .add_gift(&list.id, named("Kite"))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store
            .delete_gift(&list.id, &gift.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_delete_unknown_list_is_noop() {
        let store = MemoryStore::new();
        let kept = store.create_list("Alice").await.unwrap();
        store
            .delete_list(&ListId::generate())
            .await
            .expect("Delete of unknown list should succeed");
        assert_eq!(store.list_all().await.unwrap(), vec![kept.summary()]);
    }

    #[tokio::test]
    async fn test_add_gift_name_only() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();

        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();
        assert!(gift.price.is_none());
        assert!(gift.url.is_none());
        assert!(gift.reserved_by.is_none());
        assert!(!gift.purchased);

        let stored = store.get_list(&list.id).await.unwrap();
        assert_eq!(stored.gifts, vec![gift]);
    }

    #[tokio::test]
    async fn test_add_invalid_gift_leaves_list_unchanged() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();

        let draft = GiftDraft {
            name: Some("   ".into()),
            price: Some(20.0),
            ..Default::default()
        };
        let err = store.add_gift(&list.id, draft).await.unwrap_err();
        assert_eq!(err, DomainError::InvalidGift);
        assert!(store.get_list(&list.id).await.unwrap().gifts.is_empty());
    }

    #[tokio::test]
    async fn test_gift_ids_unique() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let a = store.add_gift(&list.id, named("Bike")).await.unwrap();
        let b = store.add_gift(&list.id, named("Bike")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.get_list(&list.id).await.unwrap().gifts.len(), 2);
    }

    #[tokio::test]
    async fn test_gifts_keep_insertion_order() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        // Added back to back, most of these share a millisecond.
        for i in 0..30 {
            store.add_gift(&list.id, named(&format!("gift {}", i))).await.unwrap();
        }

        let names: Vec<_> = store
            .get_list(&list.id)
            .await
            .unwrap()
            .gifts
            .into_iter()
            .map(|g| g.name.unwrap())
            .collect();
        let expected: Vec<_> = (0..30).map(|i| format!("gift {}", i)).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_update_cannot_strip_last_descriptive_field() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();

        let patch = GiftPatch {
            name: Some(None),
            ..Default::default()
        };
        let err = store.update_gift(&list.id, &gift.id, patch).await.unwrap_err();
        assert_eq!(err, DomainError::InvalidGift);

        let stored = store.get_list(&list.id).await.unwrap();
        assert_eq!(stored.gifts[0].name.as_deref(), Some("Bike"));
    }

    #[tokio::test]
    async fn test_update_unknown_gift() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let err = store
            .update_gift(&list.id, &GiftId::generate(), GiftPatch::purchased(true))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_toggle_purchased_twice() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();

        let once = store.set_purchased(&list.id, &gift.id, true).await.unwrap();
        assert!(once.purchased);
        let twice = store.set_purchased(&list.id, &gift.id, false).await.unwrap();
        assert!(!twice.purchased);
        assert_eq!(store.get_list(&list.id).await.unwrap().gifts[0], gift);
    }

    #[tokio::test]
    async fn test_reserve_then_clear() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();

        let reserved = store
            .set_reservation(&list.id, &gift.id, Some(" Bob "))
            .await
            .unwrap();
        assert_eq!(reserved.reserved_by.as_deref(), Some("Bob"));

        let cleared = store.set_reservation(&list.id, &gift.id, None).await.unwrap();
        assert!(cleared.reserved_by.is_none());
    }

    #[tokio::test]
    async fn test_blank_reserver_rejected() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();

        let err = store
            .set_reservation(&list.id, &gift.id, Some("  "))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_unpurchase_keeps_reserver() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();

        store.set_reservation(&list.id, &gift.id, Some("Bob")).await.unwrap();
        store.set_purchased(&list.id, &gift.id, true).await.unwrap();
        let gift = store.set_purchased(&list.id, &gift.id, false).await.unwrap();
        assert_eq!(gift.reserved_by.as_deref(), Some("Bob"));
    }

    #[tokio::test]
    async fn test_concurrent_disjoint_updates_both_persist() {
        let store = Arc::new(MemoryStore::new());
        let list = store.create_list("Alice").await.unwrap();
        let gift = store.add_gift(&list.id, named("Bike")).await.unwrap();

        let reserve = GiftPatch::reservation(Some("Bob")).unwrap();
        let purchase = GiftPatch::purchased(true);
        let (a, b) = tokio::join!(
            store.update_gift(&list.id, &gift.id, reserve),
            store.update_gift(&list.id, &gift.id, purchase),
        );
        a.unwrap();
        b.unwrap();

        let stored = store.get_list(&list.id).await.unwrap();
        assert_eq!(stored.gifts[0].reserved_by.as_deref(), Some("Bob"));
        assert!(stored.gifts[0].purchased);
    }

    #[tokio::test]
    async fn test_share_and_reserve_scenario() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let gift = store
            .add_gift(
                &list.id,
                GiftDraft {
                    name: Some("Bike".into()),
                    price: Some(150.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // A second visitor opens the shared link and reserves.
        let shared = store.get_list(&list.id).await.unwrap();
        assert_eq!(shared.gifts.len(), 1);
        store
            .set_reservation(&list.id, &gift.id, Some("Bob"))
            .await
            .unwrap();
        store.set_purchased(&list.id, &gift.id, true).await.unwrap();

        let stored = store.get_list(&list.id).await.unwrap();
        let bike = stored.require_gift(&gift.id).unwrap();
        assert_eq!(bike.name.as_deref(), Some("Bike"));
        assert_eq!(bike.price, Some(150.0));
        assert_eq!(bike.reserved_by.as_deref(), Some("Bob"));
        assert!(bike.purchased);
    }

    #[tokio::test]
    async fn test_delete_gift() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let bike = store.add_gift(&list.id, named("Bike")).await.unwrap();
        let kite = store.add_gift(&list.id, named("Kite")).await.unwrap();

        store.delete_gift(&list.id, &bike.id).await.unwrap();
        // Already gone: still fine.
        store.delete_gift(&list.id, &bike.id).await.unwrap();

        assert_eq!(store.get_list(&list.id).await.unwrap().gifts, vec![kite]);
    }

    #[tokio::test]
    async fn test_subscription_follows_changes() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        let mut stream = store.subscribe_list(&list.id).await.unwrap();

        let first = stream.next().await.unwrap().unwrap().unwrap();
        assert!(first.gifts.is_empty());

        store.add_gift(&list.id, named("Bike")).await.unwrap();
        let second = stream.next().await.unwrap().unwrap().unwrap();
        assert_eq!(second.gifts.len(), 1);

        // Changes to other lists are not delivered here.
        let other = store.create_list("Bob").await.unwrap();
        store.add_gift(&other.id, named("Kite")).await.unwrap();

        store.delete_list(&list.id).await.unwrap();
        let last = stream.next().await.unwrap().unwrap();
        assert!(last.is_none());
    }

    #[tokio::test]
    async fn test_subscribe_missing_list() {
        let store = MemoryStore::new();
        let mut stream = store.subscribe_list(&ListId::generate()).await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), None);
    }

    #[tokio::test]
    async fn test_offline_store() {
        let store = MemoryStore::new();
        let list = store.create_list("Alice").await.unwrap();
        store.set_available(false);

        assert!(matches!(
            store.list_all().await,
            Err(DomainError::StorageUnavailable(_))
        ));
        assert!(matches!(
            store.add_gift(&list.id, named("Bike")).await,
            Err(DomainError::StorageUnavailable(_))
        ));

        store.set_available(true);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
