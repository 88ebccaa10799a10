//! Property-Based Tests for the item cache and service
//!
//! Uses proptest to check cache fidelity and the list round-trip.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use crate::cache::{cache_key, CacheBackend, ItemCache, MemoryCache};
use crate::models::{Item, NewItem};
use crate::service::ItemService;
use crate::store::MemoryItemStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
fn name_strategy() -> impl Strategy<Value = String> {
    // Includes quotes, backslashes and non-ASCII text to exercise JSON escaping
    "[a-zA-Z0-9 \"\\\\é😀]{0,32}"
}

fn price_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e9..1.0e9f64,
        Just(0.0),
        Just(-0.0),
        Just(f64::MAX),
        Just(f64::MIN_POSITIVE),
    ]
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (1..i64::MAX, name_strategy(), price_strategy())
        .prop_map(|(id, name, price)| Item { id, name, price })
}

fn cached_service() -> ItemService {
    let cache = ItemCache::new(Arc::new(MemoryCache::new()), TEST_TTL);
    ItemService::new(Arc::new(MemoryItemStore::new()), Some(cache))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* finite item, writing it through the cache succeeds and the
    // cached copy decodes to a field-for-field equal item.
    #[test]
    fn prop_write_through_fidelity(item in item_strategy()) {
        let backend = MemoryCache::new();
        let cache = ItemCache::new(Arc::new(backend.clone()), TEST_TTL);

        tokio_test::block_on(async {
            cache.write_through(&item).await.unwrap();

            let raw = backend.get(&cache_key(item.id)).await.unwrap().unwrap();
            let decoded: Item = serde_json::from_slice(&raw).unwrap();
            prop_assert_eq!(decoded, item.clone());
            prop_assert_eq!(cache.fetch(item.id).await.unwrap(), item);
            Ok::<(), TestCaseError>(())
        })?;
    }

    // *For any* sequence of creates, listing returns every item with its
    // name and price, ordered by unique positive ids.
    #[test]
    fn prop_create_list_round_trip(
        entries in prop::collection::vec((name_strategy(), price_strategy()), 0..20)
    ) {
        let service = cached_service();

        tokio_test::block_on(async {
            let mut ids = Vec::new();
            for (name, price) in &entries {
                ids.push(service.create(NewItem::new(name.clone(), *price)).await.unwrap());
            }

            let unique: HashSet<i64> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());
            prop_assert!(ids.iter().all(|id| *id > 0));

            let listed = service.list().await.unwrap();
            prop_assert_eq!(listed.len(), entries.len());
            for (item, (id, (name, price))) in listed.iter().zip(ids.iter().zip(&entries)) {
                prop_assert_eq!(item.id, *id);
                prop_assert_eq!(&item.name, name);
                prop_assert_eq!(item.price, *price);
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    // *For any* item created then updated, the cache holds exactly the
    // updated value.
    #[test]
    fn prop_update_refreshes_cache(
        (name, price) in (name_strategy(), price_strategy()),
        (new_name, new_price) in (name_strategy(), price_strategy()),
    ) {
        let service = cached_service();

        tokio_test::block_on(async {
            let id = service.create(NewItem::new(name, price)).await.unwrap();
            let updated = Item::new(id, new_name, new_price);
            service.update(updated.clone()).await.unwrap();

            prop_assert_eq!(service.get(&cache_key(id)).await.unwrap(), updated);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
