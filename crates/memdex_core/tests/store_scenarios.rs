//! End-to-end scenarios exercising the store, index trees, and planner
//! together.

use memdex_core::{key, IndexHandle, IndexQuery, MemoryStore, ObservableStore, StoreEvent};

#[derive(Debug, Clone, PartialEq)]
struct Rec {
    primary: u32,
    key2: String,
    key3: String,
}

fn rec(primary: u32, key2: &str, key3: &str) -> Rec {
    Rec {
        primary,
        key2: key2.to_string(),
        key3: key3.to_string(),
    }
}

fn four_records() -> Vec<Rec> {
    vec![
        rec(1, "asdf", "k"),
        rec(2, "asdf", "m"),
        rec(3, "qwer", "k"),
        rec(4, "zxcv", "n"),
    ]
}

struct Fixture {
    store: MemoryStore<Rec, u32, String>,
    by_key2: IndexHandle,
    by_key3: IndexHandle,
    by_triple: IndexHandle,
}

fn fixture() -> Fixture {
    let mut builder = MemoryStore::builder(|r: &Rec| r.primary);
    let by_key2 = builder.add_index([key(|r: &Rec| r.key2.clone())]).unwrap();
    let by_key3 = builder.add_index([key(|r: &Rec| r.key3.clone())]).unwrap();
    let by_triple = builder
        .add_index([
            key(|r: &Rec| r.key2.clone()),
            key(|r: &Rec| r.key3.clone()),
            key(|r: &Rec| r.primary.to_string()),
        ])
        .unwrap();
    Fixture {
        store: builder.build(),
        by_key2,
        by_key3,
        by_triple,
    }
}

#[test]
fn shared_attribute_value_groups_records() {
    let mut f = fixture();
    f.store.add_batch(four_records());

    let mut hits: Vec<u32> = f
        .store
        .get_by_index(f.by_key2, &["asdf".to_string()])
        .unwrap()
        .iter()
        .map(|r| r.primary)
        .collect();
    hits.sort_unstable();
    assert_eq!(hits, vec![1, 2]);
}

#[test]
fn deleting_shrinks_then_removes_the_leaf() {
    let mut f = fixture();
    f.store.add_batch(four_records());

    // Delete one of the two "asdf" records: the other remains reachable.
    f.store.delete(&1);
    let hits = f
        .store
        .get_by_index(f.by_key2, &["asdf".to_string()])
        .unwrap();
    assert_eq!(hits, vec![&rec(2, "asdf", "m")]);

    // Deleting the last one removes the "asdf" leaf entirely.
    f.store.delete(&2);
    assert!(f
        .store
        .get_by_index(f.by_key2, &["asdf".to_string()])
        .is_none());
}

#[test]
fn depth_three_index_drains_to_an_empty_top_level_map() {
    let mut f = fixture();
    f.store.add_batch(four_records());
    assert_eq!(f.store.index_len(f.by_triple).unwrap(), 4);

    for pk in [1, 2, 3, 4] {
        f.store.delete(&pk);
    }

    // An empty map, not a map containing empty children.
    assert!(f.store.index_is_empty(f.by_triple).unwrap());
    assert_eq!(f.store.index_len(f.by_triple).unwrap(), 0);
}

#[test]
fn multi_index_intersection_and_not_found_dominance() {
    let mut f = fixture();
    f.store.add_batch(four_records());

    let hits = f
        .store
        .get_by_indices(&[
            IndexQuery::new(f.by_key2, vec!["asdf".to_string()]),
            IndexQuery::new(f.by_key3, vec!["k".to_string()]),
        ])
        .unwrap();
    assert_eq!(hits, vec![&rec(1, "asdf", "k")]);

    // A key matching nothing in one declaration yields not-found
    // overall, not an empty set.
    assert!(f
        .store
        .get_by_indices(&[
            IndexQuery::new(f.by_key2, vec!["asdf".to_string()]),
            IndexQuery::new(f.by_key3, vec!["missing".to_string()]),
        ])
        .is_none());
}

#[test]
fn update_on_a_fresh_primary_key_behaves_like_add() {
    let mut f = fixture();

    let stored = f.store.update(rec(9, "fresh", "x"));

    assert_eq!(stored, rec(9, "fresh", "x"));
    assert_eq!(f.store.get(&9), Some(&rec(9, "fresh", "x")));
    assert_eq!(
        f.store
            .get_by_index(f.by_key2, &["fresh".to_string()])
            .unwrap(),
        vec![&rec(9, "fresh", "x")]
    );
}

#[test]
fn update_replaces_index_membership() {
    let mut f = fixture();
    f.store.add(rec(1, "a", "x"));

    f.store.update(rec(1, "b", "x"));

    assert!(f
        .store
        .get_by_index(f.by_key2, &["a".to_string()])
        .is_none());
    let hits = f.store.get_by_index(f.by_key2, &["b".to_string()]).unwrap();
    assert_eq!(hits, vec![&rec(1, "b", "x")]);
    assert_eq!(f.store.len(), 1);
}

#[test]
fn arity_mismatch_is_not_found_and_harmless() {
    let mut f = fixture();
    f.store.add_batch(four_records());
    let before = f.store.index_len(f.by_triple).unwrap();

    // Two keys against a three-level index.
    assert!(f
        .store
        .get_by_index(f.by_triple, &["asdf".to_string(), "k".to_string()])
        .is_none());

    // No mutation beyond what legitimate inserts already did.
    assert_eq!(f.store.index_len(f.by_triple).unwrap(), before);
    let hits = f
        .store
        .get_by_index(
            f.by_triple,
            &["asdf".to_string(), "k".to_string(), "1".to_string()],
        )
        .unwrap();
    assert_eq!(hits, vec![&rec(1, "asdf", "k")]);
}

#[test]
fn round_trip_add_get_delete() {
    let mut f = fixture();
    let record = rec(5, "a", "b");

    f.store.add(record.clone());
    assert_eq!(f.store.get(&5), Some(&record));

    assert_eq!(f.store.delete(&5), Some(record));
    assert_eq!(f.store.get(&5), None);
}

#[test]
fn observable_wrapper_forwards_and_publishes() {
    let f = fixture();
    let mut store = ObservableStore::new(f.store);
    let events = store.subscribe();

    store.add_batch(four_records());
    store.delete(&4);
    store.clear();

    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::AddedBatch(four_records())
    );
    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::Deleted(rec(4, "zxcv", "n"))
    );
    assert_eq!(events.try_recv().unwrap(), StoreEvent::Cleared);
    assert!(events.try_recv().is_err());

    assert!(store.is_empty());
    assert!(store
        .get_by_index(f.by_key2, &["asdf".to_string()])
        .is_none());
}
