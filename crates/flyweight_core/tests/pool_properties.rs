//! Integration tests for the flyweight pool sharing invariants.
//!
//! Run with: cargo test --package flyweight_core --test pool_properties

use std::collections::HashSet;
use std::sync::Arc;

use flyweight_core::{FieldSet, FlyweightKey, FlyweightPool, IntrinsicState, Lookup};
use proptest::prelude::*;

// ============================================================================
// FIXED SCENARIOS
// ============================================================================

#[test]
fn oak_twice_pine_once() {
    let mut pool = FlyweightPool::new();

    let oak_a = pool.get_or_create(FieldSet::new(["oak", "green", "rough"]).unwrap());
    let oak_b = pool.get_or_create(FieldSet::new(["oak", "green", "rough"]).unwrap());
    let pine = pool.get_or_create(FieldSet::new(["pine", "dark_green", "smooth"]).unwrap());

    assert_eq!(pool.len(), 2);
    assert!(Arc::ptr_eq(&oak_a, &oak_b));
    assert!(!Arc::ptr_eq(&oak_a, &pine));
}

#[test]
fn prepopulated_vehicle_models() {
    let initial = [
        ["Chevrolet", "Camaro2018", "pink"],
        ["Mercedes Benz", "C300", "black"],
        ["Mercedes Benz", "C500", "red"],
        ["BMW", "M5", "red"],
        ["BMW", "X6", "white"],
    ];
    let mut pool = FlyweightPool::with_initial(initial.map(|f| FieldSet::new(f).unwrap()));
    assert_eq!(pool.list_flyweights().len(), 5);

    let (_, outcome) =
        pool.get_or_create_with_outcome(FieldSet::new(["BMW", "X1", "red"]).unwrap());
    assert_eq!(outcome, Lookup::Miss);
    assert_eq!(pool.list_flyweights().len(), 6);

    let (_, outcome) =
        pool.get_or_create_with_outcome(FieldSet::new(["BMW", "M5", "red"]).unwrap());
    assert_eq!(outcome, Lookup::Hit);
    assert_eq!(pool.list_flyweights().len(), 6);
}

#[test]
fn contexts_outlive_nothing_they_share() {
    let mut pool = FlyweightPool::new();
    let handles: Vec<_> = (0..1000)
        .map(|_| pool.get_or_create(FieldSet::new(["pine", "dark_green"]).unwrap()))
        .collect();

    // Pool + 1000 handles
    assert_eq!(Arc::strong_count(&handles[0]), 1001);
    drop(handles);

    let key = FieldSet::new(["dark_green", "pine"]).unwrap().canonical_key();
    let kept = pool.get(&key).unwrap();
    assert_eq!(Arc::strong_count(&kept), 2);
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_=\\\\ ]{0,6}[a-z]"
}

fn fields() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(field(), 1..5)
}

proptest! {
    #[test]
    fn permutations_share_one_flyweight(fields in fields(), seed in any::<u64>()) {
        let mut shuffled = fields.clone();
        let len = shuffled.len();
        let rotate_by = usize::try_from(seed % len as u64).unwrap();
        shuffled.rotate_left(rotate_by);
        shuffled.reverse();

        let mut pool = FlyweightPool::new();
        let a = pool.get_or_create(FieldSet::new(fields).unwrap());
        let b = pool.get_or_create(FieldSet::new(shuffled).unwrap());

        prop_assert!(Arc::ptr_eq(&a, &b));
        prop_assert_eq!(pool.len(), 1);
    }

    #[test]
    fn differing_sets_never_share(a in fields(), b in fields()) {
        let mut sorted_a = a.clone();
        let mut sorted_b = b.clone();
        sorted_a.sort();
        sorted_b.sort();
        prop_assume!(sorted_a != sorted_b);

        let mut pool = FlyweightPool::new();
        let fa = pool.get_or_create(FieldSet::new(a).unwrap());
        let fb = pool.get_or_create(FieldSet::new(b).unwrap());

        prop_assert!(!Arc::ptr_eq(&fa, &fb));
        prop_assert_eq!(pool.len(), 2);
    }

    #[test]
    fn size_equals_distinct_requests(requests in prop::collection::vec(fields(), 1..40)) {
        let mut pool = FlyweightPool::new();
        let mut distinct = HashSet::new();

        for fields in requests {
            let mut canonical = fields.clone();
            canonical.sort();
            distinct.insert(canonical);

            let before = pool.len();
            pool.get_or_create(FieldSet::new(fields).unwrap());
            prop_assert!(pool.len() - before <= 1);
        }

        prop_assert_eq!(pool.len(), distinct.len());
        prop_assert_eq!(pool.stats().misses as usize, distinct.len());
    }

    #[test]
    fn named_keys_ignore_field_order(x in field(), y in field()) {
        let forward = FlyweightKey::from_named([("name", x.as_str()), ("color", y.as_str())]);
        let backward = FlyweightKey::from_named([("color", y.as_str()), ("name", x.as_str())]);
        prop_assert_eq!(forward, backward);
    }
}
