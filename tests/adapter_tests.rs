//! Capability-set conformance tests, run against every candidate adapter.
//!
//! Each check is written once against the `MapAdapter` trait and stamped
//! out per candidate, so a new candidate only has to pass the same bar.

use mapbench::adapter::MapAdapter;
use mapbench::workload::{Key, KeySequence, RESERVED_KEY, Seed, Value};
use std::collections::{BTreeMap, HashMap};

fn contains_after_insert<M: MapAdapter>() {
    let mut map = M::default();
    assert!(map.insert(42, 7));
    assert!(map.contains(42));
    assert!(!map.contains(43));
}

fn contains_after_erase<M: MapAdapter>() {
    let mut map = M::default();
    let _ = map.insert(42, 7);
    assert!(map.erase(42));
    assert!(!map.contains(42));
}

fn insert_reports_novelty<M: MapAdapter>() {
    let mut map = M::default();
    assert!(map.insert(1, 0));
    assert!(!map.insert(1, 9), "re-insert must not report a new entry");
    assert_eq!(map.len(), 1);
}

fn erase_reports_absence<M: MapAdapter>() {
    let mut map = M::default();
    assert!(!map.erase(5));
    let _ = map.insert(5, 0);
    assert!(map.erase(5));
    assert!(!map.erase(5));
}

fn range_construction_matches_incremental<M: MapAdapter>() {
    let seq = KeySequence::initial(64, Seed::fixed(11));
    let bulk = M::from_range(seq.as_slice());
    let mut incremental = M::default();
    for &k in seq.as_slice() {
        let _ = incremental.insert(k, 0);
    }

    assert_eq!(bulk.len(), incremental.len());
    for &k in seq.as_slice() {
        assert!(bulk.contains(k));
        assert_eq!(bulk.contains(k), incremental.contains(k));
    }
    // The reserved key is absent from both, including in adapters that
    // could claim it as an internal marker.
    assert_eq!(
        bulk.contains(RESERVED_KEY),
        incremental.contains(RESERVED_KEY)
    );
    assert!(!bulk.contains(RESERVED_KEY));
}

fn clear_empties<M: MapAdapter>() {
    let seq = KeySequence::initial(16, Seed::fixed(3));
    let mut map = M::from_range(seq.as_slice());
    assert_eq!(map.len(), 16);
    assert!(!map.is_empty());

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);

    // The container must stay usable after clear.
    assert!(map.insert(99, 1));
    assert!(map.contains(99));
}

fn default_is_ready<M: MapAdapter>() {
    let mut map = M::default();
    assert!(map.is_empty());
    assert!(!map.contains(0));
    assert!(map.insert(0, 0));
    assert!(map.erase(0));
}

macro_rules! adapter_suite {
    ($module:ident, $map:ty) => {
        mod $module {
            use super::*;

            #[test]
            fn contains_after_insert() {
                super::contains_after_insert::<$map>();
            }

            #[test]
            fn contains_after_erase() {
                super::contains_after_erase::<$map>();
            }

            #[test]
            fn insert_reports_novelty() {
                super::insert_reports_novelty::<$map>();
            }

            #[test]
            fn erase_reports_absence() {
                super::erase_reports_absence::<$map>();
            }

            #[test]
            fn range_construction_matches_incremental() {
                super::range_construction_matches_incremental::<$map>();
            }

            #[test]
            fn clear_empties() {
                super::clear_empties::<$map>();
            }

            #[test]
            fn default_is_ready() {
                super::default_is_ready::<$map>();
            }
        }
    };
}

adapter_suite!(std_hash, HashMap<Key, Value>);
adapter_suite!(std_btree, BTreeMap<Key, Value>);
adapter_suite!(ahash, ::ahash::AHashMap<Key, Value>);
adapter_suite!(foldhash, ::foldhash::HashMap<Key, Value>);
adapter_suite!(dashmap, ::dashmap::DashMap<Key, Value>);
adapter_suite!(papaya, ::papaya::HashMap<Key, Value>);
