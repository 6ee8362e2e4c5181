//! Uniform capability surface over the candidate containers.
//!
//! Every candidate is driven through [`MapAdapter`] so the scenario drivers
//! never touch a library-specific API. Construction quirks live here:
//! hasher-state defaults (`foldhash` constructs through `HashMapExt`),
//! pin/guard protocols (`papaya` routes every call through `pin`), and
//! shared-reference mutation (`dashmap` takes `&self` for writes, wrapped
//! back into the `&mut` contract).
//!
//! The trait is dispatched by monomorphization (see [`dispatch`]); each
//! scenario is compiled once per candidate, so the adapter adds no
//! indirection inside timed regions.

use crate::workload::{Key, Value};
use ahash::AHashMap;
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};

/// The capability set the harness requires of a candidate container.
///
/// Contract:
/// - `Default` construction leaves the container ready for `insert` /
///   `contains` / `erase`; any out-of-band setup (sentinel keys, shard
///   sizing) happens transparently inside it. A sentinel must be a value
///   the workload generator never emits; [`crate::RESERVED_KEY`] is kept
///   free for exactly this.
/// - [`from_range`](Self::from_range) must be observably equivalent to
///   default-construct-then-insert-all, but may take a bulk path.
/// - [`contains`](Self::contains) is a pure read, safe to call from many
///   threads concurrently as long as no thread mutates (`Self: Sync`; the
///   scenario drivers guarantee no concurrent writer by construction).
pub trait MapAdapter: Default + Send + Sync {
    /// Display name used in reports, e.g. `std::HashMap`.
    const NAME: &'static str;

    /// Bulk construction from a key range; values are the don't-care `0`.
    #[must_use]
    fn from_range(keys: &[Key]) -> Self;

    /// Returns `true` if the key was newly inserted. Overwrite semantics
    /// for an existing key are implementation-defined and never asserted.
    fn insert(&mut self, key: Key, value: Value) -> bool;

    /// Pure membership test.
    #[must_use]
    fn contains(&self, key: Key) -> bool;

    /// Returns `true` if a matching entry was removed.
    fn erase(&mut self, key: Key) -> bool;

    /// Empty the container, releasing or recycling its backing storage.
    fn clear(&mut self);

    #[must_use]
    fn len(&self) -> usize;

    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MapAdapter for HashMap<Key, Value> {
    const NAME: &'static str = "std::HashMap";

    fn from_range(keys: &[Key]) -> Self {
        keys.iter().map(|&k| (k, 0)).collect()
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        Self::insert(self, key, value).is_none()
    }

    #[inline(always)]
    fn contains(&self, key: Key) -> bool {
        self.contains_key(&key)
    }

    fn erase(&mut self, key: Key) -> bool {
        self.remove(&key).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl MapAdapter for BTreeMap<Key, Value> {
    const NAME: &'static str = "std::BTreeMap";

    fn from_range(keys: &[Key]) -> Self {
        keys.iter().map(|&k| (k, 0)).collect()
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        Self::insert(self, key, value).is_none()
    }

    #[inline(always)]
    fn contains(&self, key: Key) -> bool {
        self.contains_key(&key)
    }

    fn erase(&mut self, key: Key) -> bool {
        self.remove(&key).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl MapAdapter for AHashMap<Key, Value> {
    const NAME: &'static str = "ahash::AHashMap";

    fn from_range(keys: &[Key]) -> Self {
        keys.iter().map(|&k| (k, 0)).collect()
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        HashMap::insert(self, key, value).is_none()
    }

    #[inline(always)]
    fn contains(&self, key: Key) -> bool {
        self.contains_key(&key)
    }

    fn erase(&mut self, key: Key) -> bool {
        self.remove(&key).is_some()
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl MapAdapter for foldhash::HashMap<Key, Value> {
    const NAME: &'static str = "foldhash::HashMap";

    fn from_range(keys: &[Key]) -> Self {
        let mut map = <Self as foldhash::HashMapExt>::with_capacity(keys.len());
        for &k in keys {
            let _ = Self::insert(&mut map, k, 0);
        }
        map
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        Self::insert(self, key, value).is_none()
    }

    #[inline(always)]
    fn contains(&self, key: Key) -> bool {
        self.contains_key(&key)
    }

    fn erase(&mut self, key: Key) -> bool {
        self.remove(&key).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl MapAdapter for DashMap<Key, Value> {
    const NAME: &'static str = "dashmap::DashMap";

    fn from_range(keys: &[Key]) -> Self {
        keys.iter().map(|&k| (k, 0)).collect()
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        Self::insert(self, key, value).is_none()
    }

    #[inline(always)]
    fn contains(&self, key: Key) -> bool {
        self.contains_key(&key)
    }

    fn erase(&mut self, key: Key) -> bool {
        self.remove(&key).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl MapAdapter for papaya::HashMap<Key, Value> {
    const NAME: &'static str = "papaya::HashMap";

    fn from_range(keys: &[Key]) -> Self {
        let map = Self::new();
        {
            // One pin for the whole fill is papaya's bulk path: the guard
            // amortizes reclamation bookkeeping across all inserts.
            let pinned = map.pin();
            for &k in keys {
                pinned.insert(k, 0);
            }
        }
        map
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        self.pin().insert(key, value).is_none()
    }

    #[inline(always)]
    fn contains(&self, key: Key) -> bool {
        self.pin().get(&key).is_some()
    }

    fn erase(&mut self, key: Key) -> bool {
        self.pin().remove(&key).is_some()
    }

    fn clear(&mut self) {
        self.pin().clear();
    }

    fn len(&self) -> usize {
        self.pin().len()
    }
}

/// Name tag for one candidate container, used by the registry and the
/// footprint probe's `--container` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Candidate {
    StdHash,
    StdBtree,
    AHash,
    FoldHash,
    DashMap,
    Papaya,
}

impl Candidate {
    /// Every candidate, in report order.
    pub const ALL: [Self; 6] = [
        Self::StdHash,
        Self::StdBtree,
        Self::AHash,
        Self::FoldHash,
        Self::DashMap,
        Self::Papaya,
    ];

    /// CLI token accepted by the footprint probe.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::StdHash => "std-hash",
            Self::StdBtree => "std-btree",
            Self::AHash => "ahash",
            Self::FoldHash => "foldhash",
            Self::DashMap => "dashmap",
            Self::Papaya => "papaya",
        }
    }

    /// Display name used in reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::StdHash => <HashMap<Key, Value> as MapAdapter>::NAME,
            Self::StdBtree => <BTreeMap<Key, Value> as MapAdapter>::NAME,
            Self::AHash => <AHashMap<Key, Value> as MapAdapter>::NAME,
            Self::FoldHash => <foldhash::HashMap<Key, Value> as MapAdapter>::NAME,
            Self::DashMap => <DashMap<Key, Value> as MapAdapter>::NAME,
            Self::Papaya => <papaya::HashMap<Key, Value> as MapAdapter>::NAME,
        }
    }

    /// Parse a CLI token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token)
    }
}

/// Monomorphize a block over the concrete container type behind a
/// [`Candidate`] tag. `$ty` is bound to the container type inside `$body`,
/// so each scenario compiles once per candidate with zero dispatch cost in
/// the timed region.
macro_rules! dispatch {
    ($candidate:expr, $ty:ident => $body:expr) => {{
        use $crate::workload::{Key, Value};
        match $candidate {
            $crate::adapter::Candidate::StdHash => {
                type $ty = ::std::collections::HashMap<Key, Value>;
                $body
            }
            $crate::adapter::Candidate::StdBtree => {
                type $ty = ::std::collections::BTreeMap<Key, Value>;
                $body
            }
            $crate::adapter::Candidate::AHash => {
                type $ty = ::ahash::AHashMap<Key, Value>;
                $body
            }
            $crate::adapter::Candidate::FoldHash => {
                type $ty = ::foldhash::HashMap<Key, Value>;
                $body
            }
            $crate::adapter::Candidate::DashMap => {
                type $ty = ::dashmap::DashMap<Key, Value>;
                $body
            }
            $crate::adapter::Candidate::Papaya => {
                type $ty = ::papaya::HashMap<Key, Value>;
                $body
            }
        }
    }};
}

pub(crate) use dispatch;
