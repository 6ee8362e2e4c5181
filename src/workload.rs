//! Workload generation.
//!
//! All workloads are pre-generated before any timed region starts, so that
//! no random-number generation happens while the clock is running. Indexing
//! into a sequence uses a bitmask against a power-of-two length instead of a
//! modulo, which is why every generator here asserts power-of-two sizing up
//! front rather than failing silently with a skewed index distribution.
//!
//! Two kinds of workload exist:
//! - [`KeySequence`]: a shuffled permutation of a contiguous integer range,
//!   unique keys, used for construct/insert/lookup/erase scenarios.
//! - [`WordBuffer`]: fully random 64-bit words with no uniqueness guarantee,
//!   used as the `memcpy` source and as the key pool for the
//!   lookup-by-footprint scenarios.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::time::{SystemTime, UNIX_EPOCH};

/// Benchmark key type. Fixed-width signed 64-bit, matching the value type.
pub type Key = i64;

/// Benchmark value type. Either `0` (don't-care payload) or the key's
/// generation index (footprint probe).
pub type Value = i64;

/// Key reserved for containers that need an "empty slot" marker.
///
/// No generator ever emits this value, so an adapter is free to claim it
/// during default construction. The conformance tests probe it explicitly.
pub const RESERVED_KEY: Key = Key::MAX;

/// Bytes one logical entry occupies: key plus value.
pub const BYTES_PER_ENTRY: usize = size_of::<Key>() + size_of::<Value>();

/// Seed for workload generation.
///
/// [`Seed::from_clock`] makes runs non-reproducible across processes but
/// reproducible within one process if the same `Seed` value is reused; pass
/// [`Seed::fixed`] to pin a run exactly. This trade-off is deliberate: the
/// harness compares candidates against each other inside one process, not
/// across runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed(u64);

impl Seed {
    /// Derive a seed from wall-clock time.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        Self(nanos as u64)
    }

    /// A pinned seed, for tests and reproducible re-runs.
    #[must_use]
    pub const fn fixed(value: u64) -> Self {
        Self(value)
    }

    fn rng(self) -> StdRng {
        StdRng::seed_from_u64(self.0)
    }
}

/// An immutable, pre-shuffled permutation of a contiguous key range.
///
/// Length is always a power of two so `counter & mask()` walks the sequence
/// with wrap-around and zero arithmetic cost in the timed region.
#[derive(Clone, Debug)]
pub struct KeySequence {
    keys: Vec<Key>,
    mask: u64,
}

impl KeySequence {
    /// Shuffled permutation of `0..len`. Backs bulk construction and the
    /// fill phase of lookup scenarios.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or not a power of two.
    #[must_use]
    pub fn initial(len: usize, seed: Seed) -> Self {
        Self::permutation(0, len, seed)
    }

    /// Shuffled permutation of `offset..offset + len`. With
    /// `offset == initial_len` this is disjoint from the initial sequence,
    /// so steady-state inserts never trivially hit pre-existing keys.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or not a power of two.
    #[must_use]
    pub fn steady(len: usize, offset: usize, seed: Seed) -> Self {
        Self::permutation(offset, len, seed)
    }

    /// Wrap an explicit key list. Used by tests and custom workloads.
    ///
    /// # Panics
    ///
    /// Panics if the length is zero or not a power of two.
    #[must_use]
    pub fn from_keys(keys: Vec<Key>) -> Self {
        let len = keys.len();
        assert!(
            len.is_power_of_two(),
            "sequence length must be a power of two for mask indexing, got {len}"
        );
        Self {
            keys,
            mask: (len - 1) as u64,
        }
    }

    fn permutation(offset: usize, len: usize, seed: Seed) -> Self {
        assert!(
            len.is_power_of_two(),
            "sequence length must be a power of two for mask indexing, got {len}"
        );
        let mut keys: Vec<Key> = (offset..offset + len).map(|k| k as Key).collect();
        keys.shuffle(&mut seed.rng());
        Self {
            keys,
            mask: (len - 1) as u64,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `len - 1`; valid as an index mask because `len` is a power of two.
    #[must_use]
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    /// Wrap-around lookup: `ops & mask`. The only indexing the timed loops
    /// perform.
    #[inline(always)]
    #[must_use]
    pub fn at(&self, ops: u64) -> Key {
        // Index is masked below len, so this never goes out of bounds.
        self.keys[(ops & self.mask) as usize]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }
}

/// Fully random 64-bit words, no uniqueness requirement.
///
/// Sized to the largest configured container footprint; doubles as the
/// `memcpy` source buffer and the key pool for footprint-tier lookups.
#[derive(Clone, Debug)]
pub struct WordBuffer {
    words: Vec<Key>,
}

impl WordBuffer {
    /// Generate `len` random words.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or not a power of two.
    #[must_use]
    pub fn random(len: usize, seed: Seed) -> Self {
        assert!(
            len.is_power_of_two(),
            "buffer length must be a power of two for mask indexing, got {len}"
        );
        let mut rng = seed.rng();
        let words = (0..len).map(|_| rng.random::<Key>()).collect();
        Self { words }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Key] {
        &self.words
    }

    /// Contiguous chunk `chunk_idx` of `entries_per_chunk` words.
    #[inline(always)]
    #[must_use]
    pub fn chunk(&self, chunk_idx: usize, entries_per_chunk: usize) -> &[Key] {
        let start = chunk_idx * entries_per_chunk;
        &self.words[start..start + entries_per_chunk]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let a = KeySequence::initial(64, Seed::fixed(7));
        let b = KeySequence::initial(64, Seed::fixed(7));
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn steady_is_offset() {
        let seq = KeySequence::steady(8, 8, Seed::fixed(1));
        assert!(seq.as_slice().iter().all(|&k| (8..16).contains(&k)));
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn rejects_non_power_of_two() {
        let _ = KeySequence::initial(24, Seed::fixed(0));
    }

    #[test]
    fn word_buffer_chunking() {
        let buf = WordBuffer::random(64, Seed::fixed(3));
        assert_eq!(buf.chunk(7, 8).len(), 8);
        assert_eq!(buf.chunk(7, 8), &buf.as_slice()[56..64]);
    }
}
