//! Property-based tests for workload generation.
//!
//! These pin the invariants the timed loops silently rely on: power-of-two
//! sequences are exact permutations, the two sequences are disjoint, the
//! reserved key never appears, and mask indexing wraps without skew.

use mapbench::workload::{KeySequence, RESERVED_KEY, Seed, WordBuffer};
use proptest::prelude::*;

/// Power-of-two lengths up to 4096.
fn pow2_len() -> impl Strategy<Value = usize> {
    (0u32..=12).prop_map(|e| 1usize << e)
}

proptest! {
    /// The initial sequence is a permutation of `0..len`: every value
    /// appears exactly once.
    #[test]
    fn initial_is_permutation(len in pow2_len(), seed in any::<u64>()) {
        let seq = KeySequence::initial(len, Seed::fixed(seed));
        let mut keys = seq.as_slice().to_vec();
        keys.sort_unstable();
        let expected: Vec<i64> = (0..len as i64).collect();
        prop_assert_eq!(keys, expected);
    }

    /// The steady sequence is a permutation of `offset..offset + len`.
    #[test]
    fn steady_is_offset_permutation(
        len in pow2_len(),
        offset in 0usize..4096,
        seed in any::<u64>(),
    ) {
        let seq = KeySequence::steady(len, offset, Seed::fixed(seed));
        let mut keys = seq.as_slice().to_vec();
        keys.sort_unstable();
        let expected: Vec<i64> =
            (offset as i64..(offset + len) as i64).collect();
        prop_assert_eq!(keys, expected);
    }

    /// With `offset == initial_len`, initial and steady sequences share no
    /// key, so steady-state traffic never trivially hits pre-existing keys.
    #[test]
    fn sequences_are_disjoint(len in pow2_len(), seed in any::<u64>()) {
        let initial = KeySequence::initial(len, Seed::fixed(seed));
        let steady = KeySequence::steady(len, len, Seed::fixed(seed ^ 1));
        let max_initial = initial.as_slice().iter().max().copied();
        let min_steady = steady.as_slice().iter().min().copied();
        prop_assert!(max_initial < min_steady);
    }

    /// No generator emits the reserved key, so adapters may claim it as an
    /// empty-slot marker.
    #[test]
    fn reserved_key_never_generated(
        len in pow2_len(),
        offset in 0usize..4096,
        seed in any::<u64>(),
    ) {
        let initial = KeySequence::initial(len, Seed::fixed(seed));
        let steady = KeySequence::steady(len, offset, Seed::fixed(seed));
        prop_assert!(initial.as_slice().iter().all(|&k| k != RESERVED_KEY));
        prop_assert!(steady.as_slice().iter().all(|&k| k != RESERVED_KEY));
    }

    /// `(i & mask)` visits every slot exactly once per `len` consecutive
    /// counter values, for any starting counter.
    #[test]
    fn wraparound_cycles_exactly_once(
        len in pow2_len(),
        start in any::<u64>(),
    ) {
        let mask = (len - 1) as u64;
        let mut seen = vec![false; len];
        for step in 0..len as u64 {
            let idx = (start.wrapping_add(step) & mask) as usize;
            prop_assert!(!seen[idx], "slot {} visited twice", idx);
            seen[idx] = true;
        }
        prop_assert!(seen.iter().all(|&s| s));
    }

    /// `at` is exactly mask indexing into the backing slice.
    #[test]
    fn at_matches_mask_indexing(
        len in pow2_len(),
        seed in any::<u64>(),
        ops in any::<u64>(),
    ) {
        let seq = KeySequence::initial(len, Seed::fixed(seed));
        prop_assert_eq!(
            seq.at(ops),
            seq.as_slice()[(ops & seq.mask()) as usize]
        );
    }

    /// Re-seeding with the same value reproduces the sequence exactly
    /// within one process.
    #[test]
    fn same_seed_reproduces(len in pow2_len(), seed in any::<u64>()) {
        let a = KeySequence::initial(len, Seed::fixed(seed));
        let b = KeySequence::initial(len, Seed::fixed(seed));
        prop_assert_eq!(a.as_slice(), b.as_slice());
    }

    /// The random word buffer honors its requested length and chunks
    /// address it without overlap.
    #[test]
    fn word_buffer_len_and_chunks(seed in any::<u64>()) {
        let buf = WordBuffer::random(256, Seed::fixed(seed));
        prop_assert_eq!(buf.len(), 256);
        let a = buf.chunk(0, 32);
        let b = buf.chunk(1, 32);
        prop_assert_eq!(a, &buf.as_slice()[..32]);
        prop_assert_eq!(b, &buf.as_slice()[32..64]);
    }
}
