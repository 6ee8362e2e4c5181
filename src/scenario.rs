//! Scenario drivers: one function per operation kind.
//!
//! Each driver executes one operation kind against one candidate container
//! under one configuration, generic over [`MapAdapter`] so the dispatch is
//! monomorphized away. Workload indexing is always `counter & mask` into a
//! pre-generated sequence; no random numbers are drawn and nothing
//! allocates inside a timed region (the memcpy scratch buffer is allocated
//! before the start barrier).
//!
//! ## Single-writer coordination
//!
//! The concurrent-lookup driver owns the shared-state protocol:
//!
//! 1. fill and counter reset happen on the calling thread through `&mut M`
//!    before any worker exists, so exclusive access is a compile-time fact;
//! 2. workers borrow `&M` inside a [`thread::scope`] and only call the
//!    read-only `contains`; a [`Barrier`] lines up the start of their timed
//!    regions;
//! 3. every worker flushes its private count into a shared atomic before
//!    returning, and scope join orders all of that before the caller reads
//!    the aggregate or mutates the map again.
//!
//! There is no grace-period sleep anywhere: the aggregate is exact, and the
//! driver asserts it against the per-thread counts on every run.

use crate::adapter::MapAdapter;
use crate::harness::{self, CHUNK, Sample};
use crate::workload::{Key, KeySequence, WordBuffer};
use std::hint::black_box;
use std::sync::Barrier;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// Only the first eighth of the sequence is erased: each key can be
/// meaningfully erased once and the container is not refilled mid-run.
pub const ERASE_FRACTION: u64 = 8;

/// How a timed loop is bounded.
#[derive(Clone, Copy, Debug)]
pub enum Drive {
    /// Open-ended: run until at least this much wall time has elapsed.
    MinTime(Duration),
    /// Exactly this many operations per thread.
    Fixed(u64),
}

/// Configuration of one concurrent-lookup run.
#[derive(Clone, Copy, Debug)]
pub struct LookupSpec {
    /// Entries the shared map is filled to before timing; also the
    /// wrap-around domain of the probe index. Power of two.
    pub target_size: usize,
    pub threads: usize,
    pub drive: Drive,
    /// Clear the map during teardown (set on the last, largest size tier
    /// to give memory back before the next candidate runs).
    pub clear_after: bool,
}

/// Configuration of one memcpy-baseline run.
#[derive(Clone, Copy, Debug)]
pub struct CopySpec {
    /// Bytes per copy; must divide the source buffer into a power-of-two
    /// number of chunks.
    pub chunk_bytes: usize,
    pub iterations_per_thread: u64,
    pub threads: usize,
}

/// Aggregated result of a multi-threaded timed region.
#[derive(Clone, Debug)]
pub struct ParallelSample {
    pub total_ops: u64,
    pub threads: usize,
    /// Longest per-thread timed region; the scenario's wall time.
    pub elapsed: Duration,
    /// Sum of per-thread rates; divide by `threads` for the averaged
    /// per-thread rate.
    pub rate_sum: f64,
    pub per_thread_ops: Vec<u64>,
}

impl ParallelSample {
    fn collect(samples: &[Sample]) -> Self {
        Self {
            total_ops: samples.iter().map(|s| s.iterations).sum(),
            threads: samples.len(),
            elapsed: samples.iter().map(|s| s.elapsed).max().unwrap_or_default(),
            rate_sum: samples.iter().map(Sample::rate).sum(),
            per_thread_ops: samples.iter().map(|s| s.iterations).collect(),
        }
    }
}

/// Repeatedly range-construct a fresh container from the full sequence.
/// Fully independent per pass; no shared state. One pass per iteration.
pub fn construct<M: MapAdapter>(keys: &KeySequence, min_duration: Duration) -> Sample {
    harness::run_min_duration(min_duration, 1, |_| {
        black_box(M::from_range(keys.as_slice()));
    })
}

/// Insert the whole sequence into one container, one key per iteration.
/// The iteration count equals the sequence length so no index repeats
/// within the run.
pub fn insert<M: MapAdapter>(keys: &KeySequence) -> Sample {
    let mut map = M::default();
    let sample = harness::run_fixed(keys.len() as u64, |ops| {
        black_box(map.insert(keys.at(ops), 0));
    });
    debug_assert_eq!(map.len(), keys.len());
    sample
}

/// Erase the first `len / ERASE_FRACTION` keys from a freshly
/// range-constructed container.
pub fn erase<M: MapAdapter>(keys: &KeySequence) -> Sample {
    let mut map = M::from_range(keys.as_slice());
    harness::run_fixed(keys.len() as u64 / ERASE_FRACTION, |ops| {
        black_box(map.erase(keys.at(ops)));
    })
}

/// Concurrent lookup against one shared container.
///
/// `keys[..filled]` are assumed inserted already (`filled == 0` for a fresh
/// map); the driver tops the map up to `target_size` before spawning
/// workers, so footprint tiers can grow one shared instance incrementally.
///
/// # Panics
///
/// Panics if `target_size` is not a power of two, exceeds `keys.len()`, or
/// if the flushed aggregate disagrees with the per-thread counts (which
/// would mean the happens-before protocol above is broken).
pub fn lookup_concurrent<M: MapAdapter>(
    map: &mut M,
    keys: &[Key],
    filled: usize,
    spec: &LookupSpec,
) -> ParallelSample {
    let target = spec.target_size;
    assert!(
        target.is_power_of_two(),
        "lookup target size must be a power of two, got {target}"
    );
    assert!(target <= keys.len(), "target size exceeds key pool");
    assert!(spec.threads >= 1, "at least one worker thread required");
    let mask = (target - 1) as u64;

    // Leader phase: the only writes of the whole scenario.
    for &k in &keys[filled..target] {
        map.insert(k, 0);
    }
    let shared_total = AtomicU64::new(0);

    let window = &keys[..target];
    let map_ref: &M = map;
    let samples = fan_out(spec.threads, |t, barrier| {
        let offset = start_offset(t);
        let probe = |ops: u64| {
            let idx = (ops.wrapping_add(offset) & mask) as usize;
            black_box(map_ref.contains(window[idx]));
        };
        barrier.wait();
        let sample = match spec.drive {
            Drive::Fixed(n) => harness::run_fixed(n, probe),
            Drive::MinTime(d) => harness::run_min_duration(d, CHUNK, probe),
        };
        shared_total.fetch_add(sample.iterations, Ordering::Relaxed);
        sample
    });

    let aggregate = shared_total.load(Ordering::Relaxed);
    let result = ParallelSample::collect(&samples);
    assert_eq!(
        aggregate, result.total_ops,
        "aggregate counter must equal the sum of per-thread counts"
    );

    if spec.clear_after {
        map.clear();
    }
    result
}

/// Raw memory-copy bandwidth baseline. No container involved: each thread
/// copies wrap-around-selected chunks of the random source buffer into a
/// thread-local scratch buffer.
///
/// # Panics
///
/// Panics if `chunk_bytes` does not split the buffer into a power-of-two
/// number of whole chunks.
pub fn memcpy_baseline(words: &WordBuffer, spec: &CopySpec) -> ParallelSample {
    let entry = size_of::<Key>();
    assert!(
        spec.chunk_bytes >= entry && spec.chunk_bytes % entry == 0,
        "chunk size must be a multiple of the word size"
    );
    let entries_per_chunk = spec.chunk_bytes / entry;
    let total_chunks = words.len() / entries_per_chunk;
    assert!(
        total_chunks.is_power_of_two(),
        "chunk count must be a power of two, got {total_chunks}"
    );
    let chunk_mask = (total_chunks - 1) as u64;

    let samples = fan_out(spec.threads, |t, barrier| {
        let offset = start_offset(t);
        let mut scratch: Vec<Key> = vec![0; entries_per_chunk];
        barrier.wait();
        harness::run_fixed(spec.iterations_per_thread, |ops| {
            let chunk_idx = (ops.wrapping_add(offset) & chunk_mask) as usize;
            scratch.copy_from_slice(words.chunk(chunk_idx, entries_per_chunk));
            black_box(scratch.as_slice());
        })
    });

    ParallelSample::collect(&samples)
}

/// Spawn `threads` scoped workers running the identical loop body and
/// collect their samples. Worker 0 is spawned first but holds no special
/// role; all coordination is the caller's.
fn fan_out<F>(threads: usize, worker: F) -> Vec<Sample>
where
    F: Fn(usize, &Barrier) -> Sample + Sync,
{
    let barrier = Barrier::new(threads);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let barrier = &barrier;
                let worker = &worker;
                scope.spawn(move || worker(t, barrier))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .collect()
    })
}

/// Decorrelating start offset: shifts each worker into a different phase of
/// the shared sequence without drawing random numbers at run time.
#[inline]
fn start_offset(thread_idx: usize) -> u64 {
    (thread_idx as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}
