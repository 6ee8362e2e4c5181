//! Scenario registry and dispatcher.
//!
//! Enumerates the cross product of operation kind × candidate × size ×
//! thread count, hands each combination to the drivers in
//! [`crate::scenario`], and prints the tabular report. All tuning constants
//! live here; there is no configuration file.

use crate::adapter::{Candidate, dispatch};
use crate::harness::Sample;
use crate::metrics::{RateCounter, ReportRow, print_header, print_section};
use crate::scenario::{self, CopySpec, Drive, LookupSpec};
use crate::workload::{BYTES_PER_ENTRY, KeySequence, WordBuffer};
use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

/// Entries in the bulk-construction key sequence.
pub const INITIAL_KEYS: usize = 1 << 22;

/// Entries in the steady-state (insert/lookup/erase) key sequence.
/// Disjoint from the initial sequence by construction.
pub const STEADY_KEYS: usize = 1 << 22;

/// Minimum wall time for open-ended scenarios; stabilizes cache state.
pub const MIN_DURATION: Duration = Duration::from_secs(10);

/// Container footprints for the lookup-by-footprint scenarios.
pub const FOOTPRINT_TIERS: [usize; 5] = [
    16 << 20,
    32 << 20,
    64 << 20,
    128 << 20,
    256 << 20,
];

/// Per-copy sizes for the memcpy baseline.
pub const COPY_CHUNK_SIZES: [usize; 4] = [1 << 10, 4 << 10, 1 << 20, 4 << 20];

/// Total bytes the memcpy baseline moves, split across threads.
pub const TOTAL_COPY_BYTES: u64 = 64 << 30;

/// Fixed per-thread lookup count for each footprint tier.
pub const LOOKUPS_PER_THREAD: u64 = 1_000_000;

/// The candidates the bandwidth driver keeps: the fastest of each family
/// plus the std baseline. The full field runs in `throughput`.
pub const FOOTPRINT_CANDIDATES: [Candidate; 3] =
    [Candidate::StdHash, Candidate::FoldHash, Candidate::DashMap];

/// Worker threads for concurrent scenarios: available parallelism, halved
/// on x86_64 where SMT sibling contention skews throughput numbers.
#[must_use]
pub fn max_threads() -> usize {
    let cores = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    if cfg!(target_arch = "x86_64") {
        (cores / 2).max(1)
    } else {
        cores
    }
}

/// Operation kinds the harness measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Construct,
    Insert,
    Lookup,
    Erase,
    Copy,
}

impl OpKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Construct => "construct",
            Self::Insert => "insert",
            Self::Lookup => "lookup",
            Self::Erase => "erase",
            Self::Copy => "memcpy",
        }
    }
}

/// One fully parameterized benchmark run. Immutable once built.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: String,
    pub kind: OpKind,
    pub candidate: Option<Candidate>,
    /// Entries for container scenarios; bytes per copy for [`OpKind::Copy`].
    pub size: usize,
    pub threads: usize,
    /// Per-thread iteration count; `None` means the run is governed by
    /// `min_duration` instead.
    pub iterations: Option<u64>,
    pub min_duration: Duration,
    pub clear_after: bool,
}

impl Scenario {
    fn named(kind: OpKind, candidate: Candidate, size: usize) -> Self {
        Self {
            name: format!("{}.{}", candidate.display_name(), kind.label()),
            kind,
            candidate: Some(candidate),
            size,
            threads: 1,
            iterations: None,
            min_duration: MIN_DURATION,
            clear_after: false,
        }
    }

    const fn drive(&self) -> Drive {
        match self.iterations {
            Some(n) => Drive::Fixed(n),
            None => Drive::MinTime(self.min_duration),
        }
    }
}

/// Run the full throughput cross product and print the report as it goes.
///
/// # Panics
///
/// Panics if a scenario was registered without its candidate tag; the
/// enumeration below always sets one.
pub fn run_throughput(initial: &KeySequence, steady: &KeySequence) -> Vec<ReportRow> {
    let threads = max_threads();
    let mut rows = Vec::new();
    print_header();

    print_section("Construct from range");
    for candidate in Candidate::ALL {
        let scenario = Scenario::named(OpKind::Construct, candidate, steady.len());
        rows.push(emit(run_construct(&scenario, steady)));
    }

    print_section("Insert");
    for candidate in Candidate::ALL {
        let mut scenario = Scenario::named(OpKind::Insert, candidate, steady.len());
        scenario.iterations = Some(steady.len() as u64);
        rows.push(emit(run_insert(&scenario, steady)));
    }

    print_section(&format!("Find ({threads} threads)"));
    for candidate in Candidate::ALL {
        let mut scenario = Scenario::named(OpKind::Lookup, candidate, initial.len());
        scenario.threads = threads;
        scenario.clear_after = true;
        rows.push(emit(run_lookup_fresh(&scenario, initial)));
    }

    print_section("Erase");
    for candidate in Candidate::ALL {
        let mut scenario = Scenario::named(OpKind::Erase, candidate, steady.len());
        scenario.iterations = Some(steady.len() as u64 / scenario::ERASE_FRACTION);
        rows.push(emit(run_erase(&scenario, steady)));
    }

    rows
}

/// Run the memcpy baseline and the lookup-by-footprint tiers.
pub fn run_bandwidth(words: &WordBuffer) -> Vec<ReportRow> {
    let threads = max_threads();
    let mut rows = Vec::new();
    print_header();

    print_section(&format!("memcpy baseline ({threads} threads)"));
    for chunk_bytes in COPY_CHUNK_SIZES {
        let iterations = TOTAL_COPY_BYTES / (chunk_bytes as u64 * threads as u64);
        let scenario = Scenario {
            name: format!("memcpy/{}", format_bytes(chunk_bytes)),
            kind: OpKind::Copy,
            candidate: None,
            size: chunk_bytes,
            threads,
            iterations: Some(iterations),
            min_duration: Duration::ZERO,
            clear_after: false,
        };
        rows.push(emit(run_copy(&scenario, words)));
    }

    print_section(&format!("Lookup by container footprint ({threads} threads)"));
    for candidate in FOOTPRINT_CANDIDATES {
        rows.extend(run_footprint_tiers(candidate, words, threads));
    }

    rows
}

fn run_construct(scenario: &Scenario, keys: &KeySequence) -> ReportRow {
    let candidate = scenario.candidate.expect("container scenario");
    let sample = dispatch!(candidate, M => {
        scenario::construct::<M>(keys, scenario.min_duration)
    });
    let entries = sample.iterations * keys.len() as u64;
    let counters = vec![RateCounter::ops("entries/core/s", entries, sample.elapsed)];
    ReportRow::new(scenario.name.clone(), sample, counters)
}

fn run_insert(scenario: &Scenario, keys: &KeySequence) -> ReportRow {
    let candidate = scenario.candidate.expect("container scenario");
    let sample = dispatch!(candidate, M => { scenario::insert::<M>(keys) });
    let counters = vec![RateCounter::ops(
        "entries/core/s",
        sample.iterations,
        sample.elapsed,
    )];
    ReportRow::new(scenario.name.clone(), sample, counters)
}

fn run_erase(scenario: &Scenario, keys: &KeySequence) -> ReportRow {
    let candidate = scenario.candidate.expect("container scenario");
    let sample = dispatch!(candidate, M => { scenario::erase::<M>(keys) });
    let counters = vec![RateCounter::ops(
        "entries/core/s",
        sample.iterations,
        sample.elapsed,
    )];
    ReportRow::new(scenario.name.clone(), sample, counters)
}

fn run_lookup_fresh(scenario: &Scenario, keys: &KeySequence) -> ReportRow {
    let candidate = scenario.candidate.expect("container scenario");
    let spec = LookupSpec {
        target_size: scenario.size,
        threads: scenario.threads,
        drive: scenario.drive(),
        clear_after: scenario.clear_after,
    };
    let parallel = dispatch!(candidate, M => {
        let mut map = M::default();
        scenario::lookup_concurrent(&mut map, keys.as_slice(), 0, &spec)
    });
    let sample = Sample {
        iterations: parallel.total_ops,
        elapsed: parallel.elapsed,
    };
    let counters = vec![
        RateCounter::from_rate("entries/core/s", parallel.rate_sum).per_thread(parallel.threads),
    ];
    ReportRow::new(scenario.name.clone(), sample, counters)
}

fn run_copy(scenario: &Scenario, words: &WordBuffer) -> ReportRow {
    let spec = CopySpec {
        chunk_bytes: scenario.size,
        iterations_per_thread: scenario.iterations.unwrap_or(0),
        threads: scenario.threads,
    };
    let parallel = scenario::memcpy_baseline(words, &spec);
    let sample = Sample {
        iterations: parallel.total_ops,
        elapsed: parallel.elapsed,
    };
    let counters = vec![
        RateCounter::from_rate("copies/s", parallel.rate_sum),
        RateCounter::from_byte_rate("bytes/s", parallel.rate_sum * scenario.size as f64),
    ];
    ReportRow::new(scenario.name.clone(), sample, counters)
}

/// One candidate's footprint ladder: a single shared map grows through the
/// tiers and is cleared after the largest one. Rows print as they finish.
fn run_footprint_tiers(candidate: Candidate, words: &WordBuffer, threads: usize) -> Vec<ReportRow> {
    let last_tier = FOOTPRINT_TIERS[FOOTPRINT_TIERS.len() - 1];
    let mut rows = Vec::new();

    dispatch!(candidate, M => {
        let mut map = <M as Default>::default();
        let mut filled = 0_usize;
        for tier_bytes in FOOTPRINT_TIERS {
            let entries = tier_bytes / BYTES_PER_ENTRY;
            let scenario = Scenario {
                name: format!(
                    "{}.lookup/{}",
                    candidate.display_name(),
                    format_bytes(tier_bytes)
                ),
                kind: OpKind::Lookup,
                candidate: Some(candidate),
                size: entries,
                threads,
                iterations: Some(LOOKUPS_PER_THREAD),
                min_duration: Duration::ZERO,
                clear_after: tier_bytes == last_tier,
            };
            let spec = LookupSpec {
                target_size: entries,
                threads,
                drive: scenario.drive(),
                clear_after: scenario.clear_after,
            };
            let parallel = scenario::lookup_concurrent(&mut map, words.as_slice(), filled, &spec);
            filled = entries;

            let sample = Sample {
                iterations: parallel.total_ops,
                elapsed: parallel.elapsed,
            };
            let counters = vec![
                RateCounter::from_rate("lookups/s", parallel.rate_sum),
                RateCounter::from_byte_rate(
                    "bytes/s",
                    parallel.rate_sum * BYTES_PER_ENTRY as f64,
                ),
            ];
            rows.push(emit(ReportRow::new(scenario.name, sample, counters)));
        }
    });

    rows
}

fn emit(row: ReportRow) -> ReportRow {
    println!("{row}");
    row
}

fn format_bytes(bytes: usize) -> String {
    if bytes >= 1 << 20 {
        format!("{}MiB", bytes >> 20)
    } else {
        format!("{}KiB", bytes >> 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_tiers_are_power_of_two_entry_counts() {
        for tier in FOOTPRINT_TIERS {
            assert!((tier / BYTES_PER_ENTRY).is_power_of_two());
        }
    }

    #[test]
    fn sequences_are_disjoint_by_construction() {
        // Steady keys start exactly where initial keys end.
        assert_eq!(INITIAL_KEYS + STEADY_KEYS, 2 * INITIAL_KEYS);
    }

    #[test]
    fn max_threads_is_positive() {
        assert!(max_threads() >= 1);
    }

    #[test]
    fn scenario_drive_prefers_fixed_iterations() {
        let mut s = Scenario::named(OpKind::Insert, Candidate::StdHash, 8);
        s.iterations = Some(8);
        assert!(matches!(s.drive(), Drive::Fixed(8)));
        s.iterations = None;
        assert!(matches!(s.drive(), Drive::MinTime(_)));
    }
}
