//! # mapbench
//!
//! A benchmark harness comparing associative-container implementations under
//! identical, reproducible workloads: bulk range construction, single-key
//! insertion, concurrent lookup, single-key erasure, and a raw memory-copy
//! baseline.
//!
//! The containers are external collaborators, driven exclusively through
//! [`adapter::MapAdapter`]. The crate's own job is the harness: workload
//! generation that keeps random-number generation out of timed regions,
//! fair scheduling of single- and multi-threaded timed loops, and stable
//! rate aggregation.
//!
//! ## Executables
//!
//! | binary       | what it measures                                               |
//! |--------------|----------------------------------------------------------------|
//! | `throughput` | construct / insert / concurrent lookup / erase, all candidates |
//! | `bandwidth`  | `memcpy` baseline plus lookup rate by container footprint      |
//! | `footprint`  | one-shot insert-N probe for external RSS sampling              |
//!
//! ```bash
//! cargo run --release --bin throughput
//! cargo run --release --bin bandwidth --features mimalloc
//! cargo run --release --bin footprint -- --count_entries 1000000 --container dashmap
//! ```
//!
//! ## Concurrency model
//!
//! Concurrent-lookup scenarios share one container instance across a fixed
//! pool of worker threads. All mutation happens on the scenario thread with
//! `&mut` access before workers are spawned and after they are joined, so
//! the single-writer/multi-reader invariant is enforced by the borrow
//! checker rather than by convention. A [`std::sync::Barrier`] aligns the
//! start of every worker's timed region; scope join orders the timed
//! regions before teardown and aggregation.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Rate math converts op counters to f64 throughout; the counters stay far
// below 2^53 so the conversions are exact.
#![allow(clippy::cast_precision_loss)]
// Counter-to-index casts are masked below the sequence length first, and
// generated keys stay far below the signed range.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
// The wrap-around accessors must disappear into the timed loops; inlining
// is load-bearing here, not a hint.
#![allow(clippy::inline_always)]

pub mod adapter;
pub mod harness;
pub mod logging;
pub mod metrics;
pub mod probe;
pub mod registry;
pub mod scenario;
pub mod workload;

pub use adapter::{Candidate, MapAdapter};
pub use workload::{Key, KeySequence, RESERVED_KEY, Seed, Value, WordBuffer};
