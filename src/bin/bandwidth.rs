//! Memory-bandwidth baseline and lookup-by-footprint benchmark.
//!
//! First measures raw `memcpy` bandwidth over a large random buffer as the
//! reference ceiling, then measures concurrent lookup rates while the same
//! buffer's words fill each candidate to a ladder of container footprints.
//! Comparing the two shows how much of the memory subsystem each container
//! actually reaches.
//!
//! Run with:
//! ```bash
//! cargo run --release --bin bandwidth
//! cargo run --release --features mimalloc --bin bandwidth
//! ```
//!
//! No arguments: footprint tiers and copy sizes are compile-time
//! (see `mapbench::registry`).

use mapbench::workload::{BYTES_PER_ENTRY, Seed, WordBuffer};
use mapbench::{logging, registry};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    logging::init();

    let largest = registry::FOOTPRINT_TIERS[registry::FOOTPRINT_TIERS.len() - 1];
    let entries = largest / BYTES_PER_ENTRY;

    let seed = Seed::from_clock();
    tracing::info!(?seed, entries, "generating random word buffer");
    let words = WordBuffer::random(entries, seed);

    let rows = registry::run_bandwidth(&words);
    tracing::info!(scenarios = rows.len(), "benchmark complete");
}
