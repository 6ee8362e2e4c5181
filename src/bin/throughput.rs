//! Mixed-operation throughput benchmark.
//!
//! Drives every candidate container through four operation kinds (range
//! construction, single-key insertion, concurrent lookup, single-key
//! erasure) over identical pre-generated workloads, and prints one report
//! row per scenario.
//!
//! Run with:
//! ```bash
//! cargo run --release --bin throughput
//! RUST_LOG=mapbench=debug cargo run --release --bin throughput
//! cargo run --release --features mimalloc --bin throughput
//! ```
//!
//! No arguments: all tuning constants are compile-time
//! (see `mapbench::registry`).

use mapbench::workload::{KeySequence, Seed};
use mapbench::{logging, registry};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    logging::init();

    println!(
        "Will initialize with {} unique keys",
        registry::INITIAL_KEYS
    );
    println!(
        "Benchmark workload size for insertions is {} keys",
        registry::STEADY_KEYS
    );

    let seed = Seed::from_clock();
    tracing::info!(?seed, "generating workloads");
    let initial = KeySequence::initial(registry::INITIAL_KEYS, seed);
    let steady = KeySequence::steady(registry::STEADY_KEYS, registry::INITIAL_KEYS, seed);

    let rows = registry::run_throughput(&initial, &steady);
    tracing::info!(scenarios = rows.len(), "benchmark complete");
}
