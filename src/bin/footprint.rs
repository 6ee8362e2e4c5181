//! One-shot memory-footprint probe.
//!
//! Inserts `--count_entries` keys (value = generation index) into the
//! container named by `--container` and exits; observe peak RSS externally:
//!
//! ```bash
//! /usr/bin/time -v cargo run --release --bin footprint -- \
//!     --count_entries 1000000 --container dashmap
//! ```
//!
//! Exits 0 on success, 2 on invalid usage (wrong argument count or order,
//! unparseable count, unknown container name).

use mapbench::adapter::Candidate;
use mapbench::logging;
use mapbench::probe::{self, ProbeArgs};
use std::process;

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match ProbeArgs::parse(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: footprint --count_entries <n> --container <name>");
            eprint!("containers:");
            for candidate in Candidate::ALL {
                eprint!(" {}", candidate.token());
            }
            eprintln!();
            process::exit(2);
        }
    };

    probe::run(parsed);
}
