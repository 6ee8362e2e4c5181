//! Memory-footprint probe logic.
//!
//! The `footprint` binary inserts `count_entries` keys into one named
//! candidate and exits; peak resident memory is sampled externally (e.g.
//! `/usr/bin/time -v` or a wrapper polling `/proc/<pid>/status`). Argument
//! parsing is strict on purpose: the probe is driven by scripts, and a
//! silently reinterpreted flag would corrupt a whole measurement matrix.

use crate::adapter::{Candidate, MapAdapter, dispatch};
use std::fmt;
use std::hint::black_box;

/// Invalid invocation of the footprint probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Not exactly two flag/value pairs.
    WrongArgCount { got: usize },
    /// A flag out of order or misspelled.
    UnexpectedFlag {
        expected: &'static str,
        got: String,
    },
    /// `--count_entries` value did not parse as an unsigned integer.
    BadCount(String),
    /// `--container` value is not a known candidate token.
    UnknownContainer(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongArgCount { got } => {
                write!(f, "expected exactly 4 arguments, got {got}")
            }
            Self::UnexpectedFlag { expected, got } => {
                write!(f, "expected flag `{expected}`, got `{got}`")
            }
            Self::BadCount(value) => {
                write!(f, "`--count_entries` wants an unsigned integer, got `{value}`")
            }
            Self::UnknownContainer(value) => {
                write!(f, "unknown container `{value}`")
            }
        }
    }
}

impl std::error::Error for UsageError {}

/// Parsed probe invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeArgs {
    pub count_entries: u64,
    pub candidate: Candidate,
}

impl ProbeArgs {
    /// Parse `args` (without the program name). Exactly
    /// `--count_entries <n> --container <token>`, in that order.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] describing the first violation found.
    pub fn parse(args: &[String]) -> Result<Self, UsageError> {
        if args.len() != 4 {
            return Err(UsageError::WrongArgCount { got: args.len() });
        }
        if args[0] != "--count_entries" {
            return Err(UsageError::UnexpectedFlag {
                expected: "--count_entries",
                got: args[0].clone(),
            });
        }
        let count_entries: u64 = args[1]
            .parse()
            .map_err(|_| UsageError::BadCount(args[1].clone()))?;
        if args[2] != "--container" {
            return Err(UsageError::UnexpectedFlag {
                expected: "--container",
                got: args[2].clone(),
            });
        }
        let candidate = Candidate::from_token(&args[3])
            .ok_or_else(|| UsageError::UnknownContainer(args[3].clone()))?;
        Ok(Self {
            count_entries,
            candidate,
        })
    }
}

/// Insert `count_entries` sequential keys into the named candidate, each
/// carrying its generation index as the value, and hold the container alive
/// long enough for an external sampler to observe its footprint.
pub fn run(args: ProbeArgs) {
    let ProbeArgs {
        count_entries,
        candidate,
    } = args;

    // UFCS throughout: candidates like papaya carry inherent methods with
    // the same names but guard-taking signatures, which would shadow the
    // adapter's methods under plain method syntax.
    dispatch!(candidate, M => {
        let mut map = <M as Default>::default();
        for i in 0..count_entries {
            let _ = MapAdapter::insert(&mut map, i as Key, i as Value);
        }
        tracing::info!(
            container = candidate.token(),
            entries = MapAdapter::len(&map),
            "probe filled"
        );
        black_box(&map);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_valid_invocation() {
        let parsed =
            ProbeArgs::parse(&args(&["--count_entries", "1024", "--container", "dashmap"]))
                .unwrap();
        assert_eq!(parsed.count_entries, 1024);
        assert_eq!(parsed.candidate, Candidate::DashMap);
    }

    #[test]
    fn rejects_wrong_arg_count() {
        let err = ProbeArgs::parse(&args(&["--count_entries", "10"])).unwrap_err();
        assert_eq!(err, UsageError::WrongArgCount { got: 2 });
    }

    #[test]
    fn rejects_swapped_flag_order() {
        let err = ProbeArgs::parse(&args(&["--container", "dashmap", "--count_entries", "10"]))
            .unwrap_err();
        assert!(matches!(err, UsageError::UnexpectedFlag { expected: "--count_entries", .. }));
    }

    #[test]
    fn rejects_bad_count() {
        let err = ProbeArgs::parse(&args(&["--count_entries", "many", "--container", "ahash"]))
            .unwrap_err();
        assert_eq!(err, UsageError::BadCount("many".to_string()));
    }

    #[test]
    fn rejects_unknown_container() {
        let err = ProbeArgs::parse(&args(&["--count_entries", "10", "--container", "judy"]))
            .unwrap_err();
        assert_eq!(err, UsageError::UnknownContainer("judy".to_string()));
    }

    #[test]
    fn every_token_round_trips() {
        for candidate in Candidate::ALL {
            assert_eq!(Candidate::from_token(candidate.token()), Some(candidate));
        }
    }
}
