//! Rate counters and report formatting.
//!
//! Raw per-thread operation counts become the rates the harness actually
//! reports: operations per second (base-1000 prefixes) and bytes per second
//! (base-1024 prefixes). Multi-threaded scenarios additionally report an
//! averaged per-thread rate so single- and multi-threaded runs stay
//! comparable.

use crate::harness::Sample;
use std::fmt;
use std::time::Duration;

/// Prefix base for humanized rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    /// 1000-based (operations, entries, copies).
    Decimal,
    /// 1024-based (bytes).
    Binary,
}

/// One named rate attached to a scenario result.
#[derive(Clone, Copy, Debug)]
pub struct RateCounter {
    pub label: &'static str,
    pub per_second: f64,
    pub scale: Scale,
}

impl RateCounter {
    /// `count` operations over `elapsed` wall time.
    #[must_use]
    pub fn ops(label: &'static str, count: u64, elapsed: Duration) -> Self {
        Self {
            label,
            per_second: count as f64 / elapsed.as_secs_f64(),
            scale: Scale::Decimal,
        }
    }

    /// `bytes` over `elapsed` wall time, 1024-based.
    #[must_use]
    pub fn bytes(label: &'static str, bytes: u64, elapsed: Duration) -> Self {
        Self {
            label,
            per_second: bytes as f64 / elapsed.as_secs_f64(),
            scale: Scale::Binary,
        }
    }

    /// A pre-computed rate (e.g. summed per-thread rates).
    #[must_use]
    pub const fn from_rate(label: &'static str, per_second: f64) -> Self {
        Self {
            label,
            per_second,
            scale: Scale::Decimal,
        }
    }

    /// A pre-computed byte rate, 1024-based.
    #[must_use]
    pub const fn from_byte_rate(label: &'static str, per_second: f64) -> Self {
        Self {
            label,
            per_second,
            scale: Scale::Binary,
        }
    }

    /// Divide an aggregate rate across `threads`, the multi-threaded analog
    /// of a single-core rate.
    #[must_use]
    pub fn per_thread(mut self, threads: usize) -> Self {
        self.per_second /= threads as f64;
        self
    }
}

impl fmt::Display for RateCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, prefix) = humanize(self.per_second, self.scale);
        write!(f, "{}={value:.3}{prefix}/s", self.label)
    }
}

fn humanize(value: f64, scale: Scale) -> (f64, &'static str) {
    let (base, prefixes): (f64, [&'static str; 4]) = match scale {
        Scale::Decimal => (1000.0, ["", "k", "M", "G"]),
        Scale::Binary => (1024.0, ["", "Ki", "Mi", "Gi"]),
    };
    let mut value = value;
    let mut idx = 0;
    while value.abs() >= base && idx + 1 < prefixes.len() {
        value /= base;
        idx += 1;
    }
    (value, prefixes[idx])
}

/// One line of the final report: scenario name, raw sample, rate counters.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub name: String,
    pub iterations: u64,
    pub elapsed: Duration,
    pub counters: Vec<RateCounter>,
}

impl ReportRow {
    #[must_use]
    pub fn new(name: impl Into<String>, sample: Sample, counters: Vec<RateCounter>) -> Self {
        Self {
            name: name.into(),
            iterations: sample.iterations,
            elapsed: sample.elapsed,
            counters,
        }
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<44} {:>14} {:>12}",
            self.name,
            self.iterations,
            format!("{:.3?}", self.elapsed),
        )?;
        for counter in &self.counters {
            write!(f, "  {counter}")?;
        }
        Ok(())
    }
}

/// Print the section banner used between report blocks.
pub fn print_section(title: &str) {
    println!();
    println!("{}", "-".repeat(80));
    println!("{title}");
    println!("{}", "-".repeat(80));
}

/// Print the column header once per report.
pub fn print_header() {
    println!("{:<44} {:>14} {:>12}  counters", "benchmark", "iterations", "time");
    println!("{}", "=".repeat(80));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_decimal() {
        let (v, p) = humanize(12_340_000.0, Scale::Decimal);
        assert_eq!(p, "M");
        assert!((v - 12.34).abs() < 1e-9);
    }

    #[test]
    fn humanize_binary() {
        let (v, p) = humanize(2048.0, Scale::Binary);
        assert_eq!(p, "Ki");
        assert!((v - 2.0).abs() < 1e-9);
    }

    #[test]
    fn per_thread_divides() {
        let counter = RateCounter::from_rate("x", 100.0).per_thread(4);
        assert!((counter.per_second - 25.0).abs() < 1e-9);
    }
}
