//! Turns the text output of a load-testing run into a small JSON summary.
//!
//! The input is scanned line by line for `Latency <v>ms, <lo>ms, <hi>ms`; the
//! last such line ends up in `results.json` as
//! `{"my_benchmark": {"latency": {"value", "lower_value", "upper_value"}}}`.

use std::fs;
use std::path::Path;

pub mod error;
pub mod latency;
pub mod report;

pub use error::{Error, Result};
pub use latency::{last_latency, LatencySample};
pub use report::BenchmarkReport;

pub const DEFAULT_INPUT: &str = "wrk_output.txt";
pub const OUTPUT: &str = "results.json";

/// Read `input`, extract the latency and write the report to `output`.
///
/// Nothing is written when the input has no latency line.
pub fn summarize(input: &Path, output: &Path) -> Result<BenchmarkReport> {
    log::info!("reading benchmark output from {}", input.display());

    let content = fs::read_to_string(input)?;
    let latency = last_latency(content.lines());
    let report = BenchmarkReport::build(latency, input)?;

    report.write_to(output)?;
    log::info!("wrote {}", output.display());

    Ok(report)
}
