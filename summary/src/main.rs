use std::path::{Path, PathBuf};
use std::process::ExitCode;

use summary::{summarize, DEFAULT_INPUT, OUTPUT};

fn main() -> ExitCode {
    log::init();

    // an optional single argument overrides the input file
    let input = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

    match summarize(&input, Path::new(OUTPUT)) {
        Ok(report) => {
            let latency = report.benchmark.latency;
            log::info!(
                "latency {}ms ({}ms..{}ms)",
                latency.value,
                latency.lower_value,
                latency.upper_value
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
