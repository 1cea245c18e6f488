use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

static LATENCY_LINE: OnceLock<Regex> = OnceLock::new();

fn latency_line() -> &'static Regex {
    LATENCY_LINE.get_or_init(|| {
        Regex::new(r"Latency ([0-9]+\.[0-9]+)ms, ([0-9]+\.[0-9]+)ms, ([0-9]+\.[0-9]+)ms")
            .expect("latency pattern is a valid regex")
    })
}

/// One latency triple in milliseconds, as printed by the load generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencySample {
    pub value: f64,
    pub lower_value: f64,
    pub upper_value: f64,
}

impl LatencySample {
    /// Parse a line like `Latency 88.0ms, 87.42ms, 88.88ms`.
    ///
    /// Returns `None` for any line that does not carry all three numbers.
    pub fn parse_line(line: &str) -> Option<Self> {
        if !line.contains("Latency") {
            return None;
        }

        let Some(captures) = latency_line().captures(line) else {
            log::trace!("ignoring line without a latency triple: {line:?}");
            return None;
        };

        Some(LatencySample {
            value: captures[1].parse().ok()?,
            lower_value: captures[2].parse().ok()?,
            upper_value: captures[3].parse().ok()?,
        })
    }
}

/// Fold over the lines, keeping the sample of the last matching line.
pub fn last_latency<'a, I>(lines: I) -> Option<LatencySample>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().fold(None, |last, line| {
        match LatencySample::parse_line(line) {
            Some(sample) => {
                log::debug!("latency line: {line:?}");
                Some(sample)
            }
            None => last,
        }
    })
}
