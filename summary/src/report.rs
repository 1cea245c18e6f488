use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::latency::LatencySample;

const INDENT: &[u8] = b"    ";

/// `{"my_benchmark": {"latency": {...}}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    #[serde(rename = "my_benchmark")]
    pub benchmark: BenchmarkMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkMetrics {
    pub latency: LatencySample,
}

impl BenchmarkReport {
    /// Build the report from the folded latency, failing when the input had none.
    ///
    /// `source` only names the input in the error.
    pub fn build(latency: Option<LatencySample>, source: &Path) -> Result<Self> {
        let latency = latency.ok_or_else(|| Error::MissingLatency {
            path: PathBuf::from(source),
        })?;

        Ok(BenchmarkReport {
            benchmark: BenchmarkMetrics { latency },
        })
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;

        Ok(())
    }

    /// Create or truncate `path` and write the report to it.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;

        Ok(())
    }
}
