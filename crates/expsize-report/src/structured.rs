//! Structured (YAML / JSON) report rendering.
//!
//! The document shape is fixed:
//!
//! ```yaml
//! files:
//!   <key>:
//!     min: <int>
//!     max: <int>
//! summary:
//!   total_files: <int>
//!   total_size_bytes: <int>
//! ```

use std::io::Write;

use expsize_core::error::{ExpsizeError, Result};
use expsize_core::models::StructuredFormat;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::report::{Report, ReportEntry, Summary};

// ── Document model ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct StructuredReport<'a> {
    files: FileMap<'a>,
    summary: &'a Summary,
}

#[derive(Serialize)]
struct FileBounds {
    min: u64,
    max: u64,
}

/// Serializes entries as a mapping in their existing (sorted) order.
struct FileMap<'a>(&'a [ReportEntry]);

impl Serialize for FileMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(
                &entry.key,
                &FileBounds {
                    min: entry.min,
                    max: entry.max,
                },
            )?;
        }
        map.end()
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Encode `report` as a structured document with the chosen encoder.
pub fn render_structured<W: Write>(
    report: &Report,
    format: StructuredFormat,
    writer: &mut W,
) -> Result<()> {
    let document = StructuredReport {
        files: FileMap(&report.entries),
        summary: &report.summary,
    };

    match format {
        StructuredFormat::Yaml => serde_yaml::to_writer(&mut *writer, &document)
            .map_err(|e| ExpsizeError::Encode(e.to_string()))?,
        StructuredFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &document)
                .map_err(|e| ExpsizeError::Encode(e.to_string()))?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
