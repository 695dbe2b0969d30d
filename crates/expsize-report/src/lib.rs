//! Report layer for expsize.
//!
//! Turns a finished aggregation into a sorted [`report::Report`] and renders
//! it either as plain text or as a structured document.

pub mod report;
pub mod structured;
pub mod text;

use std::io::Write;

use expsize_core::error::Result;
use expsize_core::models::OutputMode;

pub use report::{Report, ReportEntry, Summary};

/// Render `report` in the requested mode.
pub fn render<W: Write>(report: &Report, mode: OutputMode, writer: &mut W) -> Result<()> {
    match mode {
        OutputMode::Text => text::render_text(report, writer),
        OutputMode::Structured(format) => structured::render_structured(report, format, writer),
    }
}
