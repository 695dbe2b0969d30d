use std::io::Write;

use expsize_core::error::Result;

use crate::report::Report;

/// Write the line-oriented report: one `key max:<v> mean:<v> min:<v>` line
/// per key, then the two summary lines.
pub fn render_text<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    for entry in &report.entries {
        writeln!(
            writer,
            "{} max:{} mean:{} min:{}",
            entry.key, entry.max, entry.mean, entry.min
        )?;
    }
    writeln!(writer, "Total number of files: {}", report.summary.total_files)?;
    writeln!(
        writer,
        "Total size of all files: {} bytes",
        report.summary.total_size_bytes
    )?;
    Ok(())
}
