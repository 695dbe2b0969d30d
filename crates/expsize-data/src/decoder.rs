//! XZ decoding of the raw dump.
//!
//! The decoder verifies block checks while streaming, so corruption anywhere
//! in the file surfaces as a read error at the point it is reached.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use expsize_core::error::{ExpsizeError, Result};
use tracing::debug;
use xz2::read::XzDecoder;

/// Buffered, decompressed view of a dump file.
pub type SourceReader = BufReader<XzDecoder<File>>;

/// Open `path` and wrap it in a streaming XZ decoder.
///
/// Concatenated XZ streams are decoded back to back. The file handle is owned
/// by the returned reader and closed when it is dropped.
pub fn open_source(path: &Path) -> Result<SourceReader> {
    let file = File::open(path).map_err(|source| ExpsizeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Opened source {}", path.display());
    Ok(decode(file))
}

/// Wrap any raw byte source in a buffered XZ decoder.
pub fn decode<R: Read>(raw: R) -> BufReader<XzDecoder<R>> {
    BufReader::new(XzDecoder::new_multi_decoder(raw))
}

/// Map a read error from the decoded stream to the error taxonomy.
///
/// Integrity and truncation failures become [`ExpsizeError::CorruptInput`];
/// anything else is passed through as plain I/O.
pub fn classify_read_error(err: std::io::Error, line: u64) -> ExpsizeError {
    let from_decoder = err
        .get_ref()
        .is_some_and(|inner| inner.is::<xz2::stream::Error>());
    let integrity_kind = matches!(
        err.kind(),
        ErrorKind::InvalidData | ErrorKind::UnexpectedEof | ErrorKind::InvalidInput
    );
    if from_decoder || integrity_kind {
        ExpsizeError::CorruptInput { line, source: err }
    } else {
        ExpsizeError::Io(err)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
