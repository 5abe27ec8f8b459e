//! Reading and writing documents on disk.
//!
//! The codec itself never touches the filesystem; these helpers own the file
//! handles around it. Writes go through a temporary file in the target's
//! directory that is only persisted once everything has been written, so a
//! failed write leaves the previous file intact.

use crate::api::{parse_with_options, serialize};
use crate::ast::{Document, Node};
use crate::config::{ParseOptions, SerializeOptions};
use crate::error::CodecError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads and parses the document at `path`.
///
/// # Errors
/// Returns `CodecError::Io` if the file cannot be read and
/// `CodecError::Parse` if its contents do not parse.
pub fn read_document(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Document, CodecError> {
    let path = path.as_ref();
    let buffer = std::fs::read(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", buffer.len(), path.display());

    Ok(parse_with_options(&buffer, &path.to_string_lossy(), options)?)
}

/// Serializes `node` and atomically replaces the file at `path` with it.
///
/// # Errors
/// Returns `CodecError::Serialize` (before the filesystem is touched) if the
/// tree cannot be written, and `CodecError::Io` if the file cannot be created,
/// written or moved into place.
pub fn write_document(
    path: impl AsRef<Path>,
    node: &Node,
    options: &SerializeOptions,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let bytes = serialize(node, options)?;

    let io_error = |source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory).map_err(io_error)?;
    file.write_all(&bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
