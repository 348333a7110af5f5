//! Reading and writing potential documents from paths and streams.
//!
//! Path-based calls own their file handle for the duration of the call and
//! choose the encoding from the file extension. Stream-based calls take the
//! encoding explicitly and leave the stream open.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use gary_core::errors::{ErrorInfo, GaryError};
use tracing::debug;

use crate::document::{parse_document, DocumentFormat, FromDocument, ToDocument};

fn io_error(code: &str, err: impl ToString) -> GaryError {
    GaryError::Io(ErrorInfo::new(code, err.to_string()))
}

fn with_path(err: GaryError, path: &Path) -> GaryError {
    let path = path.display().to_string();
    match err {
        GaryError::Format(info) => GaryError::Format(info.with_context("path", path)),
        GaryError::Validation(info) => GaryError::Validation(info.with_context("path", path)),
        GaryError::Io(info) => GaryError::Io(info.with_context("path", path)),
    }
}

/// Renders a potential into a document string.
pub fn to_string<P: ToDocument + ?Sized>(
    potential: &P,
    format: DocumentFormat,
) -> Result<String, GaryError> {
    potential.to_document()?.render(format)
}

/// Parses a potential from a document string.
pub fn from_str<T: FromDocument>(text: &str, format: DocumentFormat) -> Result<T, GaryError> {
    T::from_potential(parse_document(text.as_bytes(), format)?)
}

/// Reads a potential from an open reader. The reader is consumed to its end.
pub fn read_from<T: FromDocument, R: Read>(
    mut reader: R,
    format: DocumentFormat,
) -> Result<T, GaryError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|err| io_error("read", err))?;
    debug!(bytes = bytes.len(), format = format.name(), "parsing potential document");
    T::from_potential(parse_document(&bytes, format)?)
}

/// Reads a potential from a file, choosing the encoding from its extension.
pub fn read<T: FromDocument, Q: AsRef<Path>>(path: Q) -> Result<T, GaryError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path);
    debug!(path = %path.display(), format = format.name(), "reading potential");
    let file = File::open(path).map_err(|err| with_path(io_error("open", err), path))?;
    read_from(file, format).map_err(|err| with_path(err, path))
}

/// Writes a potential to an open writer and flushes it. The writer stays open.
pub fn write_to<P: ToDocument + ?Sized, W: Write + ?Sized>(
    potential: &P,
    writer: &mut W,
    format: DocumentFormat,
) -> Result<(), GaryError> {
    let text = to_string(potential, format)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|err| io_error("write", err))?;
    writer.flush().map_err(|err| io_error("flush", err))?;
    debug!(bytes = text.len(), format = format.name(), "wrote potential document");
    Ok(())
}

/// Writes a potential to a file, choosing the encoding from its extension.
///
/// The document is rendered before the file is created, so a rendering failure
/// leaves an existing file untouched. The handle is closed on every exit path.
pub fn write<P: ToDocument + ?Sized, Q: AsRef<Path>>(
    potential: &P,
    path: Q,
) -> Result<(), GaryError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path);
    let text = to_string(potential, format).map_err(|err| with_path(err, path))?;
    debug!(path = %path.display(), format = format.name(), "writing potential");
    let file = File::create(path).map_err(|err| with_path(io_error("create", err), path))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .map_err(|err| with_path(io_error("write", err), path))?;
    let file = writer
        .into_inner()
        .map_err(|err| with_path(io_error("flush", err.error()), path))?;
    file.sync_all()
        .map_err(|err| with_path(io_error("sync", err), path))?;
    Ok(())
}
