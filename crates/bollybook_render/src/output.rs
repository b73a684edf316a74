//! Writing rendered files.

use bollybook_error::{RenderError, RenderErrorKind};
use std::io::Write;
use std::path::Path;

fn io_error(path: &Path, e: impl std::fmt::Display) -> RenderError {
    RenderError::new(RenderErrorKind::Io(format!("{}: {}", path.display(), e)))
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// The target only appears once every byte is written, so a failure never
/// leaves a truncated file at `path`. Missing parent directories are created.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
    file.write_all(bytes).map_err(|e| io_error(path, e))?;
    file.as_file().sync_all().map_err(|e| io_error(path, e))?;
    file.persist(path).map_err(|e| io_error(path, e.error))?;

    tracing::debug!(path = %path.display(), "Wrote file");
    Ok(())
}
