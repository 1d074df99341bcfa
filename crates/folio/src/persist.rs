//! File persistence helpers.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Replace the file at `path` with `contents` atomically.
///
/// The data goes to a temporary file in the same directory, which is synced
/// and then renamed over the target, so readers never observe a partially
/// written file.
pub(crate) fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;

    let mut file = NamedTempFile::new_in(parent).map_err(|err| Error::io(path, err))?;
    file.write_all(contents).map_err(|err| Error::io(path, err))?;
    file.as_file().sync_all().map_err(|err| Error::io(path, err))?;
    file.persist(path).map_err(|err| Error::io(path, err.error))?;
    Ok(())
}

/// Read a whole file as UTF-8.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| Error::io(path, err))
}
