//! File system utilities.
//!
//! Output files are written through a temporary file in the destination
//! directory and renamed into place, so readers never observe a truncated
//! file and a failed write leaves any previous file untouched.

use crate::error::{ErrorExt, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Directory that will hold `path`. A bare file name resolves to `.`.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Writes `bytes` to `path` all-or-nothing, replacing any existing file.
///
/// The parent directory must already exist; it is not created.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = parent_dir(path);

    // Dropping `tmp` on any error path deletes the temporary file.
    let mut tmp = NamedTempFile::new_in(dir).write_context("creating temporary file in", dir)?;
    tmp.write_all(bytes)
        .write_context("writing temporary file for", path)?;
    tmp.as_file()
        .sync_all()
        .write_context("flushing temporary file for", path)?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .write_context("persisting", path)?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("icon.ico")), Path::new("."));
        assert_eq!(parent_dir(Path::new("public/icon.ico")), Path::new("public"));
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old contents").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_persist_failure_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("inner"), b"old").unwrap();

        let err = write_atomic(&path, b"new").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(std::fs::read(path.join("inner")).unwrap(), b"old");
        // No temporary file left next to the target
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bin");

        let err = write_atomic(&path, b"data").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(matches!(err, Error::Write { .. }));
        assert!(!path.exists());
    }
}
