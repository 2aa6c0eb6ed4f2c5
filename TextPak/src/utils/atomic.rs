//! Crash-safe file replacement

use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Write `bytes` to `path` so the destination is never seen half-written
///
/// Parent directories are created as needed. Data goes to a temporary file
/// next to the destination, which is then renamed over it. On any failure
/// the temporary file is removed and the destination is left as it was.
///
/// # Errors
/// Returns [`Error::Io`] if a directory, the temporary file, or the final
/// rename cannot be created.
///
/// [`Error::Io`]: crate::Error::Io
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Dropping the temp file on an early return deletes it
    let mut temp = tempfile::Builder::new()
        .prefix(&format!("{file_name}.tmp."))
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|err| {
        let tempfile::PersistError { error, file } = err;
        drop(file);
        error
    })?;

    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_creates_parents_and_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.bin");
        write_atomic(&path, b"payload").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
        assert_eq!(dir_entries(path.parent().unwrap()), ["out.bin"]);
    }

    #[test]
    fn test_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the destination makes the rename fail
        let path = dir.path().join("occupied");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), b"x").unwrap();

        assert!(write_atomic(&path, b"data").is_err());
        assert_eq!(dir_entries(dir.path()), ["occupied"]);
        assert_eq!(dir_entries(&path), ["keep.txt"]);
    }
}
