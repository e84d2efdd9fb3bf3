//! Atomic file replacement.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

/// Sibling temp path: `summary.json` -> `summary.json.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` so that readers see either the old file or the
/// complete new one.
///
/// The bytes go to a sibling temp file which is synced and then renamed
/// over the target. Parent directories are created as needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    let mut file = File::create(&temp_path).map_err(|source| ExportError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(bytes).map_err(|source| ExportError::Io {
        operation: "write",
        path: temp_path.clone(),
        source,
    })?;
    file.sync_all().map_err(|source| ExportError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;
    drop(file);

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(ExportError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source,
        });
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn rename_onto_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let err = write_atomic(&target, b"data").unwrap_err();
        assert!(matches!(err, ExportError::AtomicWriteFailed { .. }));
        assert!(!temp_path_for(&target).exists());
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let path = Path::new("/tmp/report/star_schema.xlsx");
        assert_eq!(
            temp_path_for(path),
            PathBuf::from("/tmp/report/star_schema.xlsx.tmp")
        );
    }
}
