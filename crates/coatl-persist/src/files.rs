//! File I/O for the main/manifest pair
//!
//! Writes are sequential: the state file first, then the manifest. With
//! atomic writes enabled each file is written to a temporary sibling and
//! renamed into place, so a crash never leaves a half-written file behind
//! (though it may still leave a new state file next to an old manifest).

use crate::blob::{ManifestBlob, StateBlob};
use crate::error::{PersistError, Result};
use crate::manifest::DependencyManifest;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `bytes` to `path`
///
/// # Errors
/// Returns `PersistError::Io` tagged with `path` on any filesystem failure
pub fn write_file(path: &Path, bytes: &[u8], atomic: bool) -> Result<()> {
    if !atomic {
        return fs::write(path, bytes).map_err(|e| PersistError::io_error(path, e));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PersistError::io_error(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| PersistError::io_error(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| PersistError::io_error(path, e.error))?;
    Ok(())
}

/// Write the state file and then its manifest
///
/// # Errors
/// Returns the first write failure; the manifest is not written if the
/// state write fails
pub fn write_pair(
    main: &Path,
    manifest: &Path,
    state: &StateBlob,
    manifest_blob: &ManifestBlob,
    atomic: bool,
) -> Result<()> {
    write_file(main, state.as_bytes(), atomic)?;
    write_file(manifest, manifest_blob.as_bytes(), atomic)?;
    tracing::debug!(
        "Wrote {} ({} bytes) and {} ({} bytes)",
        main.display(),
        state.as_bytes().len(),
        manifest.display(),
        manifest_blob.as_bytes().len()
    );
    Ok(())
}

/// Read the raw state stream
///
/// # Errors
/// Returns `PersistError::Io` if the file cannot be read
pub fn read_state(path: &Path) -> Result<StateBlob> {
    fs::read(path)
        .map(StateBlob::from)
        .map_err(|e| PersistError::io_error(path, e))
}

/// Read and decode a manifest file
///
/// # Errors
/// - `PersistError::Io` if the file cannot be read
/// - `PersistError::Decode`/`UnsupportedFormat` if it does not decode
pub fn read_manifest(path: &Path) -> Result<DependencyManifest> {
    let bytes = fs::read(path).map_err(|e| PersistError::io_error(path, e))?;
    ManifestBlob::from(bytes).decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::WorkspaceRecord;
    use coatl_item::Geometry;
    use tempfile::TempDir;

    fn blobs() -> (StateBlob, ManifestBlob) {
        let state = StateBlob::encode(&WorkspaceRecord::new(Geometry::sized(800, 600))).unwrap();
        let manifest = DependencyManifest::new().with_state_checksum(state.checksum());
        (state, ManifestBlob::encode(&manifest).unwrap())
    }

    #[test]
    fn pair_round_trip_atomic() {
        let dir = TempDir::new().unwrap();
        let main = dir.path().join("w.cl");
        let man = dir.path().join("w.cld");
        let (state, manifest) = blobs();

        write_pair(&main, &man, &state, &manifest, true).unwrap();

        assert_eq!(read_state(&main).unwrap(), state);
        let back = read_manifest(&man).unwrap();
        assert_eq!(back.state_checksum.as_deref(), Some(state.checksum().as_str()));
    }

    #[test]
    fn plain_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.cl");
        write_file(&path, b"one", false).unwrap();
        write_file(&path, b"two", false).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"two");
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.cl");
        write_file(&path, b"data", true).unwrap();
        write_file(&path, b"more", true).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
        assert_eq!(fs::read(&path).unwrap(), b"more");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.cl");
        let err = read_state(&path).unwrap_err();
        assert!(err.is_missing());
        assert!(err.to_string().contains("absent.cl"));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/w.cl");
        assert!(matches!(
            write_file(&path, b"x", true),
            Err(PersistError::Io { .. })
        ));
    }
}
