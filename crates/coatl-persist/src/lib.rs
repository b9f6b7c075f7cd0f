//! coatl Persistence Format
//!
//! The on-disk shape of a saved workspace: two sibling files.
//!
//! # Core Operations
//!
//! - **State**: [`WorkspaceRecord`] <-> [`StateBlob`] (`*.cl`)
//! - **Manifest**: [`DependencyManifest`] <-> [`ManifestBlob`] (`*.cld`)
//! - **Validation**: [`validate`] compares a manifest with the [`Environment`]
//!
//! # Architecture
//!
//! ```text
//! WorkspaceRecord -> StateBlob ----> session.cl
//!                        | checksum
//! DependencyManifest -> ManifestBlob -> session.cld
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod blob;
pub mod constants;
pub mod error;
pub mod files;
pub mod manifest;
pub mod paths;
pub mod record;

// Re-exports for convenience
pub use blob::{ManifestBlob, StateBlob};
pub use error::{PersistError, Result};
pub use files::{read_manifest, read_state, write_file, write_pair};
pub use manifest::{validate, DependencyManifest, DependencyMismatch, Environment};
pub use paths::{has_main_extension, manifest_path_for, normalize_main_path};
pub use record::{EntryRecord, WorkspaceRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use coatl_item::{BrowserItem, Geometry, ItemPayload, PlacementState};
    use tempfile::TempDir;

    #[test]
    fn save_pair_then_read_back() {
        let dir = TempDir::new().unwrap();
        let main = normalize_main_path(&dir.path().join("session"));
        let man = manifest_path_for(&main);

        let browser = BrowserItem::new("runs").with_requirement("libA", "1.0");
        let mut record = WorkspaceRecord::new(Geometry::new(0, 0, 1024, 768));
        record.browsers.push(EntryRecord {
            item: browser.to_record().unwrap(),
            placement: PlacementState::normal(Geometry::new(10, 20, 300, 400)),
        });

        let state = StateBlob::encode(&record).unwrap();
        let mut manifest = DependencyManifest::new().with_state_checksum(state.checksum());
        manifest.merge(&browser.dependencies());
        manifest.record_graph_library();
        write_pair(&main, &man, &state, &ManifestBlob::encode(&manifest).unwrap(), true).unwrap();

        assert!(man.ends_with("session.cld"));
        assert_eq!(read_state(&main).unwrap().decode().unwrap(), record);

        let read = read_manifest(&man).unwrap();
        let mismatches = validate(&Environment::installed(), &read);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].dependency, "libA");
    }
}
