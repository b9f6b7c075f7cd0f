//! Persistence engine
//!
//! Converts a [`WorkspaceController`] to and from the `.cl`/`.cld` file
//! pair.
//!
//! # Flow
//!
//! ```text
//! save:  controller ─► WorkspaceRecord ─► StateBlob ─┬─► main.cl
//!                    └► DependencyManifest (+checksum) ─► main.cld
//!
//! load:  main.cl ─► StateBlob ─► WorkspaceRecord ─► restore ─► controller
//!        main.cld ─► DependencyManifest ─► validate ─► LoadWarning*
//! ```
//!
//! A failed manifest read never fails a load; it becomes a warning. A failed
//! state read fails that one file, and [`PersistenceEngine::open_many`] keeps
//! going with the rest.

use crate::config::WorkspaceConfig;
use crate::error::{Result, WorkspaceError};
use crate::workspace::WorkspaceController;
use coatl_item::{Dependencies, Item, ItemKind};
use coatl_persist::{
    manifest_path_for, read_manifest, read_state, validate, write_pair, DependencyManifest,
    DependencyMismatch, EntryRecord, Environment, ManifestBlob, PersistError, StateBlob,
    WorkspaceRecord,
};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Non-fatal problem found while loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum LoadWarning {
    /// Installed package version differs from the saved one
    DependencyMismatch(DependencyMismatch),
    /// State bytes do not hash to the manifest's checksum
    ChecksumMismatch { expected: String, actual: String },
    /// Manifest missing or unreadable
    ManifestUnavailable { reason: String },
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependencyMismatch(m) => write!(f, "dependency mismatch: {m}"),
            Self::ChecksumMismatch { expected, actual } => write!(
                f,
                "state checksum mismatch: manifest says {expected}, file hashes to {actual}"
            ),
            Self::ManifestUnavailable { reason } => {
                write!(f, "dependency information unavailable: {reason}")
            }
        }
    }
}

/// A successfully loaded workspace
#[derive(Debug)]
pub struct LoadedWorkspace {
    pub path: PathBuf,
    pub workspace: WorkspaceController,
    /// `None` when the manifest could not be read
    pub manifest: Option<DependencyManifest>,
    pub warnings: Vec<LoadWarning>,
}

impl LoadedWorkspace {
    #[inline]
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    #[must_use]
    pub fn into_workspace(self) -> WorkspaceController {
        self.workspace
    }
}

/// Manifest information reported for a file that failed to load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ManifestDiagnostic {
    /// Dependencies the sibling manifest declares
    Declared(Dependencies),
    /// The manifest could not be read either
    Unavailable(String),
}

/// One file of a batch open that failed
#[derive(Debug)]
pub struct OpenFailure {
    pub path: PathBuf,
    pub error: WorkspaceError,
    pub manifest: ManifestDiagnostic,
}

/// Outcome of opening several files
#[derive(Debug, Default)]
pub struct OpenReport {
    pub loaded: Vec<LoadedWorkspace>,
    pub failures: Vec<OpenFailure>,
}

impl OpenReport {
    /// Every file loaded
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of files attempted
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.loaded.len() + self.failures.len()
    }
}

/// Snapshot/restore and file-pair I/O
#[derive(Debug, Clone)]
pub struct PersistenceEngine {
    environment: Environment,
    config: WorkspaceConfig,
    atomic_writes: bool,
}

impl PersistenceEngine {
    /// Engine validating against `environment`, with default config
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            config: WorkspaceConfig::default(),
            atomic_writes: true,
        }
    }

    /// Engine for `config` against the installed environment
    #[must_use]
    pub fn from_config(config: WorkspaceConfig) -> Self {
        Self::new(Environment::installed()).with_config(config)
    }

    /// Config used for restored controllers; also sets the write mode
    #[must_use]
    pub fn with_config(mut self, config: WorkspaceConfig) -> Self {
        self.atomic_writes = config.atomic_writes;
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    #[inline]
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Capture every entry and the window geometry
    ///
    /// Placements hold the last Normal geometry whatever the current mode,
    /// so a later restore-to-Normal has somewhere to go.
    ///
    /// # Errors
    /// Returns `PersistError::Item` if a payload fails to serialize
    pub fn capture(&self, workspace: &WorkspaceController) -> Result<WorkspaceRecord> {
        let mut record = WorkspaceRecord::new(workspace.window_geometry());
        for kind in ItemKind::ALL {
            let entries = record.entries_mut(kind);
            for entry in workspace.registry(kind).list() {
                entries.push(EntryRecord {
                    item: entry.item().to_record().map_err(PersistError::from)?,
                    placement: entry.placement(),
                });
            }
        }
        Ok(record)
    }

    /// Merge every item's declared dependencies, graphing library last
    #[must_use]
    pub fn build_manifest(&self, workspace: &WorkspaceController) -> DependencyManifest {
        let mut manifest = DependencyManifest::new();
        for kind in ItemKind::ALL {
            for entry in workspace.registry(kind).list() {
                manifest.merge(&entry.item().dependencies());
            }
        }
        manifest.record_graph_library();
        manifest
    }

    /// Serialize `workspace` into the state and manifest streams
    ///
    /// # Errors
    /// Returns `PersistError` (wrapped) if anything fails to encode
    pub fn snapshot(&self, workspace: &WorkspaceController) -> Result<(StateBlob, ManifestBlob)> {
        let state = StateBlob::encode(&self.capture(workspace)?)?;
        let manifest = self
            .build_manifest(workspace)
            .with_state_checksum(state.checksum());
        let manifest = ManifestBlob::encode(&manifest)?;
        Ok((state, manifest))
    }

    /// Rebuild a controller from a state stream
    ///
    /// # Errors
    /// - `PersistError::Decode`/`UnsupportedFormat` (wrapped) if the stream does not decode
    /// - `RegistryError::NameConflict` if two entries share a name
    /// - `RegistryError::TypeMismatch` if an entry sits in the wrong registry
    pub fn restore(&self, state: &StateBlob) -> Result<WorkspaceController> {
        self.restore_record(state.decode()?)
    }

    /// Rebuild a controller from an already decoded record
    ///
    /// Entries are registered under their saved names exactly; no collision
    /// resolution happens here.
    ///
    /// # Errors
    /// See [`restore`](Self::restore)
    pub fn restore_record(&self, record: WorkspaceRecord) -> Result<WorkspaceController> {
        let mut workspace = WorkspaceController::new(self.config.clone());
        workspace.set_window_geometry(record.window);

        for kind in ItemKind::ALL {
            for entry in record.entries(kind) {
                let item = Item::from_record(&entry.item).map_err(PersistError::from)?;
                workspace
                    .registry_mut(kind)
                    .insert_exact(item, entry.name(), entry.placement)?;
            }
        }

        tracing::info!(
            "Restored workspace: {} graphs, {} browsers",
            workspace.registry(ItemKind::Graph).len(),
            workspace.registry(ItemKind::Browser).len()
        );
        Ok(workspace)
    }

    /// Snapshot `workspace` and write both files
    ///
    /// # Errors
    /// Returns `PersistError` (wrapped) on encode or I/O failure
    pub fn write(&self, workspace: &WorkspaceController, main: &Path, manifest: &Path) -> Result<()> {
        let (state, manifest_blob) = self.snapshot(workspace)?;
        write_pair(main, manifest, &state, &manifest_blob, self.atomic_writes)?;
        tracing::info!(
            "Saved {} items to {} (manifest {})",
            workspace.item_count(),
            main.display(),
            manifest.display()
        );
        Ok(())
    }

    /// Load `main` and check it against its sibling manifest
    ///
    /// The restored controller's paths are set to the pair just read.
    ///
    /// # Errors
    /// - `WorkspaceError::Deserialization` if the state file or an item payload cannot be read or decoded
    /// - registry errors if the decoded entries cannot be registered
    pub fn load(&self, main: impl AsRef<Path>) -> Result<LoadedWorkspace> {
        let main = main.as_ref();
        let manifest_path = manifest_path_for(main);

        let state = read_state(main).map_err(|e| WorkspaceError::deserialization(main, e))?;
        let record = state
            .decode()
            .map_err(|e| WorkspaceError::deserialization(main, e))?;
        // payload decode failures belong to this file; naming errors stay as-is
        let mut workspace = self.restore_record(record).map_err(|e| match e {
            WorkspaceError::Persist(source) => WorkspaceError::deserialization(main, source),
            other => other,
        })?;
        workspace.set_path(main, &manifest_path);

        let mut warnings = Vec::new();
        let manifest = match read_manifest(&manifest_path) {
            Ok(manifest) => {
                let actual = state.checksum();
                if let Some(expected) = manifest.state_checksum.as_ref() {
                    if *expected != actual {
                        warnings.push(LoadWarning::ChecksumMismatch {
                            expected: expected.clone(),
                            actual,
                        });
                    }
                }
                warnings.extend(
                    validate(&self.environment, &manifest)
                        .into_iter()
                        .map(LoadWarning::DependencyMismatch),
                );
                Some(manifest)
            }
            Err(e) => {
                warnings.push(LoadWarning::ManifestUnavailable {
                    reason: e.to_string(),
                });
                None
            }
        };

        for warning in &warnings {
            tracing::warn!("{}: {}", main.display(), warning);
        }
        tracing::info!(
            "Loaded {} ({} items, {} warnings)",
            main.display(),
            workspace.item_count(),
            warnings.len()
        );

        Ok(LoadedWorkspace {
            path: main.to_path_buf(),
            workspace,
            manifest,
            warnings,
        })
    }

    /// Best-effort read of the manifest next to `main`
    #[must_use]
    pub fn manifest_diagnostic(&self, main: &Path) -> ManifestDiagnostic {
        match read_manifest(&manifest_path_for(main)) {
            Ok(manifest) => ManifestDiagnostic::Declared(manifest.dependencies),
            Err(e) => ManifestDiagnostic::Unavailable(e.to_string()),
        }
    }

    /// Load every path, collecting one failure per file that does not load
    pub fn open_many<I, P>(&self, paths: I) -> OpenReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = OpenReport::default();
        for path in paths {
            let path = path.as_ref();
            match self.load(path) {
                Ok(loaded) => report.loaded.push(loaded),
                Err(error) => {
                    tracing::warn!("Failed to open {}: {}", path.display(), error);
                    report.failures.push(OpenFailure {
                        path: path.to_path_buf(),
                        manifest: self.manifest_diagnostic(path),
                        error,
                    });
                }
            }
        }
        report
    }
}

impl Default for PersistenceEngine {
    fn default() -> Self {
        Self::from_config(WorkspaceConfig::default())
    }
}
