//! coatl Core - workspace controller and persistence
//!
//! The top-level container of a coatl session:
//! - Owns one name registry per item kind (graphs, browsers)
//! - Creates, adds, removes and renames items with collision-free names
//! - Tracks the active item and the container window geometry
//! - Saves to and loads from the `.cl` state / `.cld` manifest file pair
//! - Opens batches of files, collecting one failure per bad file
//!
//! # Example
//!
//! ```rust,no_run
//! use coatl_core::prelude::*;
//!
//! # fn example() -> Result<(), WorkspaceError> {
//! let mut workspace = WorkspaceController::new(WorkspaceConfig::new());
//! workspace.new_graph(None)?;
//! workspace.new_graph(None)?; // "Unnamed0"
//! workspace.save_as("session")?; // writes session.cl and session.cld
//!
//! let loaded = PersistenceEngine::default().load("session.cl")?;
//! assert_eq!(loaded.workspace.graphs().count(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod workspace;

// Re-exports for convenience
pub use config::{WorkspaceConfig, CASCADE_STEPS, DEFAULT_ITEM_NAME};
pub use engine::{
    LoadWarning, LoadedWorkspace, ManifestDiagnostic, OpenFailure, OpenReport, PersistenceEngine,
};
pub use error::{Result, WorkspaceError};
pub use workspace::{PathChooser, SaveOutcome, SavedPaths, WorkspaceController};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with coatl workspaces
    pub use crate::{
        LoadWarning, LoadedWorkspace, ManifestDiagnostic, OpenFailure, OpenReport, PathChooser,
        PersistenceEngine, SaveOutcome, SavedPaths, WorkspaceConfig, WorkspaceController,
        WorkspaceError,
    };
    pub use coatl_item::{
        BrowserItem, DisplayMode, Geometry, GraphItem, Item, ItemKind, PlacementState, Series,
    };
    pub use coatl_persist::constants::{MAIN_EXTENSION, MANIFEST_EXTENSION};
    pub use coatl_persist::{
        manifest_path_for, read_manifest, validate, DependencyManifest, DependencyMismatch,
        Environment,
    };
    pub use coatl_registry::{NameRegistry, RegistryError, RegistryEvent};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
