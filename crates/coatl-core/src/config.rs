//! Workspace configuration
//!
//! [`WorkspaceConfig`] carries the tunables for new workspaces. It can be
//! built in code or loaded from TOML; missing keys fall back to defaults.
//!
//! ```toml
//! default_item_name = "Unnamed"
//! cascade_offset = 24
//! atomic_writes = true
//!
//! [window]
//! x = 0
//! y = 0
//! width = 1280
//! height = 800
//! ```

use crate::error::{Result, WorkspaceError};
use coatl_item::Geometry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name given to items created without one
pub const DEFAULT_ITEM_NAME: &str = "Unnamed";

/// Cascade wraps back to the origin after this many steps
pub const CASCADE_STEPS: usize = 10;

/// Workspace configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Name for items created without one
    pub default_item_name: String,
    /// Initial container window geometry
    pub window: Geometry,
    /// Normal geometry of the first new item
    pub default_item_geometry: Geometry,
    /// Diagonal shift between successive new items
    pub cascade_offset: i32,
    /// Write files via temporary sibling + rename
    pub atomic_writes: bool,
}

impl WorkspaceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_window(mut self, window: Geometry) -> Self {
        self.window = window;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_default_item_name(mut self, name: impl Into<String>) -> Self {
        self.default_item_name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_default_item_geometry(mut self, geometry: Geometry) -> Self {
        self.default_item_geometry = geometry;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_cascade_offset(mut self, offset: i32) -> Self {
        self.cascade_offset = offset;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns `WorkspaceError::Config` if the text is not valid TOML for
    /// this structure, or if the default item name is empty
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| WorkspaceError::Config(e.to_string()))?;
        if config.default_item_name.is_empty() {
            return Err(WorkspaceError::Config(
                "default_item_name cannot be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns `WorkspaceError::Config` if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| WorkspaceError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Normal geometry for the `index`-th item created in a registry
    #[must_use]
    pub fn cascade_geometry(&self, index: usize) -> Geometry {
        let step = i32::try_from(index % CASCADE_STEPS).unwrap_or(0);
        let shift = self.cascade_offset.saturating_mul(step);
        self.default_item_geometry.offset(shift, shift)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_item_name: DEFAULT_ITEM_NAME.to_string(),
            window: Geometry::new(0, 0, 1280, 800),
            default_item_geometry: Geometry::new(0, 0, 480, 360),
            cascade_offset: 24,
            atomic_writes: true,
        }
    }
}
