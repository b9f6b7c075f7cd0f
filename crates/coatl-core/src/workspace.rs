//! Workspace controller
//!
//! [`WorkspaceController`] owns one [`NameRegistry`] per item kind, the
//! container window geometry, the active item and the save paths. Every
//! operation is synchronous and fully applied before it returns.

use crate::config::WorkspaceConfig;
use crate::engine::PersistenceEngine;
use crate::error::{Result, WorkspaceError};
use coatl_item::{BrowserItem, Geometry, GraphItem, Item, ItemKind, PlacementState};
use coatl_persist::{manifest_path_for, normalize_main_path};
use coatl_registry::{NameRegistry, RegistryError};
use std::path::{Path, PathBuf};

/// Main and manifest paths of a saved workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    pub main: PathBuf,
    pub manifest: PathBuf,
}

/// Result of [`WorkspaceController::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Both files written
    Saved(SavedPaths),
    /// The path chooser declined; nothing written
    Cancelled,
}

impl SaveOutcome {
    #[inline]
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Supplies a main-file path when a save has none yet
///
/// Implemented for `FnMut() -> Option<PathBuf>` closures.
pub trait PathChooser {
    /// Ask for a path; `None` cancels the save
    fn choose_save_path(&mut self) -> Option<PathBuf>;
}

impl<F> PathChooser for F
where
    F: FnMut() -> Option<PathBuf>,
{
    fn choose_save_path(&mut self) -> Option<PathBuf> {
        self()
    }
}

/// Top-level container of graphs and browsers
#[derive(Debug)]
pub struct WorkspaceController {
    config: WorkspaceConfig,
    window: Geometry,
    graphs: NameRegistry,
    browsers: NameRegistry,
    paths: Option<SavedPaths>,
    active: Option<(ItemKind, String)>,
}

impl WorkspaceController {
    /// Create an empty workspace using `config`'s window geometry
    #[must_use]
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            window: config.window,
            config,
            graphs: NameRegistry::new(ItemKind::Graph),
            browsers: NameRegistry::new(ItemKind::Browser),
            paths: None,
            active: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn window_geometry(&self) -> Geometry {
        self.window
    }

    pub fn set_window_geometry(&mut self, geometry: Geometry) {
        self.window = geometry;
    }

    /// Registry holding items of `kind`
    #[must_use]
    pub fn registry(&self, kind: ItemKind) -> &NameRegistry {
        match kind {
            ItemKind::Graph => &self.graphs,
            ItemKind::Browser => &self.browsers,
        }
    }

    /// Mutable registry holding items of `kind`
    ///
    /// Renames and removals made directly on the registry bypass active-item
    /// tracking; prefer [`rename_item`](Self::rename_item) and
    /// [`remove_item`](Self::remove_item).
    pub fn registry_mut(&mut self, kind: ItemKind) -> &mut NameRegistry {
        match kind {
            ItemKind::Graph => &mut self.graphs,
            ItemKind::Browser => &mut self.browsers,
        }
    }

    /// All graph items
    pub fn graphs(&self) -> impl Iterator<Item = &GraphItem> {
        self.graphs.list().filter_map(|e| e.item().as_graph())
    }

    /// All browser items
    pub fn browsers(&self) -> impl Iterator<Item = &BrowserItem> {
        self.browsers.list().filter_map(|e| e.item().as_browser())
    }

    /// Total items across both registries
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.graphs.len() + self.browsers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty() && self.browsers.is_empty()
    }

    /// Item of `kind` registered under `name`
    #[must_use]
    pub fn item(&self, kind: ItemKind, name: &str) -> Option<&Item> {
        self.registry(kind).item(name)
    }

    /// Placement a new item of `kind` gets when none is given
    #[must_use]
    pub fn default_placement(&self, kind: ItemKind) -> PlacementState {
        PlacementState::normal(self.config.cascade_geometry(self.registry(kind).len()))
    }

    /// Construct and register a default item of `kind`
    ///
    /// `name` defaults to the configured default item name.
    ///
    /// # Errors
    /// Returns `RegistryError::InvalidName` if the name is empty or reserved
    pub fn new_item(&mut self, kind: ItemKind, name: Option<&str>) -> Result<&Item> {
        let requested = name.unwrap_or(&self.config.default_item_name).to_string();
        let item = Item::new_default(kind, &requested);
        let resolved = self.add_item(kind, item, &requested, None)?;
        self.registry(kind)
            .item(&resolved)
            .ok_or_else(|| WorkspaceError::from(RegistryError::not_found(kind, &resolved)))
    }

    /// # Errors
    /// See [`new_item`](Self::new_item)
    pub fn new_graph(&mut self, name: Option<&str>) -> Result<&Item> {
        self.new_item(ItemKind::Graph, name)
    }

    /// # Errors
    /// See [`new_item`](Self::new_item)
    pub fn new_browser(&mut self, name: Option<&str>) -> Result<&Item> {
        self.new_item(ItemKind::Browser, name)
    }

    /// Register an externally constructed item in the `kind` registry
    ///
    /// Returns the resolved name.
    ///
    /// # Errors
    /// - `RegistryError::TypeMismatch` if `item` is not of `kind`
    /// - `RegistryError::InvalidName` if `name` is empty or reserved
    pub fn add_item(
        &mut self,
        kind: ItemKind,
        item: Item,
        name: &str,
        placement: Option<PlacementState>,
    ) -> Result<String> {
        let placement = placement.unwrap_or_else(|| self.default_placement(kind));
        Ok(self.registry_mut(kind).add(item, name, placement)?)
    }

    /// Remove and return the item under `name`
    ///
    /// Clears the active item if it was this one.
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn remove_item(&mut self, kind: ItemKind, name: &str) -> Result<Item> {
        let entry = self.registry_mut(kind).remove(name)?;
        if self.is_active(kind, name) {
            self.active = None;
        }
        let (_, item, _) = entry.into_parts();
        Ok(item)
    }

    /// Rename `old` to the closest free name to `new`; returns the resolved name
    ///
    /// # Errors
    /// - `RegistryError::NotFound` if `old` is absent
    /// - `RegistryError::InvalidName` if `new` is empty or reserved
    pub fn rename_item(&mut self, kind: ItemKind, old: &str, new: &str) -> Result<String> {
        let resolved = self.registry_mut(kind).rename(old, new)?;
        if self.is_active(kind, old) {
            self.active = Some((kind, resolved.clone()));
        }
        Ok(resolved)
    }

    /// Mutate an item's payload in place
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn update_item<R>(
        &mut self,
        kind: ItemKind,
        name: &str,
        f: impl FnOnce(&mut Item) -> R,
    ) -> Result<R> {
        Ok(self.registry_mut(kind).update(name, f)?)
    }

    /// Mark an item as the one receiving user focus
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn set_active(&mut self, kind: ItemKind, name: &str) -> Result<()> {
        if !self.registry(kind).contains(name) {
            return Err(RegistryError::not_found(kind, name).into());
        }
        tracing::debug!("Active item is now {} '{}'", kind, name);
        self.active = Some((kind, name.to_string()));
        Ok(())
    }

    /// Kind and name of the active item
    #[must_use]
    pub fn active(&self) -> Option<(ItemKind, &str)> {
        self.active
            .as_ref()
            .filter(|(kind, name)| self.registry(*kind).contains(name))
            .map(|(kind, name)| (*kind, name.as_str()))
    }

    #[must_use]
    pub fn active_item(&self) -> Option<&Item> {
        self.active().and_then(|(kind, name)| self.item(kind, name))
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    fn is_active(&self, kind: ItemKind, name: &str) -> bool {
        matches!(&self.active, Some((k, n)) if *k == kind && n == name)
    }

    /// Set the paths `save` writes to
    pub fn set_path(&mut self, main: impl Into<PathBuf>, manifest: impl Into<PathBuf>) {
        self.paths = Some(SavedPaths {
            main: main.into(),
            manifest: manifest.into(),
        });
    }

    #[must_use]
    pub fn save_path(&self) -> Option<&Path> {
        self.paths.as_ref().map(|p| p.main.as_path())
    }

    #[must_use]
    pub fn manifest_path(&self) -> Option<&Path> {
        self.paths.as_ref().map(|p| p.manifest.as_path())
    }

    /// Save to the current paths, asking `chooser` if there are none
    ///
    /// # Errors
    /// Returns `PersistError` (wrapped) if encoding or writing fails
    pub fn save(&mut self, chooser: &mut impl PathChooser) -> Result<SaveOutcome> {
        if let Some(paths) = self.paths.clone() {
            self.write_to(&paths)?;
            return Ok(SaveOutcome::Saved(paths));
        }

        match chooser.choose_save_path() {
            Some(main) => self.save_as(main).map(SaveOutcome::Saved),
            None => {
                tracing::debug!("Save cancelled, no path chosen");
                Ok(SaveOutcome::Cancelled)
            }
        }
    }

    /// Save under `main`, normalised to the `.cl` extension
    ///
    /// The manifest path is derived from the main path; both become the
    /// current paths.
    ///
    /// # Errors
    /// Returns `PersistError` (wrapped) if encoding or writing fails
    pub fn save_as(&mut self, main: impl AsRef<Path>) -> Result<SavedPaths> {
        let main = normalize_main_path(main.as_ref());
        let paths = SavedPaths {
            manifest: manifest_path_for(&main),
            main,
        };
        self.write_to(&paths)?;
        self.paths = Some(paths.clone());
        Ok(paths)
    }

    fn write_to(&self, paths: &SavedPaths) -> Result<()> {
        PersistenceEngine::from_config(self.config.clone()).write(self, &paths.main, &paths.manifest)
    }
}

impl Default for WorkspaceController {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}
