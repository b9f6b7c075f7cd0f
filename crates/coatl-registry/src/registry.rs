//! Name registry
//!
//! Provides [`NameRegistry`], an explicit map from unique name to
//! `(name, item, placement)` entry for one item kind.

use crate::error::RegistryError;
use crate::event::{Listener, ListenerId, RegistryEvent};
use crate::naming::{check_name, resolve_name};
use coatl_item::{Geometry, Item, ItemKind, PlacementState};
use indexmap::IndexMap;
use std::fmt;

/// One registered item
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: String,
    item: Item,
    placement: PlacementState,
}

impl Entry {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    #[inline]
    #[must_use]
    pub fn placement(&self) -> PlacementState {
        self.placement
    }

    /// Split into owned parts
    #[must_use]
    pub fn into_parts(self) -> (String, Item, PlacementState) {
        (self.name, self.item, self.placement)
    }
}

/// Namespace of items of a single kind
///
/// # Invariants
/// - no two entries share a name
/// - every entry's key equals its item's `name()`
/// - every entry holds an item of the registry's kind
/// - every entry has exactly one placement
///
/// Iteration order is unspecified; renames move an entry to the end.
pub struct NameRegistry {
    kind: ItemKind,
    entries: IndexMap<String, Entry>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for NameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameRegistry")
            .field("kind", &self.kind)
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl NameRegistry {
    /// Create empty registry accepting `kind`
    #[inline]
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Kind of item this registry accepts
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Name `add` would choose for `requested` right now
    #[must_use]
    pub fn resolve(&self, requested: &str) -> String {
        resolve_name(requested, |candidate| self.entries.contains_key(candidate))
    }

    /// Register `item` under the closest free name to `requested`
    ///
    /// The item's public name is set to the resolved name.
    ///
    /// # Errors
    /// - `RegistryError::TypeMismatch` if `item` is not of this registry's kind
    /// - `RegistryError::InvalidName` if `requested` is empty or reserved
    pub fn add(
        &mut self,
        mut item: Item,
        requested: &str,
        placement: PlacementState,
    ) -> Result<String, RegistryError> {
        self.check_kind(&item)?;
        check_name(requested)?;

        let resolved = self.resolve(requested);
        if resolved != requested {
            tracing::debug!("{} name '{}' taken, resolved to '{}'", self.kind, requested, resolved);
        }

        item.set_name(&resolved);
        self.attach(resolved.clone(), item, placement);
        Ok(resolved)
    }

    /// Register `item` under exactly `name`
    ///
    /// Used when restoring entries whose names were already unique.
    ///
    /// # Errors
    /// - `RegistryError::TypeMismatch` if `item` is not of this registry's kind
    /// - `RegistryError::InvalidName` if `name` is empty or reserved
    /// - `RegistryError::NameConflict` if `name` is already registered
    pub fn insert_exact(
        &mut self,
        mut item: Item,
        name: &str,
        placement: PlacementState,
    ) -> Result<(), RegistryError> {
        self.check_kind(&item)?;
        check_name(name)?;
        if self.entries.contains_key(name) {
            return Err(RegistryError::NameConflict {
                kind: self.kind,
                name: name.to_string(),
            });
        }

        item.set_name(name);
        self.attach(name.to_string(), item, placement);
        Ok(())
    }

    /// Detach and delete the entry under `name`
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn remove(&mut self, name: &str) -> Result<Entry, RegistryError> {
        let entry = self
            .entries
            .shift_remove(name)
            .ok_or_else(|| RegistryError::not_found(self.kind, name))?;

        tracing::info!("Removed {} '{}'", self.kind, name);
        self.emit(&RegistryEvent::Detached {
            kind: self.kind,
            name: name.to_string(),
        });
        Ok(entry)
    }

    /// Move the entry under `old` to the closest free name to `new`
    ///
    /// `new` is resolved against the full current entry set, `old` included,
    /// so renaming an entry to its own name yields a suffixed name.
    ///
    /// # Errors
    /// - `RegistryError::NotFound` if `old` is absent
    /// - `RegistryError::InvalidName` if `new` is empty or reserved
    pub fn rename(&mut self, old: &str, new: &str) -> Result<String, RegistryError> {
        if !self.entries.contains_key(old) {
            return Err(RegistryError::not_found(self.kind, old));
        }
        check_name(new)?;

        let resolved = self.resolve(new);
        let Some(mut entry) = self.entries.shift_remove(old) else {
            return Err(RegistryError::not_found(self.kind, old));
        };
        entry.name.clone_from(&resolved);
        entry.item.set_name(&resolved);
        self.entries.insert(resolved.clone(), entry);

        tracing::info!("Renamed {} '{}' to '{}'", self.kind, old, resolved);
        self.emit(&RegistryEvent::Renamed {
            kind: self.kind,
            from: old.to_string(),
            to: resolved.clone(),
        });
        Ok(resolved)
    }

    /// Entry under `name`
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Item under `name`
    #[inline]
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.entries.get(name).map(Entry::item)
    }

    /// Placement under `name`
    #[inline]
    #[must_use]
    pub fn placement(&self, name: &str) -> Option<PlacementState> {
        self.entries.get(name).map(Entry::placement)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All current names
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// All current entries
    ///
    /// Do not rely on the order.
    pub fn list(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Mutate the item under `name`
    ///
    /// The item's name is restored afterwards; use [`rename`](Self::rename)
    /// to change it.
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn update<R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Item) -> R,
    ) -> Result<R, RegistryError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| RegistryError::not_found(self.kind, name))?;
        let out = f(&mut entry.item);
        if entry.item.name() != entry.name {
            entry.item.set_name(&entry.name);
        }
        Ok(out)
    }

    /// Replace the placement under `name`
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn set_placement(
        &mut self,
        name: &str,
        placement: PlacementState,
    ) -> Result<(), RegistryError> {
        self.change_placement(name, |p| *p = placement)
    }

    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn maximize(&mut self, name: &str) -> Result<(), RegistryError> {
        self.change_placement(name, PlacementState::maximize)
    }

    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn minimize(&mut self, name: &str) -> Result<(), RegistryError> {
        self.change_placement(name, PlacementState::minimize)
    }

    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn show_normal(&mut self, name: &str) -> Result<(), RegistryError> {
        self.change_placement(name, PlacementState::show_normal)
    }

    /// Move/resize; switches the entry to Normal mode
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if `name` is absent
    pub fn set_geometry(&mut self, name: &str, geometry: Geometry) -> Result<(), RegistryError> {
        self.change_placement(name, |p| p.set_geometry(geometry))
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&RegistryEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    fn check_kind(&self, item: &Item) -> Result<(), RegistryError> {
        if item.kind() == self.kind {
            Ok(())
        } else {
            Err(RegistryError::TypeMismatch {
                expected: self.kind,
                actual: item.kind(),
            })
        }
    }

    fn attach(&mut self, name: String, item: Item, placement: PlacementState) {
        tracing::info!("Added {} '{}' at {}", self.kind, name, placement);
        self.entries.insert(
            name.clone(),
            Entry {
                name: name.clone(),
                item,
                placement,
            },
        );
        self.emit(&RegistryEvent::Attached {
            kind: self.kind,
            name,
            placement,
        });
    }

    fn change_placement(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut PlacementState),
    ) -> Result<(), RegistryError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| RegistryError::not_found(self.kind, name))?;
        let before = entry.placement;
        f(&mut entry.placement);
        let after = entry.placement;

        if before != after {
            self.emit(&RegistryEvent::PlacementChanged {
                kind: self.kind,
                name: name.to_string(),
                placement: after,
            });
        }
        Ok(())
    }

    fn emit(&mut self, event: &RegistryEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}
