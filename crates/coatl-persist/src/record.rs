//! Snapshot records
//!
//! The serialized shape of a workspace: container geometry plus one
//! [`EntryRecord`] per registered item, split by registry.

use crate::constants::STATE_FORMAT_VERSION;
use coatl_item::{Geometry, ItemKind, ItemRecord, PlacementState};
use serde::{Deserialize, Serialize};

/// One captured registry entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub item: ItemRecord,
    pub placement: PlacementState,
}

impl EntryRecord {
    /// Registered name (the item's identity)
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.item.name
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.item.kind
    }
}

/// Everything needed to rebuild a workspace controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub format: u32,
    pub window: Geometry,
    pub graphs: Vec<EntryRecord>,
    pub browsers: Vec<EntryRecord>,
}

impl WorkspaceRecord {
    /// Empty record at the current format version
    #[must_use]
    pub fn new(window: Geometry) -> Self {
        Self {
            format: STATE_FORMAT_VERSION,
            window,
            graphs: Vec::new(),
            browsers: Vec::new(),
        }
    }

    /// Entries captured for `kind`
    #[must_use]
    pub fn entries(&self, kind: ItemKind) -> &[EntryRecord] {
        match kind {
            ItemKind::Graph => &self.graphs,
            ItemKind::Browser => &self.browsers,
        }
    }

    /// Mutable entries for `kind`
    pub fn entries_mut(&mut self, kind: ItemKind) -> &mut Vec<EntryRecord> {
        match kind {
            ItemKind::Graph => &mut self.graphs,
            ItemKind::Browser => &mut self.browsers,
        }
    }

    /// Total number of captured entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.graphs.len() + self.browsers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty() && self.browsers.is_empty()
    }
}
