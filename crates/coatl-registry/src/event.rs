//! Registry change notifications
//!
//! Containers register a listener with [`NameRegistry::subscribe`](crate::NameRegistry::subscribe)
//! and are called synchronously after every completed mutation.

use coatl_item::{ItemKind, PlacementState};

/// A completed registry mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// Item registered and attached to its container
    Attached {
        kind: ItemKind,
        name: String,
        placement: PlacementState,
    },

    /// Item detached and its entry deleted
    Detached { kind: ItemKind, name: String },

    /// Entry moved to a new name
    Renamed {
        kind: ItemKind,
        from: String,
        to: String,
    },

    /// Display mode or geometry changed
    PlacementChanged {
        kind: ItemKind,
        name: String,
        placement: PlacementState,
    },
}

impl RegistryEvent {
    /// Name the event refers to (the new name for renames)
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Attached { name, .. }
            | Self::Detached { name, .. }
            | Self::PlacementChanged { name, .. } => name,
            Self::Renamed { to, .. } => to,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Attached { kind, .. }
            | Self::Detached { kind, .. }
            | Self::Renamed { kind, .. }
            | Self::PlacementChanged { kind, .. } => *kind,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Boxed listener callback
pub type Listener = Box<dyn FnMut(&RegistryEvent)>;
