//! Registry error types

use coatl_item::ItemKind;

/// Errors raised by [`NameRegistry`](crate::NameRegistry) operations
///
/// All of these are reported to the immediate caller; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Name is empty or uses the reserved prefix
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// No entry under this name
    #[error("{kind} '{name}' not found")]
    NotFound { kind: ItemKind, name: String },

    /// Item kind does not match the registry
    #[error("type mismatch: {expected} registry cannot hold a {actual}")]
    TypeMismatch { expected: ItemKind, actual: ItemKind },

    /// Exact-name insert hit an existing entry
    #[error("name conflict: {kind} '{name}' already exists")]
    NameConflict { kind: ItemKind, name: String },
}

impl RegistryError {
    /// Create not-found error
    pub fn not_found(kind: ItemKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// True for errors caused by the caller's choice of name
    #[inline]
    #[must_use]
    pub fn is_name_error(&self) -> bool {
        matches!(self, Self::InvalidName { .. } | Self::NameConflict { .. })
    }
}
