//! Error types for coatl Core
//!
//! Provides error handling for:
//! - Namespace violations (invalid name, not found, type mismatch, conflict)
//! - Main-file deserialization failures
//! - File I/O and encoding
//! - Configuration loading

use coatl_persist::PersistError;
use coatl_registry::RegistryError;
use std::path::PathBuf;

/// Main workspace error type
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// Registry rejected the operation
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Main file unreadable or unparseable
    #[error("cannot load {path}: {source}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: PersistError,
    },

    /// Writing or encoding failed
    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl WorkspaceError {
    /// Create deserialization error for path
    pub fn deserialization(path: impl Into<PathBuf>, source: PersistError) -> Self {
        Self::Deserialization {
            path: path.into(),
            source,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::InvalidName { .. }))
    }

    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::NotFound { .. }))
    }

    #[inline]
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::TypeMismatch { .. }))
    }

    /// Restore hit a duplicate name; the state file is corrupt or hand-edited
    #[inline]
    #[must_use]
    pub fn is_name_conflict(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::NameConflict { .. }))
    }

    #[inline]
    #[must_use]
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }

    /// Errors a user caused by a UI action, as opposed to file/system trouble
    #[inline]
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Registry(
                RegistryError::InvalidName { .. }
                    | RegistryError::NotFound { .. }
                    | RegistryError::TypeMismatch { .. }
            )
        )
    }
}

/// Result alias for workspace operations
pub type Result<T> = std::result::Result<T, WorkspaceError>;
