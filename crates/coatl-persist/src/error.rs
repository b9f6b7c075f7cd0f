//! Error types for the persistence format
//!
//! Provides error handling for:
//! - File reads and writes (always tagged with the path)
//! - Blob encoding and decoding
//! - Format version checks

use coatl_item::ItemError;
use std::path::PathBuf;

/// Errors reading or writing workspace files
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// IO error on a specific file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes did not decode
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Value did not encode
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Written by a different format version
    #[error("unsupported {what} format version {found} (supported: {supported})")]
    UnsupportedFormat {
        what: &'static str,
        found: u32,
        supported: u32,
    },

    /// Item record could not be converted
    #[error("item record error: {0}")]
    Item(#[from] ItemError),
}

impl PersistError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the file exists but its content is unusable
    #[inline]
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::UnsupportedFormat { .. } | Self::Item(_)
        )
    }

    /// True when the file is simply not there
    #[inline]
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result alias for persistence operations
pub type Result<T> = std::result::Result<T, PersistError>;
