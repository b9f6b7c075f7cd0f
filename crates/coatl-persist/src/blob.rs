//! State and manifest byte streams
//!
//! [`StateBlob`] and [`ManifestBlob`] are the two byte streams a save
//! produces. Both are JSON carrying a `format` version that is checked
//! before the full decode.

use crate::constants::{MANIFEST_FORMAT_VERSION, STATE_FORMAT_VERSION};
use crate::error::{PersistError, Result};
use crate::manifest::DependencyManifest;
use crate::record::WorkspaceRecord;
use serde::Deserialize;

#[derive(Deserialize)]
struct FormatProbe {
    format: u32,
}

fn check_format(bytes: &[u8], what: &'static str, supported: u32) -> Result<()> {
    let probe: FormatProbe =
        serde_json::from_slice(bytes).map_err(|source| PersistError::Decode { what, source })?;
    if probe.format != supported {
        return Err(PersistError::UnsupportedFormat {
            what,
            found: probe.format,
            supported,
        });
    }
    Ok(())
}

/// Serialized workspace state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBlob(Vec<u8>);

impl StateBlob {
    /// Encode a workspace record
    ///
    /// # Errors
    /// Returns `PersistError::Encode` if serialization fails
    pub fn encode(record: &WorkspaceRecord) -> Result<Self> {
        serde_json::to_vec_pretty(record)
            .map(Self)
            .map_err(|source| PersistError::Encode {
                what: "state",
                source,
            })
    }

    /// Decode into a workspace record
    ///
    /// # Errors
    /// - `PersistError::UnsupportedFormat` for any other format version
    /// - `PersistError::Decode` if the bytes are not a valid record
    pub fn decode(&self) -> Result<WorkspaceRecord> {
        check_format(&self.0, "state", STATE_FORMAT_VERSION)?;
        serde_json::from_slice(&self.0).map_err(|source| PersistError::Decode {
            what: "state",
            source,
        })
    }

    /// Blake3 hex digest of the raw bytes
    #[must_use]
    pub fn checksum(&self) -> String {
        hex::encode(blake3::hash(&self.0).as_bytes())
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for StateBlob {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// Serialized dependency manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestBlob(Vec<u8>);

impl ManifestBlob {
    /// Encode a manifest
    ///
    /// # Errors
    /// Returns `PersistError::Encode` if serialization fails
    pub fn encode(manifest: &DependencyManifest) -> Result<Self> {
        serde_json::to_vec_pretty(manifest)
            .map(Self)
            .map_err(|source| PersistError::Encode {
                what: "manifest",
                source,
            })
    }

    /// Decode into a manifest
    ///
    /// # Errors
    /// - `PersistError::UnsupportedFormat` for any other format version
    /// - `PersistError::Decode` if the bytes are not a valid manifest
    pub fn decode(&self) -> Result<DependencyManifest> {
        check_format(&self.0, "manifest", MANIFEST_FORMAT_VERSION)?;
        serde_json::from_slice(&self.0).map_err(|source| PersistError::Decode {
            what: "manifest",
            source,
        })
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ManifestBlob {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}
