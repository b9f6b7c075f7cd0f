//! Dependency manifests
//!
//! A [`DependencyManifest`] records which package versions a saved
//! workspace depended on. On load it is compared against the installed
//! [`Environment`]; differences are reported as [`DependencyMismatch`]
//! warnings and never block reconstruction.

use crate::constants::MANIFEST_FORMAT_VERSION;
use chrono::{DateTime, Utc};
use coatl_item::{Dependencies, GRAPH_LIBRARY, GRAPH_LIBRARY_VERSION};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Versions a saved workspace depended on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub format: u32,
    pub saved_at: DateTime<Utc>,
    /// Blake3 hex digest of the state file written alongside
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_checksum: Option<String>,
    pub dependencies: Dependencies,
}

impl DependencyManifest {
    /// Empty manifest stamped now
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Empty manifest stamped at `saved_at`
    #[must_use]
    pub fn at(saved_at: DateTime<Utc>) -> Self {
        Self {
            format: MANIFEST_FORMAT_VERSION,
            saved_at,
            state_checksum: None,
            dependencies: Dependencies::new(),
        }
    }

    /// Merge one item's declared dependencies
    ///
    /// When two items declare the same package, the later declaration wins.
    pub fn merge(&mut self, deps: &Dependencies) {
        for (package, version) in deps {
            if let Some(previous) = self.dependencies.insert(package.clone(), version.clone()) {
                if previous != *version {
                    tracing::debug!(
                        "Manifest entry {} redeclared: {} -> {}",
                        package,
                        previous,
                        version
                    );
                }
            }
        }
    }

    /// Record the installed graphing library version
    ///
    /// Applied last when building a manifest, so it overrides any item's
    /// claim on the same key.
    pub fn record_graph_library(&mut self) {
        self.dependencies
            .insert(GRAPH_LIBRARY.to_string(), GRAPH_LIBRARY_VERSION.to_string());
    }

    /// Builder-style checksum attach
    #[must_use]
    pub fn with_state_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.state_checksum = Some(checksum.into());
        self
    }

    /// Required version of `package`
    #[must_use]
    pub fn required(&self, package: &str) -> Option<&str> {
        self.dependencies.get(package).map(String::as_str)
    }
}

impl Default for DependencyManifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Packages installed in the running environment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Environment {
    packages: Dependencies,
}

impl Environment {
    /// Environment with nothing installed
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Packages this build ships with
    #[must_use]
    pub fn installed() -> Self {
        Self::empty().with_package(GRAPH_LIBRARY, GRAPH_LIBRARY_VERSION)
    }

    /// Builder-style package registration
    #[must_use]
    pub fn with_package(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.packages.insert(name.into(), version.into());
        self
    }

    /// Installed version of `name`
    #[must_use]
    pub fn version(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn packages(&self) -> &Dependencies {
        &self.packages
    }
}

/// One dependency whose installed version differs from the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyMismatch {
    pub dependency: String,
    pub required: String,
    /// `None` when the package is not installed at all
    pub installed: Option<String>,
}

impl Display for DependencyMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.installed {
            Some(v) => write!(
                f,
                "{} requires {}, installed {}",
                self.dependency, self.required, v
            ),
            None => write!(
                f,
                "{} requires {}, not installed",
                self.dependency, self.required
            ),
        }
    }
}

/// Compare a manifest against the environment
///
/// Pure function; results are sorted by dependency name. Packages
/// installed but not mentioned in the manifest are not mismatches.
#[must_use]
pub fn validate(environment: &Environment, manifest: &DependencyManifest) -> Vec<DependencyMismatch> {
    manifest
        .dependencies
        .iter()
        .filter_map(|(name, required)| {
            let installed = environment.version(name);
            if installed == Some(required.as_str()) {
                None
            } else {
                Some(DependencyMismatch {
                    dependency: name.clone(),
                    required: required.clone(),
                    installed: installed.map(str::to_string),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deps(pairs: &[(&str, &str)]) -> Dependencies {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn merge_collects_all_declarations() {
        let mut m = DependencyManifest::new();
        m.merge(&deps(&[("libA", "1.0")]));
        m.merge(&deps(&[("libB", "2.0")]));
        m.record_graph_library();

        assert_eq!(m.dependencies.len(), 3);
        assert_eq!(m.required("libA"), Some("1.0"));
        assert_eq!(m.required("libB"), Some("2.0"));
        assert_eq!(m.required(GRAPH_LIBRARY), Some(GRAPH_LIBRARY_VERSION));
    }

    #[test]
    fn graph_library_entry_overrides_items() {
        let mut m = DependencyManifest::new();
        m.merge(&deps(&[(GRAPH_LIBRARY, "0.0.0-old")]));
        m.record_graph_library();
        assert_eq!(m.required(GRAPH_LIBRARY), Some(GRAPH_LIBRARY_VERSION));
    }

    #[test]
    fn validate_reports_changed_and_absent() {
        let mut m = DependencyManifest::new();
        m.merge(&deps(&[("libA", "1.0"), ("libB", "2.0"), ("libC", "3.0")]));
        let env = Environment::empty()
            .with_package("libA", "1.0")
            .with_package("libB", "2.1")
            .with_package("extra", "9");

        let mismatches = validate(&env, &m);
        assert_eq!(
            mismatches,
            vec![
                DependencyMismatch {
                    dependency: "libB".into(),
                    required: "2.0".into(),
                    installed: Some("2.1".into()),
                },
                DependencyMismatch {
                    dependency: "libC".into(),
                    required: "3.0".into(),
                    installed: None,
                },
            ]
        );
    }

    #[test]
    fn installed_environment_matches_fresh_manifest() {
        let mut m = DependencyManifest::new();
        m.record_graph_library();
        assert!(validate(&Environment::installed(), &m).is_empty());
    }

    #[test]
    fn mismatch_display() {
        let m = DependencyMismatch {
            dependency: "libC".into(),
            required: "3.0".into(),
            installed: None,
        };
        assert_eq!(m.to_string(), "libC requires 3.0, not installed");
    }

    #[test]
    fn checksum_omitted_when_absent() {
        let json = serde_json::to_value(DependencyManifest::new()).unwrap();
        assert!(json.get("state_checksum").is_none());
        assert_eq!(json["format"], MANIFEST_FORMAT_VERSION);
    }
}
