//! Browser items
//!
//! A [`BrowserItem`] views a tabular data source. Unlike graphs, browsers
//! declare their own reconstruction requirements (the reader packages that
//! understand the source), which feed the workspace manifest.

use crate::item::{private, Dependencies, ItemKind, ItemPayload};
use serde::{Deserialize, Serialize};

/// Data browser payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrowserItem {
    #[serde(skip)]
    name: String,
    /// Locator of the data source (path or URI)
    #[serde(default)]
    source: String,
    /// Visible columns, in display order
    #[serde(default)]
    columns: Vec<String>,
    /// Packages the source reader requires
    #[serde(default)]
    requires: Dependencies,
}

impl BrowserItem {
    /// Browser named `name` with no source
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn set_columns<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
    }

    /// Declare that reconstruction needs `package` at `version`
    pub fn require(&mut self, package: impl Into<String>, version: impl Into<String>) {
        self.requires.insert(package.into(), version.into());
    }

    /// Builder-style [`require`](Self::require)
    #[must_use]
    pub fn with_requirement(mut self, package: impl Into<String>, version: impl Into<String>) -> Self {
        self.require(package, version);
        self
    }
}

impl private::Sealed for BrowserItem {}

impl ItemPayload for BrowserItem {
    const KIND: ItemKind = ItemKind::Browser;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn dependencies(&self) -> Dependencies {
        self.requires.clone()
    }
}
