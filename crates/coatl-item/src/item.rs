//! Item kinds, the payload trait and the record form
//!
//! Defines the [`ItemPayload`] trait implemented by every concrete item type
//! and the closed [`Item`] enum the registries hold. This is a sealed trait:
//! only payloads defined within this crate can implement it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};

use crate::browser::BrowserItem;
use crate::graph::GraphItem;

/// Package name -> required version
///
/// Ordered so that manifests built from it serialize identically every time.
pub type Dependencies = BTreeMap<String, String>;

/// The two kinds of item a workspace manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Plot window
    Graph,

    /// Data browser window
    Browser,
}

impl ItemKind {
    /// All kinds, in registry order
    pub const ALL: [ItemKind; 2] = [ItemKind::Graph, ItemKind::Browser];

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Browser => "browser",
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sealed trait - prevents external implementations
#[doc(hidden)]
pub mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

/// Errors converting items to and from records
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// Record carries a different kind tag
    #[error("kind mismatch: expected {expected}, got {actual}")]
    KindMismatch { expected: ItemKind, actual: ItemKind },

    /// Payload could not be encoded or decoded
    #[error("{kind} payload error: {source}")]
    Payload {
        kind: ItemKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Toolkit-independent serialized form of one item
///
/// `payload` holds whatever the item type defines for itself; the registry
/// and persistence layers never look inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub kind: ItemKind,
    pub name: String,
    pub payload: serde_json::Value,
}

/// Trait for concrete item payloads
///
/// # Contract
/// - `name()` is the item's public identity; the owning registry keeps it
///   equal to the entry key
/// - `to_record()` followed by `from_record()` reproduces an equal value
/// - `dependencies()` lists what a faithful reconstruction requires
pub trait ItemPayload:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + private::Sealed
{
    /// Kind tag written into records
    const KIND: ItemKind;

    /// Public identity
    fn name(&self) -> &str;

    /// Overwrite the public identity
    ///
    /// Only the owning registry should call this; anything else breaks the
    /// name/key invariant.
    fn set_name(&mut self, name: &str);

    /// Packages and versions required to reconstruct this item
    fn dependencies(&self) -> Dependencies {
        Dependencies::new()
    }

    /// Encode as a record
    ///
    /// # Errors
    /// Returns error if the payload cannot be represented as JSON
    fn to_record(&self) -> Result<ItemRecord, ItemError> {
        let payload = serde_json::to_value(self).map_err(|source| ItemError::Payload {
            kind: Self::KIND,
            source,
        })?;
        Ok(ItemRecord {
            kind: Self::KIND,
            name: self.name().to_string(),
            payload,
        })
    }

    /// Decode from a record
    ///
    /// # Errors
    /// - `ItemError::KindMismatch` if the record belongs to another kind
    /// - `ItemError::Payload` if the payload does not decode
    fn from_record(record: &ItemRecord) -> Result<Self, ItemError>
    where
        Self: Sized,
    {
        if record.kind != Self::KIND {
            return Err(ItemError::KindMismatch {
                expected: Self::KIND,
                actual: record.kind,
            });
        }
        let mut item: Self =
            serde_json::from_value(record.payload.clone()).map_err(|source| {
                ItemError::Payload {
                    kind: Self::KIND,
                    source,
                }
            })?;
        item.set_name(&record.name);
        Ok(item)
    }
}

/// Any item a workspace can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Graph(GraphItem),
    Browser(BrowserItem),
}

impl Item {
    /// Default item of `kind` named `name`
    #[must_use]
    pub fn new_default(kind: ItemKind, name: &str) -> Self {
        match kind {
            ItemKind::Graph => Self::Graph(GraphItem::new(name)),
            ItemKind::Browser => Self::Browser(BrowserItem::new(name)),
        }
    }

    /// Kind of the wrapped payload
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Graph(_) => ItemKind::Graph,
            Self::Browser(_) => ItemKind::Browser,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Graph(g) => g.name(),
            Self::Browser(b) => b.name(),
        }
    }

    /// See [`ItemPayload::set_name`]
    pub fn set_name(&mut self, name: &str) {
        match self {
            Self::Graph(g) => g.set_name(name),
            Self::Browser(b) => b.set_name(name),
        }
    }

    #[must_use]
    pub fn dependencies(&self) -> Dependencies {
        match self {
            Self::Graph(g) => g.dependencies(),
            Self::Browser(b) => b.dependencies(),
        }
    }

    /// Encode as a record
    ///
    /// # Errors
    /// Returns error if the payload cannot be represented as JSON
    pub fn to_record(&self) -> Result<ItemRecord, ItemError> {
        match self {
            Self::Graph(g) => g.to_record(),
            Self::Browser(b) => b.to_record(),
        }
    }

    /// Decode a record of either kind
    ///
    /// # Errors
    /// Returns error if the payload does not decode for the tagged kind
    pub fn from_record(record: &ItemRecord) -> Result<Self, ItemError> {
        match record.kind {
            ItemKind::Graph => GraphItem::from_record(record).map(Self::Graph),
            ItemKind::Browser => BrowserItem::from_record(record).map(Self::Browser),
        }
    }

    #[must_use]
    pub fn as_graph(&self) -> Option<&GraphItem> {
        match self {
            Self::Graph(g) => Some(g),
            Self::Browser(_) => None,
        }
    }

    #[must_use]
    pub fn as_browser(&self) -> Option<&BrowserItem> {
        match self {
            Self::Browser(b) => Some(b),
            Self::Graph(_) => None,
        }
    }
}

impl From<GraphItem> for Item {
    fn from(value: GraphItem) -> Self {
        Self::Graph(value)
    }
}

impl From<BrowserItem> for Item {
    fn from(value: BrowserItem) -> Self {
        Self::Browser(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_default_matches_kind() {
        for kind in ItemKind::ALL {
            let item = Item::new_default(kind, "Unnamed");
            assert_eq!(item.kind(), kind);
            assert_eq!(item.name(), "Unnamed");
        }
    }

    #[test]
    fn record_carries_kind_and_name() {
        let item = Item::new_default(ItemKind::Browser, "b1");
        let record = item.to_record().unwrap();
        assert_eq!(record.kind, ItemKind::Browser);
        assert_eq!(record.name, "b1");
    }

    #[test]
    fn from_record_dispatches_on_kind() {
        let mut graph = GraphItem::new("plot");
        graph.set_title("voltage");
        let record = Item::from(graph.clone()).to_record().unwrap();

        let restored = Item::from_record(&record).unwrap();
        assert_eq!(restored, Item::Graph(graph));
    }

    #[test]
    fn typed_from_record_rejects_other_kind() {
        let record = Item::new_default(ItemKind::Graph, "g").to_record().unwrap();
        let err = BrowserItem::from_record(&record).unwrap_err();
        assert!(matches!(
            err,
            ItemError::KindMismatch {
                expected: ItemKind::Browser,
                actual: ItemKind::Graph
            }
        ));
    }

    #[test]
    fn bad_payload_is_reported() {
        let record = ItemRecord {
            kind: ItemKind::Graph,
            name: "g".into(),
            payload: serde_json::json!({"series": "not a list"}),
        };
        let err = Item::from_record(&record).unwrap_err();
        assert!(matches!(err, ItemError::Payload { kind: ItemKind::Graph, .. }));
    }

    #[test]
    fn set_name_updates_identity() {
        let mut item = Item::new_default(ItemKind::Graph, "a");
        item.set_name("b");
        assert_eq!(item.name(), "b");
    }

    #[test]
    fn kind_display() {
        assert_eq!(ItemKind::Graph.to_string(), "graph");
        assert_eq!(ItemKind::Browser.to_string(), "browser");
    }
}
