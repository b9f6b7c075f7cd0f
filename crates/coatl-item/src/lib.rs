//! coatl Item System
//!
//! Named, placeable payloads managed by a workspace.
//!
//! # Core Concepts
//!
//! - [`Item`]: closed enum over the item kinds a workspace holds
//! - [`ItemPayload`]: sealed trait every concrete payload implements
//! - [`ItemRecord`]: toolkit-independent serialized form (`to_record` / `from_record`)
//! - [`PlacementState`]: display mode plus last Normal [`Geometry`]
//!
//! # Example
//!
//! ```rust
//! use coatl_item::{GraphItem, Item, ItemPayload, Series};
//!
//! let graph = GraphItem::new("iv").with_series(Series::new("forward").with_point(0.0, 0.0));
//! let record = graph.to_record().unwrap();
//! let restored = Item::from_record(&record).unwrap();
//! assert_eq!(restored.name(), "iv");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod browser;
mod geometry;
mod graph;
mod item;
mod placement;

// Re-exports
pub use browser::BrowserItem;
pub use geometry::Geometry;
pub use graph::{GraphItem, Series, GRAPH_LIBRARY, GRAPH_LIBRARY_VERSION};
pub use item::{Dependencies, Item, ItemError, ItemKind, ItemPayload, ItemRecord};
pub use placement::{DisplayMode, PlacementState, MINIMIZED_HEIGHT, MINIMIZED_WIDTH};

/// Sealed trait support - for implementing custom payload types.
/// **Note:** This is only for internal/testing use and may change.
#[doc(hidden)]
pub mod __private {
    pub use super::item::private::Sealed;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
