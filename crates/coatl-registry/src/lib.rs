//! coatl Registry
//!
//! Collision-free namespaces of workspace items.
//!
//! # Overview
//!
//! - **NameRegistry**: name -> `(name, item, placement)` entries for one item kind
//! - **resolve_name**: linear numeric suffixing (`g`, `g0`, `g1`, ...)
//! - **RegistryEvent**: synchronous notifications for the owning container
//!
//! # Example
//!
//! ```rust
//! use coatl_item::{Geometry, GraphItem, Item, ItemKind, PlacementState};
//! use coatl_registry::NameRegistry;
//!
//! let mut graphs = NameRegistry::new(ItemKind::Graph);
//! let placement = PlacementState::normal(Geometry::new(0, 0, 400, 300));
//!
//! let first = graphs.add(Item::Graph(GraphItem::new("g")), "g", placement).unwrap();
//! let second = graphs.add(Item::Graph(GraphItem::new("g")), "g", placement).unwrap();
//! assert_eq!((first.as_str(), second.as_str()), ("g", "g0"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod event;
mod naming;
mod registry;

// Re-exports
pub use error::RegistryError;
pub use event::{Listener, ListenerId, RegistryEvent};
pub use naming::{check_name, resolve_name, RESERVED_PREFIX};
pub use registry::{Entry, NameRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
