//! Placement state of an item inside its container
//!
//! A [`PlacementState`] pairs a [`DisplayMode`] with the last known Normal
//! geometry. Switching to Maximized or Minimized never discards that
//! geometry, so toggling back to Normal lands exactly where the item was.

use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Width of a minimized item's title strip
pub const MINIMIZED_WIDTH: u32 = 160;

/// Height of a minimized item's title strip
pub const MINIMIZED_HEIGHT: u32 = 28;

/// How an item's container is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Free-floating at its stored geometry
    #[default]
    Normal,

    /// Fills the whole container
    Maximized,

    /// Collapsed to a title strip
    Minimized,
}

impl DisplayMode {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Maximized => "maximized",
            Self::Minimized => "minimized",
        }
    }
}

impl Display for DisplayMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual state attached to every live item
///
/// # Invariants
/// - `geometry` is the last geometry the item had in Normal mode
/// - mode changes never touch `geometry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlacementState {
    mode: DisplayMode,
    geometry: Geometry,
}

impl PlacementState {
    /// Placement with explicit mode and geometry
    #[inline]
    #[must_use]
    pub const fn new(mode: DisplayMode, geometry: Geometry) -> Self {
        Self { mode, geometry }
    }

    /// Normal placement at `geometry`
    #[inline]
    #[must_use]
    pub const fn normal(geometry: Geometry) -> Self {
        Self::new(DisplayMode::Normal, geometry)
    }

    /// Maximized placement remembering `geometry` for a later restore
    #[inline]
    #[must_use]
    pub const fn maximized(geometry: Geometry) -> Self {
        Self::new(DisplayMode::Maximized, geometry)
    }

    /// Minimized placement remembering `geometry` for a later restore
    #[inline]
    #[must_use]
    pub const fn minimized(geometry: Geometry) -> Self {
        Self::new(DisplayMode::Minimized, geometry)
    }

    /// Current display mode
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Last known Normal geometry
    #[inline]
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// True when displayed at its stored geometry
    #[inline]
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self.mode, DisplayMode::Normal)
    }

    pub fn maximize(&mut self) {
        self.mode = DisplayMode::Maximized;
    }

    pub fn minimize(&mut self) {
        self.mode = DisplayMode::Minimized;
    }

    pub fn show_normal(&mut self) {
        self.mode = DisplayMode::Normal;
    }

    /// Move/resize the item. Only a Normal item has a free geometry, so this
    /// also switches the mode back to Normal.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.mode = DisplayMode::Normal;
    }

    /// Rectangle the item occupies on screen inside `container`
    #[must_use]
    pub fn displayed_geometry(&self, container: Geometry) -> Geometry {
        match self.mode {
            DisplayMode::Normal => self.geometry,
            DisplayMode::Maximized => Geometry::sized(container.width, container.height),
            DisplayMode::Minimized => {
                let y = container.height.saturating_sub(MINIMIZED_HEIGHT);
                Geometry::new(
                    0,
                    i32::try_from(y).unwrap_or(i32::MAX),
                    MINIMIZED_WIDTH.min(container.width),
                    MINIMIZED_HEIGHT.min(container.height),
                )
            }
        }
    }
}

impl Display for PlacementState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.mode, self.geometry)
    }
}
