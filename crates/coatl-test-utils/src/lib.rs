//! Testing utilities for coatl workspace
//!
//! Shared fixtures for items, workspaces and on-disk file pairs.

#![allow(missing_docs)]

use coatl_core::{PersistenceEngine, SavedPaths, WorkspaceConfig, WorkspaceController};
use coatl_item::{BrowserItem, Geometry, GraphItem, Item, ItemKind, PlacementState, Series};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Normal geometry used by [`sample_workspace`] for its graph
pub const SAMPLE_GEOMETRY: Geometry = Geometry {
    x: 10,
    y: 20,
    width: 300,
    height: 400,
};

pub fn create_graph(name: &str) -> GraphItem {
    let mut graph = GraphItem::new(name)
        .with_series(Series::new("linear").with_point(0.0, 0.0).with_point(1.0, 1.0));
    graph.set_title(format!("{name} plot"));
    graph.set_axis_labels("x", "y");
    graph
}

pub fn create_browser(name: &str, requires: &[(&str, &str)]) -> BrowserItem {
    let mut browser = BrowserItem::new(name).with_source(format!("{name}.csv"));
    for (package, version) in requires {
        browser.require(*package, *version);
    }
    browser
}

pub fn setup_test_workspace() -> WorkspaceController {
    WorkspaceController::new(WorkspaceConfig::new())
}

/// Graph `A` (Normal at [`SAMPLE_GEOMETRY`]) and browser `B` (Maximized)
pub fn sample_workspace() -> WorkspaceController {
    let mut ws = setup_test_workspace();
    ws.add_item(
        ItemKind::Graph,
        Item::from(create_graph("A")),
        "A",
        Some(PlacementState::normal(SAMPLE_GEOMETRY)),
    )
    .unwrap();
    ws.add_item(
        ItemKind::Browser,
        Item::from(create_browser("B", &[("libA", "1.0")])),
        "B",
        Some(PlacementState::maximized(Geometry::new(40, 50, 640, 480))),
    )
    .unwrap();
    ws
}

/// Save `ws` as `<dir>/<stem>.cl` and return the written paths
pub fn save_in(ws: &mut WorkspaceController, dir: &Path, stem: &str) -> SavedPaths {
    ws.save_as(dir.join(stem)).unwrap()
}

/// Write `count` small workspaces into a fresh temp dir
///
/// Workspace `i` holds a single graph named `g{i}`.
pub fn write_workspaces(count: usize) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let paths = (0..count)
        .map(|i| {
            let mut ws = setup_test_workspace();
            ws.new_graph(Some(&format!("g{i}"))).unwrap();
            save_in(&mut ws, dir.path(), &format!("ws{i}")).main
        })
        .collect();
    (dir, paths)
}

pub fn engine() -> PersistenceEngine {
    PersistenceEngine::default()
}
