//! File-pair persistence tests

use coatl_core::prelude::*;
use coatl_persist::{StateBlob, WorkspaceRecord};
use coatl_test_utils::{
    create_browser, engine, sample_workspace, save_in, setup_test_workspace, write_workspaces,
    SAMPLE_GEOMETRY,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn round_trip_preserves_names_modes_and_geometry() {
    let ws = sample_workspace();
    let engine = engine();

    let (state, _) = engine.snapshot(&ws).unwrap();
    let restored = engine.restore(&state).unwrap();

    let mut graphs = restored.registry(ItemKind::Graph).names();
    graphs.sort_unstable();
    assert_eq!(graphs, vec!["A"]);
    assert_eq!(restored.registry(ItemKind::Browser).names(), vec!["B"]);

    let a = restored.registry(ItemKind::Graph).placement("A").unwrap();
    assert_eq!(a, PlacementState::normal(SAMPLE_GEOMETRY));

    let b = restored.registry(ItemKind::Browser).placement("B").unwrap();
    assert_eq!(b.mode(), DisplayMode::Maximized);
    assert_eq!(b.geometry(), Geometry::new(40, 50, 640, 480));

    assert_eq!(restored.item(ItemKind::Graph, "A"), ws.item(ItemKind::Graph, "A"));
    assert_eq!(restored.item(ItemKind::Browser, "B"), ws.item(ItemKind::Browser, "B"));
}

#[test]
fn maximized_item_returns_to_its_saved_normal_geometry() {
    let engine = engine();
    let (state, _) = engine.snapshot(&sample_workspace()).unwrap();
    let mut restored = engine.restore(&state).unwrap();

    restored.registry_mut(ItemKind::Browser).show_normal("B").unwrap();
    let b = restored.registry(ItemKind::Browser).placement("B").unwrap();
    assert_eq!(
        b.displayed_geometry(restored.window_geometry()),
        Geometry::new(40, 50, 640, 480)
    );
}

#[test]
fn manifest_merges_browser_dependencies_and_graph_library() {
    let mut ws = setup_test_workspace();
    for (name, dep) in [("b1", ("libA", "1.0")), ("b2", ("libB", "2.0"))] {
        ws.add_item(
            ItemKind::Browser,
            Item::from(create_browser(name, &[dep])),
            name,
            None,
        )
        .unwrap();
    }

    let (_, manifest) = engine().snapshot(&ws).unwrap();
    let manifest = manifest.decode().unwrap();

    assert_eq!(manifest.dependencies.len(), 3);
    assert_eq!(manifest.required("libA"), Some("1.0"));
    assert_eq!(manifest.required("libB"), Some("2.0"));
    assert_eq!(
        manifest.required(coatl_item::GRAPH_LIBRARY),
        Some(coatl_item::GRAPH_LIBRARY_VERSION)
    );
}

#[test]
fn hand_edited_duplicate_name_is_name_conflict() {
    let engine = engine();
    let (state, _) = engine.snapshot(&sample_workspace()).unwrap();

    let mut record: WorkspaceRecord = state.decode().unwrap();
    let copy = record.graphs[0].clone();
    record.graphs.push(copy);
    let edited = StateBlob::encode(&record).unwrap();

    let err = engine.restore(&edited).unwrap_err();
    assert!(err.is_name_conflict(), "unexpected error: {err}");
}

#[test]
fn entry_in_wrong_registry_is_type_mismatch() {
    let engine = engine();
    let (state, _) = engine.snapshot(&sample_workspace()).unwrap();

    let mut record: WorkspaceRecord = state.decode().unwrap();
    let graph = record.graphs.remove(0);
    record.browsers.push(graph);
    let edited = StateBlob::encode(&record).unwrap();

    assert!(engine.restore(&edited).unwrap_err().is_type_mismatch());
}

#[test]
fn partial_batch_open_reports_one_failure() {
    let (dir, paths) = write_workspaces(3);
    fs::write(&paths[1], b"\x00\x01 definitely not a workspace").unwrap();

    let report = engine().open_many(&paths);

    assert_eq!(report.attempted(), 3);
    assert_eq!(report.loaded.len(), 2);
    assert_eq!(report.failures.len(), 1);

    let failure = &report.failures[0];
    assert_eq!(failure.path, paths[1]);
    assert!(failure.error.is_deserialization());
    match &failure.manifest {
        ManifestDiagnostic::Declared(deps) => {
            assert!(deps.contains_key(coatl_item::GRAPH_LIBRARY));
        }
        ManifestDiagnostic::Unavailable(reason) => panic!("manifest should be readable: {reason}"),
    }

    assert!(report.loaded[0].workspace.item(ItemKind::Graph, "g0").is_some());
    assert!(report.loaded[1].workspace.item(ItemKind::Graph, "g2").is_some());
    drop(dir);
}

#[test]
fn undecodable_item_payload_fails_only_that_file() {
    let (dir, paths) = write_workspaces(3);
    let state = StateBlob::from(fs::read(&paths[1]).unwrap());
    let mut record: WorkspaceRecord = state.decode().unwrap();
    record.graphs[0].item.payload["series"] = serde_json::json!(5);
    fs::write(&paths[1], StateBlob::encode(&record).unwrap().as_bytes()).unwrap();

    let report = engine().open_many(&paths);

    assert_eq!(report.loaded.len(), 2);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.path, paths[1]);
    assert!(failure.error.is_deserialization(), "unexpected error: {}", failure.error);
    assert!(failure.error.to_string().contains("ws1.cl"));
    assert!(matches!(failure.manifest, ManifestDiagnostic::Declared(_)));
    drop(dir);
}

#[test]
fn graph_with_nan_gap_saves_and_reloads() {
    let dir = TempDir::new().unwrap();
    let mut ws = setup_test_workspace();
    let gappy = GraphItem::new("gappy").with_series(
        Series::new("temps")
            .with_point(0.0, 18.5)
            .with_point(1.0, f64::NAN)
            .with_point(2.0, f64::INFINITY),
    );
    ws.add_item(ItemKind::Graph, Item::from(gappy), "gappy", None).unwrap();
    let paths = save_in(&mut ws, dir.path(), "gaps");

    let loaded = engine().load(&paths.main).unwrap();
    let graph = loaded
        .workspace
        .item(ItemKind::Graph, "gappy")
        .and_then(Item::as_graph)
        .unwrap();
    let points = &graph.series()[0].points;
    assert_eq!(points.len(), 3);
    assert_eq!(points[0], (0.0, 18.5));
    assert!(points[1].1.is_nan());
    assert_eq!(points[2], (2.0, f64::INFINITY));
}

#[test]
fn failure_without_manifest_reports_unavailable() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone.cl");

    let report = engine().open_many([&missing]);
    assert!(!report.is_complete());
    assert!(matches!(
        report.failures[0].manifest,
        ManifestDiagnostic::Unavailable(_)
    ));
}

#[test]
fn missing_manifest_is_only_a_warning() {
    let dir = TempDir::new().unwrap();
    let mut ws = sample_workspace();
    let paths = save_in(&mut ws, dir.path(), "pair");
    fs::remove_file(&paths.manifest).unwrap();

    let loaded = engine().load(&paths.main).unwrap();
    assert!(loaded.manifest.is_none());
    assert!(matches!(
        loaded.warnings.as_slice(),
        [LoadWarning::ManifestUnavailable { .. }]
    ));
    assert_eq!(loaded.workspace.item_count(), 2);
}

#[test]
fn dependency_mismatch_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let mut ws = sample_workspace();
    let paths = save_in(&mut ws, dir.path(), "deps");

    // sample browser requires libA 1.0, which the installed environment lacks
    let loaded = engine().load(&paths.main).unwrap();
    let mismatches: Vec<_> = loaded
        .warnings
        .iter()
        .filter_map(|w| match w {
            LoadWarning::DependencyMismatch(m) => Some(m),
            _ => None,
        })
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].dependency, "libA");
    assert_eq!(mismatches[0].installed, None);

    let satisfied = PersistenceEngine::new(Environment::installed().with_package("libA", "1.0"))
        .load(&paths.main)
        .unwrap();
    assert!(!satisfied.has_warnings());
}

#[test]
fn state_edited_after_save_flags_checksum() {
    let dir = TempDir::new().unwrap();
    let mut ws = setup_test_workspace();
    ws.new_graph(Some("g")).unwrap();
    let paths = save_in(&mut ws, dir.path(), "sum");

    let mut text = fs::read_to_string(&paths.main).unwrap();
    text.push('\n');
    fs::write(&paths.main, text).unwrap();

    let loaded = engine().load(&paths.main).unwrap();
    assert!(loaded
        .warnings
        .iter()
        .any(|w| matches!(w, LoadWarning::ChecksumMismatch { .. })));
}

#[test]
fn unsupported_format_fails_load() {
    let dir = TempDir::new().unwrap();
    let mut ws = setup_test_workspace();
    let paths = save_in(&mut ws, dir.path(), "future");

    let text = fs::read_to_string(&paths.main).unwrap();
    fs::write(&paths.main, text.replacen("\"format\": 1", "\"format\": 99", 1)).unwrap();

    let err = engine().load(&paths.main).unwrap_err();
    assert!(err.is_deserialization());
    assert!(err.to_string().contains("future.cl"));
}
