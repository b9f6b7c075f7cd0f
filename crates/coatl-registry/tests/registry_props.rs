//! Property tests for registry namespace invariants.
//!
//! Random sequences of add/rename/remove must never produce two entries with
//! the same name, and every entry's key must stay equal to its item's name.

use coatl_item::{Geometry, GraphItem, Item, ItemKind, PlacementState};
use coatl_registry::{NameRegistry, RegistryError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Rename(usize, String),
    Remove(usize),
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("g".to_string()),
        Just("g0".to_string()),
        Just("g1".to_string()),
        Just("plot".to_string()),
        "[a-c]{1,2}[0-2]?",
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        name_strategy().prop_map(Op::Add),
        (0..16usize, name_strategy()).prop_map(|(i, n)| Op::Rename(i, n)),
        (0..16usize).prop_map(Op::Remove),
    ]
}

fn placement() -> PlacementState {
    PlacementState::normal(Geometry::new(0, 0, 200, 100))
}

fn assert_consistent(reg: &NameRegistry) {
    let names = reg.names();
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len(), "duplicate names: {names:?}");
    for entry in reg.list() {
        assert_eq!(entry.name(), entry.item().name());
    }
}

proptest! {
    #[test]
    fn prop_names_stay_unique(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let mut reg = NameRegistry::new(ItemKind::Graph);

        for op in ops {
            match op {
                Op::Add(name) => {
                    let before = reg.len();
                    let resolved = reg
                        .add(Item::Graph(GraphItem::new(&name)), &name, placement())
                        .unwrap();
                    prop_assert!(resolved.starts_with(&name));
                    prop_assert_eq!(reg.len(), before + 1);
                }
                Op::Rename(idx, new) => {
                    let names: Vec<String> = reg.names().iter().map(|s| (*s).to_string()).collect();
                    if let Some(old) = names.get(idx) {
                        let before = reg.len();
                        let resolved = reg.rename(old, &new).unwrap();
                        prop_assert!(resolved.starts_with(&new));
                        prop_assert_ne!(&resolved, old);
                        prop_assert_eq!(reg.len(), before);
                    }
                }
                Op::Remove(idx) => {
                    let names: Vec<String> = reg.names().iter().map(|s| (*s).to_string()).collect();
                    match names.get(idx) {
                        Some(name) => {
                            reg.remove(name).unwrap();
                            prop_assert!(!reg.contains(name));
                        }
                        None => {
                            let missing = format!("missing{idx}");
                            let not_found =
                                matches!(reg.remove(&missing), Err(RegistryError::NotFound { .. }));
                            prop_assert!(not_found);
                        }
                    }
                }
            }
            assert_consistent(&reg);
        }
    }

    #[test]
    fn prop_resolved_name_is_closest_free(taken in proptest::collection::hash_set(0..8u8, 0..8)) {
        let mut reg = NameRegistry::new(ItemKind::Graph);
        reg.insert_exact(Item::Graph(GraphItem::new("n")), "n", placement()).unwrap();
        for suffix in &taken {
            let name = format!("n{suffix}");
            reg.insert_exact(Item::Graph(GraphItem::new(&name)), &name, placement()).unwrap();
        }

        let expected = (0..).find(|i| !taken.contains(&(*i as u8)) || *i >= 8).unwrap();
        let resolved = reg.add(Item::Graph(GraphItem::new("n")), "n", placement()).unwrap();
        prop_assert_eq!(resolved, format!("n{expected}"));
    }
}

#[test]
fn adding_same_name_three_times() {
    let mut reg = NameRegistry::new(ItemKind::Graph);
    let names: Vec<String> = (0..3)
        .map(|_| reg.add(Item::Graph(GraphItem::new("g")), "g", placement()).unwrap())
        .collect();
    assert_eq!(names, vec!["g", "g0", "g1"]);
}

#[test]
fn reserved_prefix_is_invalid() {
    let mut reg = NameRegistry::new(ItemKind::Graph);
    let err = reg
        .add(Item::Graph(GraphItem::new("x")), "__Manager__internal", placement())
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidName { .. }));
}

#[test]
fn registries_have_independent_namespaces() {
    let mut graphs = NameRegistry::new(ItemKind::Graph);
    let mut browsers = NameRegistry::new(ItemKind::Browser);
    let g = graphs.add(Item::new_default(ItemKind::Graph, "x"), "shared", placement()).unwrap();
    let b = browsers.add(Item::new_default(ItemKind::Browser, "x"), "shared", placement()).unwrap();
    assert_eq!(g, "shared");
    assert_eq!(b, "shared");
}
