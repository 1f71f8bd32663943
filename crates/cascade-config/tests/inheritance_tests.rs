//! Functional tests for scope resolution across inheritance chains.
//!
//! This module exercises the half-lazy, half-eager resolution rules:
//! - Scalars are re-read from the nearest ancestor on every lookup.
//! - Nested scopes and lists are wrapped once and keep delegating to the
//!   ancestor's live value.
//! - Structural keys can never be replaced by a scalar.

use cascade_config::{Scope, StructuralKind, Value};
use cascade_test_utils::{base_presenter_configuration, init_tracing, scope_chain};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

/// Tenet: a scalar set on the root is visible at every depth, and later
/// changes to it are visible too (nothing is snapshotted).
#[test]
fn scalar_inheritance_is_live() {
    init_tracing();
    let chain = scope_chain(4);
    let (root, leaf) = (&chain[0], &chain[4]);

    root.set("x", 1).unwrap();
    assert_eq!(leaf.get_scalar("x"), Some(json!(1)));

    root.set("x", 2).unwrap();
    assert_eq!(leaf.get_scalar("x"), Some(json!(2)));
}

/// Tenet: an intermediate override shadows the root for itself and every
/// descendant, but not for its ancestors.
#[test]
fn nearest_override_wins() {
    let chain = scope_chain(3);
    chain[0].set("x", "root").unwrap();
    chain[2].set("x", "middle").unwrap();

    assert_eq!(chain[1].get_scalar("x"), Some(json!("root")));
    assert_eq!(chain[2].get_scalar("x"), Some(json!("middle")));
    assert_eq!(chain[3].get_scalar("x"), Some(json!("middle")));
}

/// Tenet: unset keys are absent, not errors.
#[test]
fn unset_key_is_absent() {
    let chain = scope_chain(2);
    assert!(chain[2].get("nope").is_none());
    assert!(chain[2].get_scalar("nope").is_none());
}

/// Tenet: structural freeze-once. A child's nested scope is a child of the
/// ancestor's nested scope, and later writes into the ancestor's nested scope
/// show through the already materialized child.
#[test]
fn nested_scope_freezes_once_and_delegates() {
    let s0 = Scope::new();
    let g0 = s0.ensure_nested_scope("g").unwrap();
    let s1 = Scope::child(&s0);
    let g1 = s1.ensure_nested_scope("g").unwrap();

    assert!(g1.is_child_of(&g0));
    g0.set("y", 5).unwrap();
    assert_eq!(g1.get_scalar("y"), Some(json!(5)));
    assert!(s1.ensure_nested_scope("g").unwrap().ptr_eq(&g1));
}

/// Tenet: the first read of an inherited structural key materializes the
/// same wrapper that `ensure_nested_scope` later returns.
#[test]
fn read_then_ensure_share_wrapper() {
    let s0 = Scope::new();
    s0.ensure_nested_scope("g").unwrap();
    let s1 = Scope::child(&s0);

    let read = s1.get("g").unwrap();
    let ensured = s1.ensure_nested_scope("g").unwrap();
    assert_eq!(read, Value::Scope(ensured));
}

/// Tenet: a structural key defined by an ancestor cannot be overwritten by
/// a scalar anywhere below it.
#[test]
fn override_of_inherited_scope_is_rejected() {
    let s0 = Scope::new();
    s0.ensure_nested_scope("g").unwrap();
    let s1 = Scope::child(&s0);

    let err = s1.set("g", 42).unwrap_err();
    assert_eq!(err.existing(), StructuralKind::Scope);
    assert_eq!(err.to_string(), "cannot override nested scope at key 'g'");
    assert!(s1.get("g").unwrap().is_structural());
}

/// Tenet: the rejection also holds for lists and for the defining scope.
#[test]
fn override_of_list_is_rejected() {
    let base = base_presenter_configuration();
    let derived = Scope::child(&base);

    assert!(base.set("fields", "id").is_err());
    let err = derived.set("fields", json!(["id"])).unwrap_err();
    assert_eq!(err.existing(), StructuralKind::List);
}

/// Tenet: deeply nested structure cascades level by level.
#[test]
fn nested_scopes_cascade_recursively() {
    let base = Scope::new();
    let paging = base.ensure_nested_scope("options").unwrap().ensure_nested_scope("paging").unwrap();
    paging.set("per_page", 20).unwrap();

    let derived = Scope::child(&base);
    let derived_paging = derived
        .ensure_nested_scope("options")
        .unwrap()
        .ensure_nested_scope("paging")
        .unwrap();
    derived_paging.set("max", 100).unwrap();
    paging.set("per_page", 25).unwrap();

    assert_eq!(derived_paging.get_scalar("per_page"), Some(json!(25)));
    assert!(paging.get("max").is_none());
}

/// Tenet: keys are the union across the chain, and enumeration materializes
/// every structural value.
#[test]
fn keys_and_enumeration() {
    let base = base_presenter_configuration();
    let derived = Scope::child(&base);
    derived.set("title", "posts").unwrap();
    derived.set("brand", "blog").unwrap();

    let keys: Vec<_> = derived.keys().into_iter().collect();
    assert_eq!(keys, vec!["title", "filters", "fields", "brand"]);

    let pairs = derived.iter();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[0].1, Value::scalar("posts"));
    assert_eq!(derived.local_keys(), vec!["title", "brand", "filters", "fields"]);
}

/// Tenet: an empty root is empty until its first write.
#[test]
fn empty_root_scope() {
    let scope = Scope::new();
    assert!(scope.is_empty());
    scope.set("x", 1).unwrap();
    assert!(!scope.is_empty());
}

fn expected_at(sets: &[Option<i64>], level: usize) -> Option<i64> {
    sets[..=level].iter().rev().find_map(|value| *value)
}

proptest! {
    /// Every level resolves to the value of the nearest ancestor (inclusive)
    /// that set the key.
    #[test]
    fn prop_nearest_ancestor_resolution(
        sets in prop::collection::vec(prop::option::of(any::<i64>()), 1..8)
    ) {
        let chain = scope_chain(sets.len() - 1);
        for (scope, value) in chain.iter().zip(&sets) {
            if let Some(value) = value {
                scope.set("k", *value).unwrap();
            }
        }

        for level in 0..sets.len() {
            let expected = expected_at(&sets, level).map(|v| json!(v));
            prop_assert_eq!(chain[level].get_scalar("k"), expected);
        }
    }

    /// Keys seen from the leaf are exactly the union of keys set anywhere.
    #[test]
    fn prop_keys_are_union(
        per_level in prop::collection::vec(prop::collection::vec("[a-e]", 0..4), 1..5)
    ) {
        let chain = scope_chain(per_level.len() - 1);
        let mut all = std::collections::BTreeSet::new();
        for (scope, keys) in chain.iter().zip(&per_level) {
            for key in keys {
                scope.set(key.as_str(), 1).unwrap();
                all.insert(key.clone());
            }
        }

        let leaf_keys: std::collections::BTreeSet<_> =
            chain.last().unwrap().keys().into_iter().collect();
        prop_assert_eq!(leaf_keys, all);
    }
}
