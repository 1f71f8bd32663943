//! Testing utilities for Cascade workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use cascade_config::{AppendList, Scalar, Scope};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Linear chain `root -> ... -> leaf` of `depth + 1` scopes, root first.
pub fn scope_chain(depth: usize) -> Vec<Scope> {
    let mut chain = vec![Scope::new()];
    for _ in 0..depth {
        let next = chain.last().map_or_else(Scope::new, Scope::child);
        chain.push(next);
    }
    chain
}

/// Base presenter-style configuration: a title, a `filters` scope and a
/// `fields` list.
pub fn base_presenter_configuration() -> Scope {
    let scope = Scope::new();
    scope.set("title", "base").unwrap();

    let filters = scope.ensure_nested_scope("filters").unwrap();
    filters.set("published", true).unwrap();

    scope.ensure_nested_list("fields").unwrap().extend(["id", "created_at"]);
    scope
}

/// Current contents of a list as JSON strings, for readable comparisons.
pub fn string_contents(list: &AppendList) -> Vec<String> {
    list.contents()
        .into_iter()
        .map(|item| match item {
            Scalar::String(text) => text,
            other => other.to_string(),
        })
        .collect()
}
