//! Inheritable configuration scopes
//!
//! Provides [`Scope`], a node in a configuration chain. Reads fall back
//! through the parent chain:
//!
//! - Scalars are virtual: they are re-read from the nearest ancestor on every
//!   lookup until this scope sets its own value.
//! - Structural values (nested scopes, append lists) are materialized once on
//!   first read into a local wrapper that keeps delegating to the ancestor's
//!   live value.
//!
//! Structural keys can be extended but never replaced.

use crate::append_list::AppendList;
use crate::error::StructuralOverrideError;
use crate::value::{Scalar, Value};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Node in a configuration inheritance chain
///
/// Handles are cheap to clone and share the same underlying node. A parent
/// may be shared by any number of children and never references them back.
///
/// # Invariants
/// - The parent is fixed at construction, so chains are acyclic
/// - Once a key resolves to a nested scope or append list, no scalar write
///   at this scope or any descendant may replace it
/// - An inherited structural value is wrapped, never copied
///
/// # Example
/// ```
/// use cascade_config::Scope;
/// use serde_json::json;
///
/// let base = Scope::new();
/// base.set("per_page", 20).unwrap();
/// let derived = Scope::child(&base);
///
/// assert_eq!(derived.get_scalar("per_page"), Some(json!(20)));
/// base.set("per_page", 50).unwrap();
/// assert_eq!(derived.get_scalar("per_page"), Some(json!(50)));
/// ```
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeNode>,
}

struct ScopeNode {
    parent: Option<Scope>,
    local: RwLock<IndexMap<String, Value>>,
}

impl Scope {
    /// Create root scope
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    /// Create scope inheriting from `parent`
    #[inline]
    #[must_use]
    pub fn child(parent: &Scope) -> Self {
        Self::with_parent(Some(parent.clone()))
    }

    fn with_parent(parent: Option<Scope>) -> Self {
        Self {
            inner: Arc::new(ScopeNode {
                parent,
                local: RwLock::new(IndexMap::new()),
            }),
        }
    }

    /// Parent scope, if any
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Scope> {
        self.inner.parent.as_ref()
    }

    /// True if `parent` is this scope's immediate parent
    #[must_use]
    pub fn is_child_of(&self, parent: &Scope) -> bool {
        self.parent().is_some_and(|own_parent| own_parent.ptr_eq(parent))
    }

    /// True if both handles refer to the same scope
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolve `key` through the chain
    ///
    /// Returns `None` when neither this scope nor any ancestor holds the key.
    /// An inherited nested scope or append list is wrapped in a local child
    /// and stored, so repeated reads return the same handle. Inherited scalars
    /// are returned without being stored.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let cached = self.inner.local.read().get(key).cloned();
        if cached.is_some() {
            return cached;
        }

        match self.parent()?.get(key)? {
            Value::Scope(inherited) => Some(self.materialize(key, || {
                Value::Scope(Scope::child(&inherited))
            })),
            Value::List(inherited) => Some(self.materialize(key, || {
                Value::List(AppendList::child(&inherited))
            })),
            scalar @ Value::Scalar(_) => Some(scalar),
        }
    }

    fn materialize(&self, key: &str, wrap: impl FnOnce() -> Value) -> Value {
        self.inner
            .local
            .write()
            .entry(key.to_owned())
            .or_insert_with(|| {
                tracing::trace!(key, "materializing inherited structural value");
                wrap()
            })
            .clone()
    }

    /// Resolve `key` and return it only if it is a scalar
    #[must_use]
    pub fn get_scalar(&self, key: &str) -> Option<Scalar> {
        self.get(key).and_then(Value::into_scalar)
    }

    /// True if `key` resolves to a value
    ///
    /// Materializes the key if it is an inherited structural value.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store a scalar under `key`, shadowing every ancestor
    ///
    /// # Errors
    /// Returns [`StructuralOverrideError`] if `key` already resolves, locally
    /// or through an ancestor, to a nested scope or append list.
    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Result<(), StructuralOverrideError> {
        let key = key.into();
        if let Some(existing) = self.get(&key).and_then(|v| v.structural_kind()) {
            tracing::debug!(key = %key, %existing, "rejecting structural override");
            return Err(StructuralOverrideError::new(key, existing));
        }

        self.inner.local.write().insert(key, Value::Scalar(value.into()));
        Ok(())
    }

    /// Nested scope under `key`, created if needed
    ///
    /// Reuses the local nested scope, or wraps one inherited from an ancestor.
    /// Otherwise a fresh parentless scope is stored, shadowing any scalar the
    /// key held. Calling this twice returns the same handle.
    ///
    /// # Errors
    /// Returns [`StructuralOverrideError`] if `key` resolves to an append list.
    pub fn ensure_nested_scope(
        &self,
        key: impl Into<String>,
    ) -> Result<Scope, StructuralOverrideError> {
        self.ensure_structural(key.into(), Scope::new, Value::Scope, |value| {
            value.as_scope().cloned()
        })
    }

    /// Append list under `key`, created if needed
    ///
    /// Same resolution as [`ensure_nested_scope`](Self::ensure_nested_scope),
    /// for append lists.
    ///
    /// # Errors
    /// Returns [`StructuralOverrideError`] if `key` resolves to a nested scope.
    pub fn ensure_nested_list(
        &self,
        key: impl Into<String>,
    ) -> Result<AppendList, StructuralOverrideError> {
        self.ensure_structural(key.into(), AppendList::new, Value::List, |value| {
            value.as_list().cloned()
        })
    }

    fn ensure_structural<T: Clone>(
        &self,
        key: String,
        fresh: fn() -> T,
        wrap: fn(T) -> Value,
        extract: fn(&Value) -> Option<T>,
    ) -> Result<T, StructuralOverrideError> {
        // Wraps an inherited structural value locally, if there is one.
        let _ = self.get(&key);

        let mut local = self.inner.local.write();
        if let Some(slot) = local.get(&key) {
            if let Some(found) = extract(slot) {
                return Ok(found);
            }
            if let Some(existing) = slot.structural_kind() {
                return Err(StructuralOverrideError::new(key, existing));
            }
            tracing::debug!(key = %key, "shadowing scalar with structural value");
        }

        let created = fresh();
        local.insert(key, wrap(created.clone()));
        Ok(created)
    }

    /// Keys stored directly on this scope, in insertion order
    #[must_use]
    pub fn local_keys(&self) -> Vec<String> {
        self.inner.local.read().keys().cloned().collect()
    }

    /// Every key visible from this scope
    ///
    /// Ancestor keys come first (root-most first), followed by local keys not
    /// already seen.
    #[must_use]
    pub fn keys(&self) -> IndexSet<String> {
        let mut keys = self.parent().map(Scope::keys).unwrap_or_default();
        keys.extend(self.inner.local.read().keys().cloned());
        keys
    }

    /// Call `f` with every key and its resolved value
    ///
    /// Every inherited structural value is materialized along the way.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&str, Value),
    {
        for key in self.keys() {
            if let Some(value) = self.get(&key) {
                f(&key, value);
            }
        }
    }

    /// Resolved `(key, value)` pairs in [`keys`](Self::keys) order
    #[must_use]
    pub fn iter(&self) -> Vec<(String, Value)> {
        let mut pairs = Vec::new();
        self.each(|key, value| pairs.push((key.to_owned(), value)));
        pairs
    }

    /// Number of visible keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// True if no key is visible from this scope
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let local_empty = self.inner.local.read().is_empty();
        local_empty && self.parent().map_or(true, Scope::is_empty)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Scope {}

impl Debug for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("local_keys", &self.local_keys())
            .field("has_parent", &self.inner.parent.is_some())
            .finish()
    }
}
