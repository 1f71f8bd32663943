//! Member registry for named hierarchies
//!
//! Provides [`HierarchyRegistry`], which associates exactly one [`Scope`] with
//! each declared member. A member's scope is derived from its parent member's
//! scope on first access and cached for the registry's lifetime.

use cascade_config::Scope;
use dashmap::DashMap;

/// Errors for hierarchy operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// Member was never declared
    #[error("unknown member: '{0}'")]
    UnknownMember(String),

    /// Parent must be declared before its children
    #[error("unknown parent '{parent}' for member '{member}'")]
    UnknownParent {
        /// Member being declared
        member: String,
        /// Parent it names
        parent: String,
    },

    /// Member already declared under a different parent
    #[error("member '{member}' already declared with parent {existing:?}, not {requested:?}")]
    ConflictingParent {
        /// Member being declared
        member: String,
        /// Parent recorded by the first declaration
        existing: Option<String>,
        /// Parent named by the rejected declaration
        requested: Option<String>,
    },
}

/// Registry mapping hierarchy members to their configuration scopes
///
/// Members are declared root-first: a parent must exist before any child
/// names it, so the hierarchy is acyclic by construction.
///
/// # Example
/// ```
/// use cascade_hierarchy::HierarchyRegistry;
/// use serde_json::json;
///
/// let registry = HierarchyRegistry::new();
/// registry.declare_root("Presenter").unwrap();
/// registry.declare("PostPresenter", "Presenter").unwrap();
///
/// let base = registry.configuration("Presenter").unwrap();
/// base.set("per_page", 20).unwrap();
///
/// let posts = registry.configuration("PostPresenter").unwrap();
/// assert_eq!(posts.get_scalar("per_page"), Some(json!(20)));
/// ```
#[derive(Debug, Default)]
pub struct HierarchyRegistry {
    /// member -> parent member (None for roots)
    parents: DashMap<String, Option<String>>,

    /// member -> configuration, filled on first access
    configurations: DashMap<String, Scope>,
}

impl HierarchyRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a member without a parent
    ///
    /// # Errors
    /// Returns [`HierarchyError::ConflictingParent`] if `member` already has a parent.
    pub fn declare_root(&self, member: impl Into<String>) -> Result<(), HierarchyError> {
        self.record(member.into(), None)
    }

    /// Declare `member` as a child of `parent`
    ///
    /// Re-declaring a member with the same parent is a no-op.
    ///
    /// # Errors
    /// - [`HierarchyError::UnknownParent`] if `parent` is not declared yet
    /// - [`HierarchyError::ConflictingParent`] if `member` has another parent
    pub fn declare(
        &self,
        member: impl Into<String>,
        parent: impl Into<String>,
    ) -> Result<(), HierarchyError> {
        let member = member.into();
        let parent = parent.into();
        if !self.parents.contains_key(&parent) {
            return Err(HierarchyError::UnknownParent { member, parent });
        }
        self.record(member, Some(parent))
    }

    fn record(&self, member: String, parent: Option<String>) -> Result<(), HierarchyError> {
        let existing = self.parents.entry(member.clone()).or_insert_with(|| parent.clone());
        if *existing == parent {
            Ok(())
        } else {
            Err(HierarchyError::ConflictingParent {
                member,
                existing: existing.value().clone(),
                requested: parent,
            })
        }
    }

    /// Check if member is declared
    #[inline]
    #[must_use]
    pub fn contains(&self, member: &str) -> bool {
        self.parents.contains_key(member)
    }

    /// Parent of `member`, or `None` for roots
    ///
    /// # Errors
    /// Returns [`HierarchyError::UnknownMember`] if `member` is not declared.
    pub fn parent_of(&self, member: &str) -> Result<Option<String>, HierarchyError> {
        self.parents
            .get(member)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| HierarchyError::UnknownMember(member.to_owned()))
    }

    /// Chain from `member` up to its root, inclusive
    ///
    /// # Errors
    /// Returns [`HierarchyError::UnknownMember`] if `member` is not declared.
    pub fn ancestors(&self, member: &str) -> Result<Vec<String>, HierarchyError> {
        let mut chain = vec![member.to_owned()];
        let mut next = self.parent_of(member)?;
        while let Some(parent) = next {
            next = self.parent_of(&parent)?;
            chain.push(parent);
        }
        Ok(chain)
    }

    /// Configuration scope for `member`
    ///
    /// Derived from the parent member's configuration on first access, then
    /// cached: every later call returns the same scope.
    ///
    /// # Errors
    /// Returns [`HierarchyError::UnknownMember`] if `member` is not declared.
    pub fn configuration(&self, member: &str) -> Result<Scope, HierarchyError> {
        if let Some(scope) = self.configurations.get(member).map(|entry| entry.value().clone()) {
            return Ok(scope);
        }

        let scope = match self.parent_of(member)? {
            Some(parent) => Scope::child(&self.configuration(&parent)?),
            None => Scope::new(),
        };
        tracing::debug!(member, "deriving member configuration");

        Ok(self
            .configurations
            .entry(member.to_owned())
            .or_insert(scope)
            .value()
            .clone())
    }

    /// Number of declared members
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Check if no member is declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
