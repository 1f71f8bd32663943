//! Cascade Configuration
//!
//! Hierarchical, lazily-resolving key/value configuration for families of
//! related definitions.
//!
//! # Core Concepts
//!
//! - [`Scope`]: A node in a configuration chain. Scalars are looked up live
//!   through the parent chain; nested scopes and lists are materialized once
//!   as local wrappers around the inherited value.
//! - [`AppendList`]: Append-only list whose contents are its parent's current
//!   contents followed by its own items.
//! - [`Value`]: What a key resolves to (scalar, scope, or list).
//! - [`StructuralOverrideError`]: Raised when a write would replace a
//!   structural value.
//!
//! # Example
//!
//! ```rust
//! use cascade_config::Scope;
//! use serde_json::json;
//!
//! let base = Scope::new();
//! base.ensure_nested_list("fields").unwrap().append("id");
//!
//! let derived = Scope::child(&base);
//! derived.ensure_nested_list("fields").unwrap().append("title");
//!
//! let fields = derived.ensure_nested_list("fields").unwrap();
//! assert_eq!(fields.contents(), vec![json!("id"), json!("title")]);
//! assert!(derived.set("fields", "flat").is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod append_list;
pub mod error;
pub mod loader;
pub mod scope;
pub mod value;

// Re-exports
pub use append_list::AppendList;
pub use error::{ConfigError, ConfigResult, StructuralKind, StructuralOverrideError};
pub use scope::Scope;
pub use value::{Scalar, Value};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with configuration scopes
    pub use crate::{
        AppendList, ConfigError, ConfigResult, Scalar, Scope, StructuralKind,
        StructuralOverrideError, Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_scope_and_list_cascade() {
        let base = Scope::new();
        let filters = base.ensure_nested_scope("filters").unwrap();
        filters.set("published", true).unwrap();
        base.ensure_nested_list("fields").unwrap().append("id");

        let derived = Scope::child(&base);
        let derived_filters = derived.ensure_nested_scope("filters").unwrap();
        derived_filters.set("author", "me").unwrap();
        derived.ensure_nested_list("fields").unwrap().append("title");

        assert_eq!(derived_filters.get_scalar("published"), Some(json!(true)));
        assert!(filters.get("author").is_none());

        let fields = derived.get("fields").and_then(|v| v.as_list().cloned()).unwrap();
        assert_eq!(fields.contents(), vec![json!("id"), json!("title")]);
        assert_eq!(base.ensure_nested_list("fields").unwrap().len(), 1);
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
