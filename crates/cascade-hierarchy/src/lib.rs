//! Cascade Hierarchy
//!
//! Associates one configuration [`Scope`](cascade_config::Scope) with each
//! member of a named hierarchy (for example a family of presenter or model
//! definitions). A member's configuration inherits from its parent member's
//! configuration, derived lazily on first access.
//!
//! # Example
//!
//! ```rust
//! use cascade_hierarchy::HierarchyRegistry;
//!
//! let registry = HierarchyRegistry::new();
//! registry.declare_root("Presenter").unwrap();
//! registry.declare("PostPresenter", "Presenter").unwrap();
//!
//! let base = registry.configuration("Presenter").unwrap();
//! base.ensure_nested_list("fields").unwrap().append("id");
//!
//! let posts = registry.configuration("PostPresenter").unwrap();
//! assert_eq!(posts.ensure_nested_list("fields").unwrap().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod registry;

pub use registry::{HierarchyError, HierarchyRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
