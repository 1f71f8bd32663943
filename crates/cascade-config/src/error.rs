//! Error types for configuration scopes
//!
//! Provides error handling for:
//! - Structural override attempts (replacing a nested scope or append list)
//! - Seed document parsing (JSON, YAML, TOML)

use std::fmt::{self, Display, Formatter};

/// Kind of structural value stored under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    /// A nested [`Scope`](crate::Scope)
    Scope,

    /// An [`AppendList`](crate::AppendList)
    List,
}

impl Display for StructuralKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scope => f.write_str("nested scope"),
            Self::List => f.write_str("append list"),
        }
    }
}

/// A write tried to replace a key that resolves to a structural value
///
/// Raised by [`Scope::set`](crate::Scope::set) whenever the key already
/// resolves, locally or through an ancestor, to a nested scope or an append
/// list. Structural keys can only be extended, never replaced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot override {existing} at key '{key}'")]
pub struct StructuralOverrideError {
    key: String,
    existing: StructuralKind,
}

impl StructuralOverrideError {
    /// Create error for `key` holding a structural value of kind `existing`
    #[inline]
    pub fn new(key: impl Into<String>, existing: StructuralKind) -> Self {
        Self {
            key: key.into(),
            existing,
        }
    }

    /// Key the write was aimed at
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Structural kind the key already resolves to
    #[inline]
    #[must_use]
    pub fn existing(&self) -> StructuralKind {
        self.existing
    }
}

/// Combined configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Structural value would have been replaced
    #[error(transparent)]
    Structural(#[from] StructuralOverrideError),

    /// Seed document is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Seed document is not valid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Seed document is not valid TOML
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Seed document root (or a nested scope entry) is not an object
    #[error("expected an object, got {0}")]
    NotAnObject(&'static str),
}

impl ConfigError {
    /// Check if error came from a rejected structural override
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
