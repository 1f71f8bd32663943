//! Value model stored under scope keys
//!
//! A key resolves to one of three variants: a plain [`Scalar`], a nested
//! [`Scope`], or an [`AppendList`]. Scalars compare by value, structural
//! handles compare by identity.

use crate::append_list::AppendList;
use crate::error::StructuralKind;
use crate::scope::Scope;

/// Leaf data stored under a key
///
/// Arrays and objects held in a scalar are opaque values, not structural
/// ones: they are replaced wholesale by [`Scope::set`], never extended.
pub type Scalar = serde_json::Value;

/// Resolved value of a scope key
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain value, re-read from the nearest ancestor unless set locally
    Scalar(Scalar),

    /// Nested scope, materialized once per scope
    Scope(Scope),

    /// Append-only list, materialized once per scope
    List(AppendList),
}

impl Value {
    /// Wrap anything convertible to a scalar
    #[inline]
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::Scalar(value.into())
    }

    /// Scalar payload, if this is a scalar
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Nested scope handle, if this is a scope
    #[inline]
    #[must_use]
    pub fn as_scope(&self) -> Option<&Scope> {
        match self {
            Self::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    /// Append list handle, if this is a list
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&AppendList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Consume into the scalar payload
    #[inline]
    #[must_use]
    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Structural kind, or `None` for scalars
    #[inline]
    #[must_use]
    pub fn structural_kind(&self) -> Option<StructuralKind> {
        match self {
            Self::Scalar(_) => None,
            Self::Scope(_) => Some(StructuralKind::Scope),
            Self::List(_) => Some(StructuralKind::List),
        }
    }

    /// True for nested scopes and append lists
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        self.structural_kind().is_some()
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Scope> for Value {
    fn from(scope: Scope) -> Self {
        Self::Scope(scope)
    }
}

impl From<AppendList> for Value {
    fn from(list: AppendList) -> Self {
        Self::List(list)
    }
}
