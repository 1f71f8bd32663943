//! Chainable append-only lists
//!
//! Provides [`AppendList`], an ordered sequence whose logical contents are its
//! parent's current contents followed by the items appended locally.

use crate::value::Scalar;
use parking_lot::RwLock;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Append-only ordered list chained to an optional parent
///
/// Handles are cheap to clone and share the same underlying node.
///
/// # Invariants
/// - The parent is fixed at construction
/// - Local items are only ever appended, never removed or reordered
/// - [`contents`](Self::contents) is recomputed on every call, so items the
///   parent gains after this list was created remain visible
///
/// # Example
/// ```
/// use cascade_config::AppendList;
/// use serde_json::json;
///
/// let base = AppendList::new();
/// base.append(1);
/// let derived = AppendList::child(&base);
/// derived.append(2);
/// base.append(3);
///
/// assert_eq!(derived.contents(), vec![json!(1), json!(3), json!(2)]);
/// ```
#[derive(Clone)]
pub struct AppendList {
    inner: Arc<ListNode>,
}

struct ListNode {
    parent: Option<AppendList>,
    own: RwLock<Vec<Scalar>>,
}

impl AppendList {
    /// Create parentless list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    /// Create list that extends `parent`
    #[inline]
    #[must_use]
    pub fn child(parent: &AppendList) -> Self {
        Self::with_parent(Some(parent.clone()))
    }

    fn with_parent(parent: Option<AppendList>) -> Self {
        Self {
            inner: Arc::new(ListNode {
                parent,
                own: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Parent list, if any
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&AppendList> {
        self.inner.parent.as_ref()
    }

    /// True if `parent` is this list's immediate parent
    #[must_use]
    pub fn is_child_of(&self, parent: &AppendList) -> bool {
        self.parent().is_some_and(|own_parent| own_parent.ptr_eq(parent))
    }

    /// True if both handles refer to the same list
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &AppendList) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Append one item
    pub fn append(&self, item: impl Into<Scalar>) {
        self.inner.own.write().push(item.into());
    }

    /// Alias for [`append`](Self::append)
    #[inline]
    pub fn push(&self, item: impl Into<Scalar>) {
        self.append(item);
    }

    /// Append every item in order
    pub fn extend<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        self.inner.own.write().extend(items.into_iter().map(Into::into));
    }

    /// Parent contents (evaluated now) followed by local items
    #[must_use]
    pub fn contents(&self) -> Vec<Scalar> {
        let mut contents = self.parent().map(AppendList::contents).unwrap_or_default();
        contents.extend(self.inner.own.read().iter().cloned());
        contents
    }

    /// Items appended directly to this list
    #[must_use]
    pub fn own_items(&self) -> Vec<Scalar> {
        self.inner.own.read().clone()
    }

    /// Number of items in [`contents`](Self::contents)
    #[must_use]
    pub fn len(&self) -> usize {
        let inherited = self.parent().map_or(0, AppendList::len);
        inherited + self.inner.own.read().len()
    }

    /// True if [`contents`](Self::contents) is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if any item in [`contents`](Self::contents) equals `item`
    #[must_use]
    pub fn contains(&self, item: &Scalar) -> bool {
        let found_locally = self.inner.own.read().contains(item);
        found_locally || self.parent().is_some_and(|parent| parent.contains(item))
    }

    /// Iterate over a snapshot of [`contents`](Self::contents)
    pub fn iter(&self) -> impl Iterator<Item = Scalar> {
        self.contents().into_iter()
    }
}

impl Default for AppendList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AppendList {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for AppendList {}

impl Debug for AppendList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppendList")
            .field("own", &*self.inner.own.read())
            .field("has_parent", &self.inner.parent.is_some())
            .finish()
    }
}

impl<'a> IntoIterator for &'a AppendList {
    type Item = Scalar;
    type IntoIter = std::vec::IntoIter<Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents().into_iter()
    }
}
