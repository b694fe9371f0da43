use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use super::ObjectRef;

/// A shared, interior-mutable list of related objects.
///
/// Cloning a collection clones the handle, not the members: a getter that
/// returns its entity's collection hands out the live list, and the mapper
/// rewrites it in place when denormalizing a `many` relationship.
///
/// Members keep their insertion order.
#[derive(Clone, Default)]
pub struct Collection(Arc<RwLock<Vec<ObjectRef>>>);

impl Collection {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the current members.
    pub fn values(&self) -> Vec<ObjectRef> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the members that are instances of `T`.
    pub fn members<T: Any + Send + Sync>(&self) -> Vec<Arc<T>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(ObjectRef::downcast_arc::<T>)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every member.
    pub fn clear(&self) {
        self.0.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Appends a member.
    pub fn push(&self, object: impl Into<ObjectRef>) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(object.into());
    }

    /// Returns `true` if `object` is a member, compared by identity.
    pub fn contains(&self, object: &ObjectRef) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|member| member.ptr_eq(object))
    }

    /// Returns `true` if both handles share the same list.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns `true` if both collections hold the same instances in the same order.
    pub fn same_members(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let lhs = self.values();
        let rhs = other.values();
        lhs.len() == rhs.len() && lhs.iter().zip(&rhs).all(|(a, b)| a.ptr_eq(b))
    }
}

impl FromIterator<ObjectRef> for Collection {
    fn from_iter<I: IntoIterator<Item = ObjectRef>>(iter: I) -> Self {
        Self(Arc::new(RwLock::new(iter.into_iter().collect())))
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}
