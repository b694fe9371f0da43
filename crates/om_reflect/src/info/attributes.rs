use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use om_utils::hash::{FixedHashState, HashMap};

// -----------------------------------------------------------------------------
// CustomAttributes

/// A collection of marker values attached to a class, field or method.
///
/// Attributes are stored by their [`TypeId`].
/// Because of this, there can only be one attribute per type.
///
/// # Example
///
/// ```
/// use om_reflect::info::{CustomAttributes, FieldInfo};
///
/// struct Indexed(bool);
///
/// let field = FieldInfo::new("email").with_attribute(Indexed(true));
/// assert!(field.has_attribute::<Indexed>());
/// assert!(field.get_attribute::<Indexed>().unwrap().0);
///
/// let attrs = FieldInfo::new("name").custom_attributes().len();
/// assert_eq!(attrs, 0);
/// ```
#[derive(Default)]
#[repr(transparent)]
pub struct CustomAttributes {
    attributes: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl CustomAttributes {
    /// A static reference to an empty [`CustomAttributes`].
    ///
    /// Infos store custom attributes as `Option<Arc<..>>` to avoid heap
    /// allocations when there are no attributes.
    pub(crate) const EMPTY: &'static Self = &Self::new();

    /// Creates an empty [`CustomAttributes`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            attributes: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Adds an attribute.
    ///
    /// Later insertions for the same type overwrite earlier values.
    #[inline]
    pub fn with_attribute<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    /// Inserts an attribute, returning `true` if it replaced one of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> bool {
        self.attributes
            .insert(TypeId::of::<T>(), Box::new(value))
            .is_some()
    }

    /// Returns `true` if an attribute of type `T` is present.
    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.attributes.contains_key(&TypeId::of::<T>())
    }

    /// Returns the attribute of type `T`, if present.
    #[inline]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.attributes
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Debug for CustomAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAttributes")
            .field("len", &self.attributes.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implement `custom_attributes`, `with_attribute` and the typed lookups.
macro_rules! impl_custom_attributes_fn {
    ($field:ident) => {
        /// Returns the attached custom attributes.
        #[inline]
        pub fn custom_attributes(&self) -> &$crate::info::CustomAttributes {
            match &self.$field {
                Some(ptr) => &**ptr,
                None => $crate::info::CustomAttributes::EMPTY,
            }
        }

        /// Attaches a marker value, replacing one of the same type.
        pub fn with_attribute<A: ::core::any::Any + Send + Sync>(mut self, value: A) -> Self {
            let mut attributes = match self.$field.take() {
                Some(ptr) => ::alloc::sync::Arc::try_unwrap(ptr).unwrap_or_default(),
                None => $crate::info::CustomAttributes::new(),
            };
            attributes.insert(value);
            self.$field = Some(::alloc::sync::Arc::new(attributes));
            self
        }

        /// Returns the attribute of type `A`, if present.
        #[inline]
        pub fn get_attribute<A: ::core::any::Any>(&self) -> Option<&A> {
            self.custom_attributes().get::<A>()
        }

        /// Returns `true` if it contains the given attribute type.
        #[inline]
        pub fn has_attribute<A: ::core::any::Any>(&self) -> bool {
            self.custom_attributes().contains::<A>()
        }
    };
}

pub(super) use impl_custom_attributes_fn;

#[cfg(test)]
mod tests {
    use super::CustomAttributes;

    struct Label(&'static str);

    #[test]
    fn attributes_are_keyed_by_type() {
        let mut attributes = CustomAttributes::new().with_attribute(Label("a"));
        assert!(attributes.insert(Label("b")));
        assert!(!attributes.insert(7_u32));

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.get::<Label>().map(|label| label.0), Some("b"));
        assert_eq!(attributes.get::<u32>(), Some(&7));
        assert!(!attributes.contains::<i32>());
    }
}
