use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::Reflect;
use crate::info::ClassInfo;

/// A shared handle to a mapped object.
///
/// Related entities are shared between the objects pointing at them, so the
/// handle is reference counted. Two handles are equal only if they point to
/// the same instance.
///
/// # Examples
///
/// ```
/// use om_reflect::value::ObjectRef;
/// # use om_reflect::{ClassInfoCell, Typed, info::ClassInfo};
/// # struct User;
/// # impl Typed for User {
/// #     fn class_info() -> &'static ClassInfo {
/// #         static CELL: ClassInfoCell = ClassInfoCell::new();
/// #         CELL.get_or_init(|| ClassInfo::new::<Self>("User"))
/// #     }
/// # }
///
/// let user = ObjectRef::new(User);
/// assert_eq!(user.class_name(), "User");
/// assert!(user.ptr_eq(&user.clone()));
/// assert!(!user.ptr_eq(&ObjectRef::new(User)));
/// assert!(user.downcast_arc::<User>().is_some());
/// ```
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Reflect>);

impl ObjectRef {
    /// Moves `value` into a new shared handle.
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wraps an existing shared object.
    #[inline]
    pub fn from_arc(object: Arc<dyn Reflect>) -> Self {
        Self(object)
    }

    /// Returns the class table of the referenced object.
    #[inline]
    pub fn class_info(&self) -> &'static ClassInfo {
        self.0.reflect_class_info()
    }

    /// Returns the class name of the referenced object.
    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.class_info().name()
    }

    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        &*self.0
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Returns a typed shared handle if the object is a `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.0).into_any_arc().downcast::<T>().ok()
    }

    /// Returns `true` if both handles point to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    /// The address of the referenced instance, stable while it is alive.
    #[inline]
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl<T: Reflect> From<Arc<T>> for ObjectRef {
    #[inline]
    fn from(value: Arc<T>) -> Self {
        Self(value)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.class_name(), self.addr())
    }
}
