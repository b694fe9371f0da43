use alloc::sync::Arc;
use core::any::Any;
use std::sync::OnceLock;

use crate::info::ClassInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the class table of a mapped type.
///
/// The table is usually built once, on first access, inside a
/// [`ClassInfoCell`].
///
/// # Examples
///
/// ```
/// use om_reflect::{ClassInfoCell, Typed, info::{ClassInfo, FieldInfo}};
///
/// struct Tag {
///     pub label: String,
/// }
///
/// impl Typed for Tag {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::new::<Self>("Tag").with_field(
///                 FieldInfo::new("label")
///                     .with_getter(|tag: &Tag| tag.label.clone().into())
///                     .with_setter(|tag: &mut Tag, label: String| tag.label = label),
///             )
///         })
///     }
/// }
///
/// assert_eq!(Tag::class_info().name(), "Tag");
/// assert!(Tag::class_info().field("label").is_some());
/// ```
pub trait Typed: Any + Send + Sync {
    /// Returns the class table of this type.
    ///
    /// Note: Use [`Reflect::reflect_class_info`] for dynamic dispatch.
    fn class_info() -> &'static ClassInfo;
}

// -----------------------------------------------------------------------------
// Reflect

/// An object-safe view of a mapped instance.
///
/// Auto impl for all types that implemented [`Typed`], so a `&dyn Reflect`
/// can always report the class it was built from.
///
/// Note that [`Any::type_id`] on a `Box<dyn Reflect>` returns the container's
/// type ID; use the `downcast_*` helpers on `dyn Reflect` instead.
pub trait Reflect: Any + Send + Sync {
    /// Returns the class table of the runtime type.
    fn reflect_class_info(&self) -> &'static ClassInfo;

    /// Casts this type to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Casts this type to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Casts a shared instance to `Arc<dyn Any>`, enabling [`Arc::downcast`].
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Typed> Reflect for T {
    #[inline]
    fn reflect_class_info(&self) -> &'static ClassInfo {
        T::class_info()
    }

    #[inline(always)]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline(always)]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline(always)]
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl dyn Reflect {
    /// Returns the class name of the runtime type.
    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.reflect_class_info().name()
    }

    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

// -----------------------------------------------------------------------------
// ClassInfoCell

/// Container for static storage of a class table.
///
/// Internally, there is an [`OnceLock<ClassInfo>`], almost no additional expenses.
///
/// See the example on [`Typed`].
pub struct ClassInfoCell(OnceLock<ClassInfo>);

impl ClassInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the `ClassInfo` stored in the cell.
    ///
    /// If the cell is empty, the table is generated from the given function.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &ClassInfo
    where
        F: FnOnce() -> ClassInfo,
    {
        self.0.get_or_init(f)
    }
}
