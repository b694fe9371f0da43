use alloc::sync::Arc;
use core::fmt;

use crate::access::AccessError;
use crate::info::{CustomAttributes, ReflectedType, impl_custom_attributes_fn};
use crate::value::{FromValue, Value};
use crate::{Reflect, Typed};

// -----------------------------------------------------------------------------
// Visibility

/// Who may see a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Who may assign a field.
///
/// A field can be publicly readable while only its own class (or its
/// subclasses) may write it. Anything narrower than [`WriteScope::Public`] is
/// read-only to external callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum WriteScope {
    #[default]
    Public,
    Protected,
    Private,
}

// -----------------------------------------------------------------------------
// Closures

pub(crate) type GetterFn = Arc<dyn Fn(&dyn Reflect) -> Result<Value, AccessError> + Send + Sync>;
pub(crate) type SetterFn =
    Arc<dyn Fn(&mut dyn Reflect, Value) -> Result<(), AccessError> + Send + Sync>;

/// Wraps a typed getter into a type-erased one.
pub(crate) fn erase_getter<T, F>(f: F) -> GetterFn
where
    T: Typed,
    F: Fn(&T) -> Value + Send + Sync + 'static,
{
    Arc::new(move |object: &dyn Reflect| {
        let object = object
            .downcast_ref::<T>()
            .ok_or_else(|| AccessError::type_mismatch::<T>(object))?;
        Ok(f(object))
    })
}

/// Wraps a typed setter into a type-erased one, converting the value first.
pub(crate) fn erase_setter<T, V, F>(f: F) -> SetterFn
where
    T: Typed,
    V: FromValue,
    F: Fn(&mut T, V) + Send + Sync + 'static,
{
    Arc::new(move |object: &mut dyn Reflect, value: Value| {
        let found = object.class_name();
        let object = object
            .downcast_mut::<T>()
            .ok_or_else(|| AccessError::TypeMismatch {
                expected: T::class_info().name(),
                found,
            })?;
        f(object, V::from_value(value)?);
        Ok(())
    })
}

// -----------------------------------------------------------------------------
// FieldInfo

/// Information for a declared field of a class.
///
/// Only public fields are reachable directly, and only through the getter and
/// setter closures registered here. Protected fields are listed so that the
/// mapper can discover the attribute name, they must be reached through
/// accessor/mutator methods.
///
/// # Examples
///
/// ```
/// use om_reflect::info::{FieldInfo, Visibility, WriteScope};
///
/// let id = FieldInfo::new("id").with_type("int").read_only();
/// assert_eq!(id.visibility(), Visibility::Public);
/// assert_eq!(id.write_scope(), WriteScope::Private);
/// assert_eq!(id.declared_type().unwrap().to_string(), "int");
///
/// let secret = FieldInfo::new("secret").protected();
/// assert_eq!(secret.visibility(), Visibility::Protected);
/// assert!(!secret.is_readable());
/// ```
#[derive(Clone)]
pub struct FieldInfo {
    name: &'static str,
    visibility: Visibility,
    write_scope: WriteScope,
    is_static: bool,
    declaring_class: Option<&'static str>,
    ty: Option<ReflectedType>,
    default: Option<Value>,
    getter: Option<GetterFn>,
    setter: Option<SetterFn>,
    // Use `Option` to reduce unnecessary heap requests (when empty content).
    custom_attributes: Option<Arc<CustomAttributes>>,
}

impl FieldInfo {
    impl_custom_attributes_fn!(custom_attributes);

    /// Creates a public, publicly writable instance field without a declared type.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            visibility: Visibility::Public,
            write_scope: WriteScope::Public,
            is_static: false,
            declaring_class: None,
            ty: None,
            default: None,
            getter: None,
            setter: None,
            custom_attributes: None,
        }
    }

    /// Narrows the visibility to protected; writes are narrowed alongside.
    pub fn protected(mut self) -> Self {
        self.visibility = Visibility::Protected;
        self.write_scope = self.write_scope.max(WriteScope::Protected);
        self
    }

    /// Narrows the visibility to private; writes are narrowed alongside.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self.write_scope = WriteScope::Private;
        self
    }

    /// Restricts writes to the declaring class.
    #[inline]
    pub fn read_only(self) -> Self {
        self.with_write_scope(WriteScope::Private)
    }

    #[inline]
    pub fn with_write_scope(mut self, scope: WriteScope) -> Self {
        self.write_scope = scope;
        self
    }

    /// Marks the field as static (class-level).
    #[inline]
    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Sets the declared (settable) type.
    #[inline]
    pub fn with_type(mut self, ty: impl Into<ReflectedType>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Sets the default value a fresh instance carries.
    #[inline]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the declaring class.
    ///
    /// [`ClassInfo::with_field`](crate::info::ClassInfo::with_field) fills it
    /// in when it is missing; set it for fields inherited from a parent class.
    #[inline]
    pub fn with_declaring_class(mut self, class: &'static str) -> Self {
        self.declaring_class = Some(class);
        self
    }

    /// Registers how to read the field from a `T`.
    pub fn with_getter<T, F>(mut self, f: F) -> Self
    where
        T: Typed,
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.getter = Some(erase_getter(f));
        self
    }

    /// Registers how to assign the field of a `T`.
    ///
    /// The incoming [`Value`] is converted with [`FromValue`] first; a
    /// conversion failure leaves the object untouched.
    pub fn with_setter<T, V, F>(mut self, f: F) -> Self
    where
        T: Typed,
        V: FromValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.setter = Some(erase_setter(f));
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn write_scope(&self) -> WriteScope {
        self.write_scope
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
    }

    #[inline]
    pub const fn declaring_class(&self) -> Option<&'static str> {
        self.declaring_class
    }

    /// Returns the declared (settable) type.
    #[inline]
    pub const fn declared_type(&self) -> Option<&ReflectedType> {
        self.ty.as_ref()
    }

    /// Returns the default value of a fresh instance.
    #[inline]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns `true` if external callers can read the field directly.
    pub fn is_readable(&self) -> bool {
        self.is_public() && !self.is_static && self.getter.is_some()
    }

    /// Returns `true` if external callers can assign the field directly.
    pub fn is_writable(&self) -> bool {
        self.is_public()
            && matches!(self.write_scope, WriteScope::Public)
            && !self.is_static
            && self.setter.is_some()
    }

    /// Reads the field from `object`.
    pub fn read(&self, object: &dyn Reflect) -> Result<Value, AccessError> {
        match &self.getter {
            Some(getter) if self.is_readable() => getter(object),
            _ => Err(AccessError::NotReadable {
                class: object.class_name(),
                field: self.name,
            }),
        }
    }

    /// Assigns the field of `object`.
    pub fn write(&self, object: &mut dyn Reflect, value: Value) -> Result<(), AccessError> {
        match &self.setter {
            Some(setter) if self.is_writable() => setter(object, value),
            _ => Err(AccessError::NotWritable {
                class: object.class_name(),
                field: self.name,
            }),
        }
    }

    pub(crate) fn set_declaring_class_if_missing(&mut self, class: &'static str) {
        self.declaring_class.get_or_insert(class);
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("write_scope", &self.write_scope)
            .field("is_static", &self.is_static)
            .field("declaring_class", &self.declaring_class)
            .field("ty", &self.ty)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}
