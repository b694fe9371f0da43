use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::access::AccessError;
use crate::info::{CustomAttributes, ReflectedType, impl_custom_attributes_fn};
use crate::value::{FromValue, Value};
use crate::{Reflect, Typed};

// -----------------------------------------------------------------------------
// ParamInfo

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    name: &'static str,
    ty: Option<ReflectedType>,
    optional: bool,
}

impl ParamInfo {
    /// A required, untyped parameter.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            ty: None,
            optional: false,
        }
    }

    /// A required parameter with a declared type.
    #[inline]
    pub fn typed(name: &'static str, ty: impl Into<ReflectedType>) -> Self {
        Self::new(name).with_type(ty)
    }

    #[inline]
    pub fn with_type(mut self, ty: impl Into<ReflectedType>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Marks the parameter as having a default value.
    #[inline]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn declared_type(&self) -> Option<&ReflectedType> {
        self.ty.as_ref()
    }

    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

// -----------------------------------------------------------------------------
// MethodBody

pub(crate) type RefFn =
    Arc<dyn Fn(&dyn Reflect, &[Value]) -> Result<Value, AccessError> + Send + Sync>;
pub(crate) type MutFn =
    Arc<dyn Fn(&mut dyn Reflect, Vec<Value>) -> Result<Value, AccessError> + Send + Sync>;

/// How a method is invoked.
#[derive(Clone)]
pub enum MethodBody {
    /// An instance method reading through a shared reference.
    Ref(RefFn),
    /// An instance method that needs exclusive access.
    Mut(MutFn),
    /// A class-level method, never invoked by the mapper.
    Static,
}

/// The receiver kind of a [`MethodBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    Ref,
    Mut,
    Static,
}

impl MethodBody {
    #[inline]
    pub const fn receiver(&self) -> Receiver {
        match self {
            Self::Ref(_) => Receiver::Ref,
            Self::Mut(_) => Receiver::Mut,
            Self::Static => Receiver::Static,
        }
    }
}

// -----------------------------------------------------------------------------
// MethodInfo

/// Information for a method of a class.
///
/// Method names are matched case-insensitively by
/// [`ClassInfo::method`](crate::info::ClassInfo::method).
///
/// # Examples
///
/// ```
/// use om_reflect::{ClassInfoCell, Typed};
/// use om_reflect::info::{ClassInfo, MethodInfo, ParamInfo, Receiver};
/// use om_reflect::value::Value;
///
/// #[derive(Default)]
/// struct Counter {
///     count: i64,
/// }
///
/// impl Typed for Counter {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::new::<Self>("Counter")
///                 .with_method(
///                     MethodInfo::getter("getCount", |c: &Counter| c.count.into())
///                         .with_return_type("int"),
///                 )
///                 .with_method(MethodInfo::setter(
///                     "setCount",
///                     ParamInfo::typed("count", "int"),
///                     |c: &mut Counter, count: i64| c.count = count,
///                 ))
///         })
///     }
/// }
///
/// let info = Counter::class_info();
/// let setter = info.method("setcount").unwrap();
/// assert_eq!(setter.receiver(), Receiver::Mut);
///
/// let mut counter = Counter::default();
/// setter.call_mut(&mut counter, vec![Value::from(4)]).unwrap();
///
/// let getter = info.method("getCount").unwrap();
/// assert_eq!(getter.call_ref(&counter, &[]).unwrap(), Value::from(4));
/// ```
#[derive(Clone)]
pub struct MethodInfo {
    name: &'static str,
    declaring_class: Option<&'static str>,
    body: MethodBody,
    params: Vec<ParamInfo>,
    return_type: Option<ReflectedType>,
    // Use `Option` to reduce unnecessary heap requests (when empty content).
    custom_attributes: Option<Arc<CustomAttributes>>,
}

impl MethodInfo {
    impl_custom_attributes_fn!(custom_attributes);

    fn from_body(name: &'static str, body: MethodBody) -> Self {
        Self {
            name,
            declaring_class: None,
            body,
            params: Vec::new(),
            return_type: None,
            custom_attributes: None,
        }
    }

    /// An instance method taking `&self` and positional arguments.
    pub fn new_ref<T, F>(name: &'static str, f: F) -> Self
    where
        T: Typed,
        F: Fn(&T, &[Value]) -> Result<Value, AccessError> + Send + Sync + 'static,
    {
        let body: RefFn = Arc::new(move |object: &dyn Reflect, args: &[Value]| {
            let object = object
                .downcast_ref::<T>()
                .ok_or_else(|| AccessError::type_mismatch::<T>(object))?;
            f(object, args)
        });
        Self::from_body(name, MethodBody::Ref(body))
    }

    /// An instance method taking `&mut self` and positional arguments.
    pub fn new_mut<T, F>(name: &'static str, f: F) -> Self
    where
        T: Typed,
        F: Fn(&mut T, Vec<Value>) -> Result<Value, AccessError> + Send + Sync + 'static,
    {
        let body: MutFn = Arc::new(move |object: &mut dyn Reflect, args: Vec<Value>| {
            let found = object.class_name();
            let object = object
                .downcast_mut::<T>()
                .ok_or_else(|| AccessError::TypeMismatch {
                    expected: T::class_info().name(),
                    found,
                })?;
            f(object, args)
        });
        Self::from_body(name, MethodBody::Mut(body))
    }

    /// A static method. It is listed so that probes can skip it.
    pub fn new_static(name: &'static str) -> Self {
        Self::from_body(name, MethodBody::Static)
    }

    /// A zero-parameter accessor.
    pub fn getter<T, F>(name: &'static str, f: F) -> Self
    where
        T: Typed,
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Self::new_ref(name, move |object: &T, _: &[Value]| Ok(f(object)))
    }

    /// A one-parameter mutator; the argument is converted with [`FromValue`].
    pub fn setter<T, V, F>(name: &'static str, param: ParamInfo, f: F) -> Self
    where
        T: Typed,
        V: FromValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self::new_mut(name, move |object: &mut T, args: Vec<Value>| {
            let value = args.into_iter().next().unwrap_or_default();
            f(object, V::from_value(value)?);
            Ok(Value::Null)
        })
        .with_param(param)
    }

    /// Appends a declared parameter.
    #[inline]
    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    #[inline]
    pub fn with_return_type(mut self, ty: impl Into<ReflectedType>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    #[inline]
    pub fn with_declaring_class(mut self, class: &'static str) -> Self {
        self.declaring_class = Some(class);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn declaring_class(&self) -> Option<&'static str> {
        self.declaring_class
    }

    #[inline]
    pub const fn receiver(&self) -> Receiver {
        self.body.receiver()
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        matches!(self.body, MethodBody::Static)
    }

    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Returns the number of parameters without a default value.
    pub fn required_param_count(&self) -> usize {
        self.params.iter().filter(|param| !param.is_optional()).count()
    }

    #[inline]
    pub const fn return_type(&self) -> Option<&ReflectedType> {
        self.return_type.as_ref()
    }

    /// Invokes a `Ref` method.
    pub fn call_ref(&self, object: &dyn Reflect, args: &[Value]) -> Result<Value, AccessError> {
        match &self.body {
            MethodBody::Ref(f) => f(object, args),
            MethodBody::Mut(_) => Err(AccessError::NeedsExclusive {
                class: object.class_name(),
                method: self.name,
            }),
            MethodBody::Static => Err(AccessError::Static {
                class: object.class_name(),
                method: self.name,
            }),
        }
    }

    /// Invokes an instance method of either receiver kind.
    pub fn call_mut(&self, object: &mut dyn Reflect, args: Vec<Value>) -> Result<Value, AccessError> {
        match &self.body {
            MethodBody::Ref(f) => f(object, &args),
            MethodBody::Mut(f) => f(object, args),
            MethodBody::Static => Err(AccessError::Static {
                class: object.class_name(),
                method: self.name,
            }),
        }
    }

    pub(crate) fn set_declaring_class_if_missing(&mut self, class: &'static str) {
        self.declaring_class.get_or_insert(class);
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("declaring_class", &self.declaring_class)
            .field("receiver", &self.receiver())
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}
