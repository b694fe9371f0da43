//! The dynamic value model.
//!
//! ## Menu
//!
//! - [`Value`]: an attribute value or a node of a flat external representation.
//! - [`ValueMap`]: an insertion-ordered `String -> Value` map.
//! - [`ValueKind`]: the runtime kind of a [`Value`].
//! - [`ObjectRef`]: a shared handle to a mapped object.
//! - [`Collection`]: a shared, interior-mutable list of related objects.
//! - [`FromValue`]: fallible conversion out of a [`Value`], reporting [`ValueError`].
//! - [`IntoValue`]: infallible conversion into a [`Value`].

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod convert;
mod object;

// -----------------------------------------------------------------------------
// Exports

pub use collection::Collection;
pub use convert::{FromValue, IntoValue, ValueError};
pub use object::ObjectRef;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use om_utils::IndexMap;

use crate::Reflect;

/// An insertion-ordered map of attribute names to values.
pub type ValueMap = IndexMap<String, Value>;

// -----------------------------------------------------------------------------
// ValueKind

/// The runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Map,
    Object,
    Collection,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Bool => f.pad("bool"),
            Self::Int => f.pad("int"),
            Self::Float => f.pad("float"),
            Self::String => f.pad("string"),
            Self::List => f.pad("list"),
            Self::Map => f.pad("map"),
            Self::Object => f.pad("object"),
            Self::Collection => f.pad("collection"),
        }
    }
}

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed attribute value.
///
/// Scalars, lists and maps form the flat external representation.
/// [`Object`](Value::Object) and [`Collection`](Value::Collection) only appear
/// while a value is still attached to the object graph, e.g. a related entity
/// returned by an accessor.
///
/// # Examples
///
/// ```
/// use om_reflect::value::{Value, ValueKind};
///
/// let value = Value::from(vec![Value::from(3), Value::from(7)]);
/// assert_eq!(value.kind(), ValueKind::List);
/// assert!(!value.is_empty());
/// assert!(Value::from("").is_empty());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(ValueMap),
    Object(ObjectRef),
    Collection(Collection),
}

impl Value {
    /// Returns the runtime kind.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Object(_) => ValueKind::Object,
            Self::Collection(_) => ValueKind::Collection,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value counts as "empty".
    ///
    /// Empty values are `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty
    /// lists, maps and collections. A `one` relationship receiving an empty
    /// value is cleared instead of looked up.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(value) => !*value,
            Self::Int(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::String(value) => value.is_empty() || value == "0",
            Self::List(list) => list.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Object(_) => false,
            Self::Collection(collection) => collection.is_empty(),
        }
    }

    /// Coerces the value into a sequence.
    ///
    /// - list: itself
    /// - map: its values, in order
    /// - collection: its members as objects
    /// - null: an empty sequence
    /// - anything else: a one-element sequence
    pub fn into_sequence(self) -> Vec<Value> {
        match self {
            Self::Null => Vec::new(),
            Self::List(list) => list,
            Self::Map(map) => map.into_values().collect(),
            Self::Collection(collection) => {
                collection.values().into_iter().map(Value::Object).collect()
            }
            other => alloc::vec![other],
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as `f64`, widening integers.
    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Returns `true` if the value is a scalar (`bool`, `int`, `float` or `string`).
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }
}

// -----------------------------------------------------------------------------
// Equality

/// Objects compare by identity, collections compare member identities in order.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Collection(a), Self::Collection(b)) => a.same_members(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Self::String(value) => f.debug_tuple("String").field(value).finish(),
            Self::List(list) => f.debug_list().entries(list).finish(),
            Self::Map(map) => f.debug_map().entries(map).finish(),
            Self::Object(object) => fmt::Debug::fmt(object, f),
            Self::Collection(collection) => fmt::Debug::fmt(collection, f),
        }
    }
}

// -----------------------------------------------------------------------------
// From

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident as $inner:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(<$inner>::from(value))
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => String as String,
    &str => String as String,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<ValueMap> for Value {
    #[inline]
    fn from(value: ValueMap) -> Self {
        Self::Map(value)
    }
}

impl From<ObjectRef> for Value {
    #[inline]
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl From<Collection> for Value {
    #[inline]
    fn from(value: Collection) -> Self {
        Self::Collection(value)
    }
}

impl<T: Reflect> From<Arc<T>> for Value {
    #[inline]
    fn from(value: Arc<T>) -> Self {
        Self::Object(ObjectRef::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, ValueKind, ValueMap};

    #[test]
    fn emptiness_follows_loose_rules() {
        for empty in [
            Value::Null,
            Value::from(false),
            Value::from(0),
            Value::from(0.0),
            Value::from(""),
            Value::from("0"),
            Value::List(Vec::new()),
            Value::Map(ValueMap::default()),
        ] {
            assert!(empty.is_empty(), "{empty:?} should be empty");
        }

        for filled in [Value::from(true), Value::from(7), Value::from("00")] {
            assert!(!filled.is_empty(), "{filled:?} should not be empty");
        }
    }

    #[test]
    fn into_sequence() {
        assert_eq!(Value::Null.into_sequence(), Vec::<Value>::new());
        assert_eq!(Value::from(4).into_sequence(), vec![Value::from(4)]);

        let mut map = ValueMap::default();
        map.insert("b".into(), Value::from(2));
        map.insert("a".into(), Value::from(1));
        assert_eq!(
            Value::Map(map).into_sequence(),
            vec![Value::from(2), Value::from(1)]
        );
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")).kind(), ValueKind::String);
    }
}
