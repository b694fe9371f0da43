use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use thiserror::Error;

use super::{Collection, ObjectRef, Value, ValueKind, ValueMap};
use crate::Typed;

// -----------------------------------------------------------------------------
// ValueError

/// A [`Value`] could not be converted into the requested Rust type.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected a {expected} value, found {found}")]
    Mismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("integer {value} is out of range for `{target}`")]
    OutOfRange { value: i64, target: &'static str },

    #[error("expected an instance of `{expected}`, found `{found}`")]
    UnexpectedClass {
        expected: &'static str,
        found: &'static str,
    },
}

impl ValueError {
    #[inline]
    pub const fn mismatch(expected: ValueKind, found: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: found.kind(),
        }
    }
}

// -----------------------------------------------------------------------------
// FromValue

/// Fallible conversion out of a [`Value`].
///
/// Setter closures registered with
/// [`FieldInfo::with_setter`](crate::info::FieldInfo::with_setter) convert the
/// incoming value through this trait.
///
/// # Examples
///
/// ```
/// use om_reflect::value::{FromValue, Value, ValueError, ValueKind};
///
/// assert_eq!(i32::from_value(Value::from(7)), Ok(7));
/// assert_eq!(f64::from_value(Value::from(7)), Ok(7.0));
/// assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
/// assert_eq!(
///     bool::from_value(Value::from("yes")),
///     Err(ValueError::Mismatch { expected: ValueKind::Bool, found: ValueKind::String }),
/// );
/// ```
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(value) => Ok(value),
            other => Err(ValueError::mismatch(ValueKind::Bool, &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Int(value) => Ok(value),
            other => Err(ValueError::mismatch(ValueKind::Int, &other)),
        }
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    let value = i64::from_value(value)?;
                    <$ty>::try_from(value).map_err(|_| ValueError::OutOfRange {
                        value,
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        value
            .as_f64()
            .ok_or_else(|| ValueError::mismatch(ValueKind::Float, &value))
    }
}

impl FromValue for f32 {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        f64::from_value(value).map(|value| value as f32)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::String(value) => Ok(value),
            other => Err(ValueError::mismatch(ValueKind::String, &other)),
        }
    }
}

impl FromValue for ValueMap {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(ValueError::mismatch(ValueKind::Map, &other)),
        }
    }
}

impl FromValue for ObjectRef {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(ValueError::mismatch(ValueKind::Object, &other)),
        }
    }
}

impl FromValue for Collection {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Collection(collection) => Ok(collection),
            other => Err(ValueError::mismatch(ValueKind::Collection, &other)),
        }
    }
}

impl<T: Typed> FromValue for Arc<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        let object = ObjectRef::from_value(value)?;
        object
            .downcast_arc::<T>()
            .ok_or_else(|| ValueError::UnexpectedClass {
                expected: T::class_info().name(),
                found: object.class_name(),
            })
    }
}

/// `null` converts to `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Accepts lists, maps (their values) and collections (their members).
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            value @ (Value::List(_) | Value::Map(_) | Value::Collection(_)) => {
                value.into_sequence().into_iter().map(T::from_value).collect()
            }
            other => Err(ValueError::mismatch(ValueKind::List, &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// IntoValue

/// Infallible conversion into a [`Value`].
///
/// Implemented for everything that is `Into<Value>`; getter closures return
/// through this trait.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl<T: Into<Value>> IntoValue for T {
    #[inline]
    fn into_value(self) -> Value {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::{FromValue, ValueError};
    use crate::value::{Value, ValueKind};

    #[test]
    fn integer_range_is_checked() {
        assert_eq!(u8::from_value(Value::from(255)), Ok(255));
        assert_eq!(
            u8::from_value(Value::from(256)),
            Err(ValueError::OutOfRange {
                value: 256,
                target: "u8"
            })
        );
        assert!(u32::from_value(Value::from(-1)).is_err());
    }

    #[test]
    fn sequences_convert_element_wise() {
        let value = Value::from(vec![Value::from(3), Value::from(7)]);
        assert_eq!(Vec::<i64>::from_value(value), Ok(vec![3, 7]));

        let mixed = Value::from(vec![Value::from(3), Value::from("x")]);
        assert_eq!(
            Vec::<i64>::from_value(mixed),
            Err(ValueError::Mismatch {
                expected: ValueKind::Int,
                found: ValueKind::String,
            })
        );
    }

    #[test]
    fn option_accepts_null() {
        assert_eq!(Option::<bool>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<bool>::from_value(Value::from(true)), Ok(Some(true)));
    }
}
