//! Type-directed coercion of input values.
//!
//! Before a plain attribute is written, its expected type (see
//! [`AttributeTypeExtractor`](crate::extractor::AttributeTypeExtractor)) is
//! handed to a [`ValueCoercer`] together with the raw input. A failure skips
//! only that attribute.

use alloc::string::ToString;

use om_reflect::registry::ClassRegistry;
use om_reflect::types::{BuiltinType, TypeDescriptor};
use om_reflect::value::{Value, ValueKind};

use crate::error::CoerceError;

/// Converts an input value to the shape a type expects.
pub trait ValueCoercer: Send + Sync {
    /// Coerces `value` to `ty`; `registry` answers class compatibility.
    fn coerce(
        &self,
        ty: &TypeDescriptor,
        value: Value,
        registry: &ClassRegistry,
    ) -> Result<Value, CoerceError>;
}

/// The default coercion rules.
///
/// - `mixed` accepts anything; `null` passes where the type allows it.
/// - Unions try their members in order; intersections apply every member.
/// - Integers widen to `float`.
/// - `array` accepts lists and maps; `iterable` also collections.
/// - Object and enum types accept objects of a compatible class and pass
///   non-object values through untouched.
/// - The lenient variant also parses numeric and boolean strings, as text
///   formats deliver every scalar as a string.
///
/// # Examples
///
/// ```
/// use om_mapper::coerce::{DefaultCoercer, ValueCoercer};
/// use om_reflect::registry::ClassRegistry;
/// use om_reflect::types::{BuiltinType, TypeDescriptor};
/// use om_reflect::value::Value;
///
/// let registry = ClassRegistry::new();
/// let float = TypeDescriptor::builtin(BuiltinType::Float);
///
/// assert_eq!(DefaultCoercer::new().coerce(&float, Value::from(2), &registry), Ok(Value::from(2.0)));
/// assert!(DefaultCoercer::new().coerce(&float, Value::from("2.5"), &registry).is_err());
/// assert_eq!(
///     DefaultCoercer::lenient().coerce(&float, Value::from("2.5"), &registry),
///     Ok(Value::from(2.5)),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCoercer {
    lenient: bool,
}

impl DefaultCoercer {
    #[inline]
    pub const fn new() -> Self {
        Self { lenient: false }
    }

    /// A coercer that also parses numeric and boolean strings.
    #[inline]
    pub const fn lenient() -> Self {
        Self { lenient: true }
    }

    #[inline]
    pub const fn is_lenient(&self) -> bool {
        self.lenient
    }

    fn builtin(&self, ty: &TypeDescriptor, builtin: BuiltinType, value: Value) -> Result<Value, CoerceError> {
        let unparsable = || CoerceError::Mismatch {
            expected: ty.to_string(),
            found: ValueKind::String,
        };
        match (builtin, value) {
            (BuiltinType::Mixed, value) => Ok(value),
            (BuiltinType::Int, value @ Value::Int(_)) => Ok(value),
            (BuiltinType::Float, value @ Value::Float(_)) => Ok(value),
            (BuiltinType::Float, Value::Int(int)) => Ok(Value::Float(int as f64)),
            (BuiltinType::String, value @ Value::String(_)) => Ok(value),
            (BuiltinType::Bool, value @ Value::Bool(_)) => Ok(value),
            (BuiltinType::True, value @ Value::Bool(true)) => Ok(value),
            (BuiltinType::False, value @ Value::Bool(false)) => Ok(value),
            (BuiltinType::Object, value @ (Value::Object(_) | Value::Map(_))) => Ok(value),
            (BuiltinType::Int, Value::String(text)) if self.lenient => {
                text.trim().parse::<i64>().map(Value::Int).map_err(|_| unparsable())
            }
            (BuiltinType::Float, Value::String(text)) if self.lenient => {
                text.trim().parse::<f64>().map(Value::Float).map_err(|_| unparsable())
            }
            (BuiltinType::Bool, Value::String(text)) if self.lenient => {
                parse_bool(&text).map(Value::Bool).ok_or_else(unparsable)
            }
            (_, value) => Err(mismatch(ty, &value)),
        }
    }
}

impl ValueCoercer for DefaultCoercer {
    fn coerce(
        &self,
        ty: &TypeDescriptor,
        value: Value,
        registry: &ClassRegistry,
    ) -> Result<Value, CoerceError> {
        if value.is_null() {
            return if ty.allows_null() {
                Ok(Value::Null)
            } else {
                Err(mismatch(ty, &value))
            };
        }

        match ty {
            TypeDescriptor::Nullable(inner) => self.coerce(inner, value, registry),
            TypeDescriptor::Union(members) => {
                for member in members {
                    if let Ok(coerced) = self.coerce(member, value.clone(), registry) {
                        return Ok(coerced);
                    }
                }
                Err(mismatch(ty, &value))
            }
            TypeDescriptor::Intersection(members) => members
                .iter()
                .try_fold(value, |value, member| self.coerce(member, value, registry)),
            TypeDescriptor::Builtin(builtin) => self.builtin(ty, *builtin, value),
            TypeDescriptor::Array => match value {
                Value::List(_) | Value::Map(_) => Ok(value),
                other => Err(mismatch(ty, &other)),
            },
            TypeDescriptor::Iterable => match value {
                Value::List(_) | Value::Map(_) | Value::Collection(_) => Ok(value),
                other => Err(mismatch(ty, &other)),
            },
            TypeDescriptor::Object(class) | TypeDescriptor::Enum(class) => match value {
                Value::Object(object) if registry.is_subclass_of(object.class_name(), class) => {
                    Ok(Value::Object(object))
                }
                Value::Object(object) => Err(CoerceError::UnexpectedClass {
                    expected: class.clone(),
                    found: object.class_name(),
                }),
                other => Ok(other),
            },
        }
    }
}

fn mismatch(ty: &TypeDescriptor, value: &Value) -> CoerceError {
    CoerceError::Mismatch {
        expected: ty.to_string(),
        found: value.kind(),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "1" | "true" | "TRUE" | "True" => Some(true),
        "0" | "false" | "FALSE" | "False" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultCoercer, ValueCoercer};
    use crate::error::CoerceError;
    use om_reflect::registry::ClassRegistry;
    use om_reflect::types::{BuiltinType, TypeDescriptor};
    use om_reflect::value::{Collection, Value, ValueKind};

    fn builtin(builtin: BuiltinType) -> TypeDescriptor {
        TypeDescriptor::builtin(builtin)
    }

    #[test]
    fn null_follows_nullability() {
        let registry = ClassRegistry::new();
        let coercer = DefaultCoercer::new();

        let nullable = TypeDescriptor::nullable(builtin(BuiltinType::Int));
        assert_eq!(coercer.coerce(&nullable, Value::Null, &registry), Ok(Value::Null));
        assert_eq!(
            coercer.coerce(&builtin(BuiltinType::Int), Value::Null, &registry),
            Err(CoerceError::Mismatch {
                expected: "int".into(),
                found: ValueKind::Null,
            })
        );
        assert_eq!(
            coercer.coerce(&builtin(BuiltinType::Mixed), Value::Null, &registry),
            Ok(Value::Null)
        );
    }

    #[test]
    fn union_tries_members_in_order() {
        let registry = ClassRegistry::new();
        let coercer = DefaultCoercer::new();
        let union = TypeDescriptor::union([builtin(BuiltinType::Int), builtin(BuiltinType::String)]);

        assert_eq!(coercer.coerce(&union, Value::from(4), &registry), Ok(Value::from(4)));
        assert_eq!(coercer.coerce(&union, Value::from("a"), &registry), Ok(Value::from("a")));
        assert!(coercer.coerce(&union, Value::from(true), &registry).is_err());
    }

    #[test]
    fn collections_shapes() {
        let registry = ClassRegistry::new();
        let coercer = DefaultCoercer::new();
        let list = Value::from(vec![1, 2]);

        assert_eq!(coercer.coerce(&TypeDescriptor::Array, list.clone(), &registry), Ok(list));
        assert!(coercer
            .coerce(&TypeDescriptor::Array, Value::Collection(Collection::new()), &registry)
            .is_err());
        assert!(coercer
            .coerce(&TypeDescriptor::Iterable, Value::Collection(Collection::new()), &registry)
            .is_ok());
        assert!(coercer.coerce(&TypeDescriptor::Array, Value::from(1), &registry).is_err());
    }

    #[test]
    fn lenient_parses_strings() {
        let registry = ClassRegistry::new();
        let strict = DefaultCoercer::new();
        let lenient = DefaultCoercer::lenient();
        let int = builtin(BuiltinType::Int);
        let boolean = builtin(BuiltinType::Bool);

        assert!(strict.coerce(&int, Value::from("12"), &registry).is_err());
        assert_eq!(lenient.coerce(&int, Value::from(" 12 "), &registry), Ok(Value::from(12)));
        assert!(lenient.coerce(&int, Value::from("twelve"), &registry).is_err());
        assert_eq!(lenient.coerce(&boolean, Value::from("0"), &registry), Ok(Value::from(false)));
    }

    #[test]
    fn object_types_pass_scalars_through() {
        let registry = ClassRegistry::new();
        let coercer = DefaultCoercer::new();
        let user = TypeDescriptor::object("User");

        assert_eq!(coercer.coerce(&user, Value::from(5), &registry), Ok(Value::from(5)));
    }
}
