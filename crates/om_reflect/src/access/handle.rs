use alloc::vec;

use crate::Reflect;
use crate::access::AccessError;
use crate::info::{FieldInfo, MethodInfo, ReflectedType};
use crate::value::Value;

/// A resolved way to read or write one attribute.
///
/// Handles point into `'static` class tables, so they are `Copy` and can be
/// cached for the lifetime of the process.
#[derive(Debug, Clone, Copy)]
pub enum MemberHandle {
    /// A public field.
    Field(&'static FieldInfo),
    /// An accessor method found with `prefix`.
    Accessor {
        method: &'static MethodInfo,
        prefix: &'static str,
    },
    /// A mutator method found with `prefix`.
    Mutator {
        method: &'static MethodInfo,
        prefix: &'static str,
    },
}

impl MemberHandle {
    /// Returns the field or method name behind the handle.
    pub const fn member_name(&self) -> &'static str {
        match *self {
            Self::Field(field) => field.name(),
            Self::Accessor { method, .. } | Self::Mutator { method, .. } => method.name(),
        }
    }

    /// Returns the probe prefix of a method handle.
    pub const fn prefix(&self) -> Option<&'static str> {
        match *self {
            Self::Field(_) => None,
            Self::Accessor { prefix, .. } | Self::Mutator { prefix, .. } => Some(prefix),
        }
    }

    #[inline]
    pub const fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    /// Returns the declared type relevant to the handle:
    /// the field type, the accessor return type or the mutator's first parameter type.
    pub fn declared_type(&self) -> Option<&'static ReflectedType> {
        match *self {
            Self::Field(field) => field.declared_type(),
            Self::Accessor { method, .. } => method.return_type(),
            Self::Mutator { method, .. } => method.params().first()?.declared_type(),
        }
    }

    /// Returns `true` if writing `null` through this handle must be skipped.
    ///
    /// Unrecognized declarations never reject.
    pub fn rejects_null(&self) -> bool {
        match self {
            Self::Accessor { .. } => false,
            Self::Field(_) | Self::Mutator { .. } => self
                .declared_type()
                .is_some_and(|ty| !matches!(ty, ReflectedType::Other(_)) && !ty.allows_null()),
        }
    }

    /// Reads the attribute.
    pub fn read(&self, object: &dyn Reflect) -> Result<Value, AccessError> {
        match self {
            Self::Field(field) => field.read(object),
            Self::Accessor { method, .. } => method.call_ref(object, &[]),
            Self::Mutator { method, .. } => Err(AccessError::WrongDirection {
                class: object.class_name(),
                member: method.name(),
            }),
        }
    }

    /// Writes the attribute.
    pub fn write(&self, object: &mut dyn Reflect, value: Value) -> Result<(), AccessError> {
        match self {
            Self::Field(field) => field.write(object, value),
            Self::Mutator { method, .. } => method.call_mut(object, vec![value]).map(drop),
            Self::Accessor { method, .. } => Err(AccessError::WrongDirection {
                class: object.class_name(),
                member: method.name(),
            }),
        }
    }
}

impl PartialEq for MemberHandle {
    /// Handles are equal if they point at the same table entry.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => core::ptr::eq(*a, *b),
            (
                Self::Accessor { method: a, prefix: p },
                Self::Accessor { method: b, prefix: q },
            )
            | (
                Self::Mutator { method: a, prefix: p },
                Self::Mutator { method: b, prefix: q },
            ) => core::ptr::eq(*a, *b) && p == q,
            _ => false,
        }
    }
}

impl Eq for MemberHandle {}
