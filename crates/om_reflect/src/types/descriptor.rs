use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::types::BuiltinType;

/// A normalized description of an expected value shape.
///
/// Build descriptors with the constructors, which keep two invariants:
///
/// - [`Nullable`](Self::Nullable) wraps a non-nullable descriptor, and never
///   wraps `null` or `mixed`.
/// - [`Union`](Self::Union) and [`Intersection`](Self::Intersection) never
///   directly contain a descriptor of the same kind, and have at least two
///   distinct members.
///
/// # Examples
///
/// ```
/// use om_reflect::types::{BuiltinType, TypeDescriptor};
///
/// let int = TypeDescriptor::builtin(BuiltinType::Int);
/// let nullable = TypeDescriptor::nullable(TypeDescriptor::nullable(int.clone()));
/// assert_eq!(nullable.to_string(), "?int");
///
/// let union = TypeDescriptor::union([
///     int.clone(),
///     TypeDescriptor::union([TypeDescriptor::builtin(BuiltinType::String), int]),
///     TypeDescriptor::builtin(BuiltinType::Null),
/// ]);
/// assert_eq!(union.to_string(), "int|string|null");
/// assert!(union.allows_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A builtin other than `array` and `iterable`.
    Builtin(BuiltinType),
    Array,
    Iterable,
    /// An instance of the named class.
    Object(String),
    /// A case of the named enumeration.
    Enum(String),
    Nullable(Box<TypeDescriptor>),
    Union(Vec<TypeDescriptor>),
    Intersection(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    /// The descriptor of a builtin; `array` and `iterable` get their own variants.
    pub const fn builtin(builtin: BuiltinType) -> Self {
        match builtin {
            BuiltinType::Array => Self::Array,
            BuiltinType::Iterable => Self::Iterable,
            other => Self::Builtin(other),
        }
    }

    #[inline]
    pub fn object(class: impl Into<String>) -> Self {
        Self::Object(class.into())
    }

    #[inline]
    pub fn enumeration(class: impl Into<String>) -> Self {
        Self::Enum(class.into())
    }

    /// Makes `inner` accept `null`.
    pub fn nullable(inner: Self) -> Self {
        match inner {
            Self::Nullable(_) | Self::Builtin(BuiltinType::Null | BuiltinType::Mixed) => inner,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Builds a union, flattening nested unions.
    ///
    /// `null` members (and nullable members) make the result nullable
    /// instead of being kept as members. Duplicates are removed; a single
    /// remaining member is returned as is.
    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        let mut nullable = false;
        for member in members {
            push_union_member(&mut flat, &mut nullable, member);
        }

        let inner = match flat.len() {
            0 => return Self::Builtin(BuiltinType::Null),
            1 => flat.pop().unwrap_or(Self::Builtin(BuiltinType::Null)),
            _ => Self::Union(flat),
        };
        if nullable {
            Self::nullable(inner)
        } else {
            inner
        }
    }

    /// Builds an intersection, flattening nested intersections.
    pub fn intersection(members: impl IntoIterator<Item = Self>) -> Self {
        let mut flat: Vec<Self> = Vec::new();
        for member in members {
            match member {
                Self::Intersection(nested) => {
                    for inner in nested {
                        if !flat.contains(&inner) {
                            flat.push(inner);
                        }
                    }
                }
                other => {
                    if !flat.contains(&other) {
                        flat.push(other);
                    }
                }
            }
        }

        if flat.len() == 1 {
            flat.pop().unwrap_or(Self::Builtin(BuiltinType::Never))
        } else {
            Self::Intersection(flat)
        }
    }

    /// Returns `true` if `null` is an accepted value.
    pub fn allows_null(&self) -> bool {
        match self {
            Self::Nullable(_) | Self::Builtin(BuiltinType::Null | BuiltinType::Mixed) => true,
            Self::Union(members) => members.iter().any(Self::allows_null),
            _ => false,
        }
    }

    /// Strips a [`Nullable`](Self::Nullable) wrapper.
    pub fn non_null(&self) -> &Self {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Returns the class of an object or enum descriptor, looking through `Nullable`.
    pub fn class_name(&self) -> Option<&str> {
        match self.non_null() {
            Self::Object(class) | Self::Enum(class) => Some(class),
            _ => None,
        }
    }

    /// Returns `true` for `array` or `iterable`, looking through `Nullable`.
    pub fn is_collection(&self) -> bool {
        matches!(self.non_null(), Self::Array | Self::Iterable)
    }
}

fn push_union_member(flat: &mut Vec<TypeDescriptor>, nullable: &mut bool, member: TypeDescriptor) {
    match member {
        TypeDescriptor::Union(nested) => {
            for inner in nested {
                push_union_member(flat, nullable, inner);
            }
        }
        TypeDescriptor::Nullable(inner) => {
            *nullable = true;
            push_union_member(flat, nullable, *inner);
        }
        TypeDescriptor::Builtin(BuiltinType::Null) => *nullable = true,
        other => {
            if !flat.contains(&other) {
                flat.push(other);
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => f.write_str(builtin.as_str()),
            Self::Array => f.write_str("array"),
            Self::Iterable => f.write_str("iterable"),
            Self::Object(class) | Self::Enum(class) => f.write_str(class),
            Self::Nullable(inner) => match &**inner {
                Self::Union(_) => write!(f, "{inner}|null"),
                Self::Intersection(_) => write!(f, "({inner})|null"),
                _ => write!(f, "?{inner}"),
            },
            Self::Union(members) => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str("|")?;
                    }
                    match member {
                        Self::Intersection(_) => write!(f, "({member})")?,
                        _ => write!(f, "{member}")?,
                    }
                }
                Ok(())
            }
            Self::Intersection(members) => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str("&")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeDescriptor;
    use crate::types::BuiltinType;

    fn int() -> TypeDescriptor {
        TypeDescriptor::builtin(BuiltinType::Int)
    }

    #[test]
    fn nullable_never_double_wraps() {
        let once = TypeDescriptor::nullable(int());
        assert_eq!(TypeDescriptor::nullable(once.clone()), once);

        let mixed = TypeDescriptor::builtin(BuiltinType::Mixed);
        assert_eq!(TypeDescriptor::nullable(mixed.clone()), mixed);
    }

    #[test]
    fn union_flattens_and_extracts_null() {
        let union = TypeDescriptor::union([
            TypeDescriptor::nullable(int()),
            TypeDescriptor::union([TypeDescriptor::object("User"), int()]),
        ]);

        assert_eq!(
            union,
            TypeDescriptor::nullable(TypeDescriptor::Union(vec![
                int(),
                TypeDescriptor::object("User"),
            ]))
        );
        assert_eq!(union.to_string(), "int|User|null");
    }

    #[test]
    fn union_collapses_single_member() {
        let single = TypeDescriptor::union([int(), TypeDescriptor::builtin(BuiltinType::Null)]);
        assert_eq!(single, TypeDescriptor::nullable(int()));
        assert_eq!(single.to_string(), "?int");
    }

    #[test]
    fn intersection_flattens() {
        let a = TypeDescriptor::object("A");
        let b = TypeDescriptor::object("B");
        let nested = TypeDescriptor::intersection([
            a.clone(),
            TypeDescriptor::intersection([b.clone(), a.clone()]),
        ]);
        assert_eq!(nested, TypeDescriptor::Intersection(vec![a.clone(), b]));
        assert_eq!(TypeDescriptor::intersection([a.clone()]), a);
    }

    #[test]
    fn class_name_looks_through_nullable() {
        let user = TypeDescriptor::nullable(TypeDescriptor::enumeration("Status"));
        assert_eq!(user.class_name(), Some("Status"));
        assert!(TypeDescriptor::nullable(TypeDescriptor::Array).is_collection());
    }
}
