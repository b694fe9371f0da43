use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::types::BuiltinType;

// -----------------------------------------------------------------------------
// ReflectedType

/// A declared type exactly as a class table states it.
///
/// This is the input of the [`TypeResolver`](crate::types::TypeResolver).
/// Declarations are usually written as strings and parsed:
///
/// | declaration        | shape |
/// |--------------------|-------|
/// | `"int"`            | `Named { name: "int", builtin: true, allows_null: false }` |
/// | `"?User"`          | `Named { name: "User", builtin: false, allows_null: true }` |
/// | `"User\|null"`     | same as `"?User"` |
/// | `"int\|string"`    | `Union([int, string])` |
/// | `"A&B"`            | `Intersection([A, B])` |
/// | `"(A&B)\|null"`    | `Union([Intersection([A, B]), null])` |
///
/// Anything that is not a valid declaration becomes [`Other`](Self::Other).
///
/// # Examples
///
/// ```
/// use om_reflect::info::ReflectedType;
///
/// let ty = ReflectedType::parse("?int");
/// assert!(ty.allows_null());
/// assert_eq!(ty.to_string(), "?int");
///
/// let ty = ReflectedType::parse("int|string|null");
/// assert!(matches!(ty, ReflectedType::Union(ref members) if members.len() == 3));
///
/// assert!(matches!(ReflectedType::parse("int|"), ReflectedType::Other(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectedType {
    /// A single identifier: a builtin, a class name or `self`/`static`/`parent`.
    Named {
        name: Cow<'static, str>,
        builtin: bool,
        allows_null: bool,
    },
    Union(Vec<ReflectedType>),
    Intersection(Vec<ReflectedType>),
    /// A shape the resolver does not recognize.
    Other(Cow<'static, str>),
}

impl ReflectedType {
    /// A non-nullable builtin type.
    ///
    /// `null` and `mixed` always allow null.
    pub fn builtin(builtin: BuiltinType) -> Self {
        Self::Named {
            name: Cow::Borrowed(builtin.as_str()),
            builtin: true,
            allows_null: matches!(builtin, BuiltinType::Null | BuiltinType::Mixed),
        }
    }

    /// A non-nullable class type, or a contextual keyword.
    pub fn class(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named {
            name: name.into(),
            builtin: false,
            allows_null: false,
        }
    }

    /// Marks a named type as nullable. Other shapes are returned unchanged.
    pub fn or_null(self) -> Self {
        match self {
            Self::Named { name, builtin, .. } => Self::Named {
                name,
                builtin,
                allows_null: true,
            },
            other => other,
        }
    }

    /// Returns `true` if `null` is an accepted value.
    pub fn allows_null(&self) -> bool {
        match self {
            Self::Named { allows_null, .. } => *allows_null,
            Self::Union(members) => members.iter().any(Self::allows_null),
            Self::Intersection(_) | Self::Other(_) => false,
        }
    }

    /// Returns the identifier of a named type.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Parses a declaration string.
    pub fn parse(declaration: &str) -> Self {
        parse_declaration(declaration.trim())
            .unwrap_or_else(|| Self::Other(Cow::Owned(String::from(declaration))))
    }
}

impl From<BuiltinType> for ReflectedType {
    #[inline]
    fn from(value: BuiltinType) -> Self {
        Self::builtin(value)
    }
}

impl From<&str> for ReflectedType {
    #[inline]
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for ReflectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named {
                name, allows_null, ..
            } => {
                if *allows_null && name != "null" && name != "mixed" {
                    f.write_str("?")?;
                }
                f.write_str(name)
            }
            Self::Union(members) => write_joined(f, members, "|"),
            Self::Intersection(members) => write_joined(f, members, "&"),
            Self::Other(description) => f.write_str(description),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[ReflectedType], sep: &str) -> fmt::Result {
    for (index, member) in members.iter().enumerate() {
        if index > 0 {
            f.write_str(sep)?;
        }
        match member {
            ReflectedType::Union(_) | ReflectedType::Intersection(_) => write!(f, "({member})")?,
            _ => fmt::Display::fmt(member, f)?,
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Parsing

fn parse_declaration(input: &str) -> Option<ReflectedType> {
    if let Some(inner) = input.strip_prefix('?') {
        let ReflectedType::Named { name, builtin, .. } = parse_named(inner.trim())? else {
            return None;
        };
        return Some(ReflectedType::Named {
            name,
            builtin,
            allows_null: true,
        });
    }

    if input.contains('|') {
        let members = input
            .split('|')
            .map(|part| parse_union_member(part.trim()))
            .collect::<Option<Vec<_>>>()?;

        // `T|null` is the long form of `?T`.
        if let [a, b] = members.as_slice() {
            let other = if is_null_type(a) {
                Some(b)
            } else if is_null_type(b) {
                Some(a)
            } else {
                None
            };
            if let Some(named @ ReflectedType::Named { .. }) = other {
                return Some(named.clone().or_null());
            }
        }
        return Some(ReflectedType::Union(members));
    }

    if input.contains('&') {
        return parse_intersection(input);
    }

    parse_named(input)
}

fn parse_union_member(part: &str) -> Option<ReflectedType> {
    match part.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        Some(inner) => parse_intersection(inner.trim()),
        None => parse_named(part),
    }
}

fn parse_intersection(input: &str) -> Option<ReflectedType> {
    let members = input
        .split('&')
        .map(|part| parse_named(part.trim()))
        .collect::<Option<Vec<_>>>()?;
    (members.len() > 1).then_some(ReflectedType::Intersection(members))
}

fn parse_named(input: &str) -> Option<ReflectedType> {
    let valid = input
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '\\')
        && input
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '\\');
    if !valid {
        return None;
    }

    let name = input.trim_start_matches('\\');
    Some(match name.parse::<BuiltinType>() {
        Ok(builtin) => ReflectedType::builtin(builtin),
        Err(_) => ReflectedType::class(String::from(name)),
    })
}

fn is_null_type(ty: &ReflectedType) -> bool {
    matches!(ty, ReflectedType::Named { name, builtin: true, .. } if name == "null")
}

#[cfg(test)]
mod tests {
    use super::ReflectedType;

    #[test]
    fn named_declarations() {
        assert_eq!(
            ReflectedType::parse("int"),
            ReflectedType::Named {
                name: "int".into(),
                builtin: true,
                allows_null: false,
            }
        );
        assert_eq!(
            ReflectedType::parse("?App\\Entity\\User"),
            ReflectedType::class("App\\Entity\\User").or_null()
        );
        assert_eq!(
            ReflectedType::parse("\\User|null"),
            ReflectedType::class("User").or_null()
        );
        assert!(ReflectedType::parse("mixed").allows_null());
        assert_eq!(ReflectedType::parse("INT").name(), Some("int"));
    }

    #[test]
    fn composite_declarations() {
        let union = ReflectedType::parse("int | string | null");
        assert!(union.allows_null());
        assert_eq!(union.to_string(), "int|string|null");

        let dnf = ReflectedType::parse("(A&B)|null");
        assert_eq!(dnf.to_string(), "(A&B)|null");
        assert!(dnf.allows_null());

        let intersection = ReflectedType::parse("Countable&Traversable");
        assert!(matches!(intersection, ReflectedType::Intersection(ref m) if m.len() == 2));
        assert!(!intersection.allows_null());
    }

    #[test]
    fn malformed_declarations() {
        for input in ["", "?", "int|", "A&", "?int|string", "list<int>"] {
            assert!(
                matches!(ReflectedType::parse(input), ReflectedType::Other(_)),
                "{input:?} should not parse"
            );
        }
    }
}
