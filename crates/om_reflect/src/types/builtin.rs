use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::types::TypeError;

/// The builtin type identifiers a declaration may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinType {
    Int,
    Float,
    String,
    Bool,
    False,
    True,
    Null,
    Mixed,
    Array,
    Iterable,
    Object,
    Callable,
    Void,
    Never,
}

impl BuiltinType {
    /// Every builtin, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Int,
        Self::Float,
        Self::String,
        Self::Bool,
        Self::False,
        Self::True,
        Self::Null,
        Self::Mixed,
        Self::Array,
        Self::Iterable,
        Self::Object,
        Self::Callable,
        Self::Void,
        Self::Never,
    ];

    /// Returns the identifier as written in declarations.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
            Self::False => "false",
            Self::True => "true",
            Self::Null => "null",
            Self::Mixed => "mixed",
            Self::Array => "array",
            Self::Iterable => "iterable",
            Self::Object => "object",
            Self::Callable => "callable",
            Self::Void => "void",
            Self::Never => "never",
        }
    }

    /// Returns `true` for `int`, `float`, `string`, `bool`, `false` and `true`.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Int | Self::Float | Self::String | Self::Bool | Self::False | Self::True
        )
    }
}

impl fmt::Display for BuiltinType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parses an identifier, ignoring ASCII case.
///
/// ```
/// use om_reflect::types::BuiltinType;
///
/// assert_eq!("Int".parse::<BuiltinType>().unwrap(), BuiltinType::Int);
/// assert!("integer".parse::<BuiltinType>().is_err());
/// ```
impl FromStr for BuiltinType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|builtin| builtin.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::Unsupported(String::from(s)))
    }
}
