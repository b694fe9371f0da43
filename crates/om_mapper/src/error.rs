use alloc::string::String;

use om_reflect::access::AccessError;
use om_reflect::types::TypeError;
use om_reflect::value::ValueKind;
use thiserror::Error;

// -----------------------------------------------------------------------------
// MapError

/// Failures that abort a normalize or denormalize call.
///
/// Lenient skips (identifier misses, unknown attributes, rejected nulls) are
/// never errors; they are reported through
/// [`Diagnostics`](crate::diagnostics::Diagnostics).
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MapError {
    /// The attribute has neither a readable field nor an accessor method.
    #[error("no accessor is available for attribute `{attribute}` of class `{class}`")]
    NoAccessorAvailable {
        class: &'static str,
        attribute: String,
    },

    /// A relationship was read without the deep-normalization opt-in.
    #[error("deep normalization is disabled for attribute `{attribute}` of class `{class}`")]
    DeepTraversalDisabled {
        class: &'static str,
        attribute: String,
    },

    /// A declared type used `self`, `static` or `parent` where it cannot resolve.
    #[error("invalid type context for attribute `{attribute}` of class `{class}`: {source}")]
    InvalidContext {
        class: &'static str,
        attribute: String,
        source: TypeError,
    },

    /// The class name is not registered.
    #[error("class `{0}` is not registered")]
    UnknownClass(String),

    /// The target object is not an instance of the class being denormalized.
    #[error("cannot denormalize `{expected}` into an instance of `{found}`")]
    TargetMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The object graph reaches an object that is already being normalized.
    #[error("circular reference to an object of class `{class}`")]
    CircularReference { class: &'static str },

    /// A member invocation failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl MapError {
    /// Converts a failed accessor lookup into [`MapError::NoAccessorAvailable`].
    pub(crate) fn from_lookup(error: AccessError) -> Self {
        match error {
            AccessError::NoAccessor { class, attribute } => {
                Self::NoAccessorAvailable { class, attribute }
            }
            other => Self::Access(other),
        }
    }
}

// -----------------------------------------------------------------------------
// CoerceError

/// A value that does not fit the type an attribute expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoerceError {
    #[error("expected `{expected}`, found {found}")]
    Mismatch {
        /// The expected type, as displayed by its descriptor.
        expected: String,
        found: ValueKind,
    },

    #[error("expected an instance of `{expected}`, found `{found}`")]
    UnexpectedClass {
        expected: String,
        found: &'static str,
    },
}
