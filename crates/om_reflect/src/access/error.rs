use alloc::string::String;

use thiserror::Error;

use crate::value::ValueError;
use crate::{Reflect, Typed};

/// Failures of member resolution and member invocation.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("no accessor is available for attribute `{attribute}` of `{class}`")]
    NoAccessor {
        class: &'static str,
        attribute: String,
    },

    #[error("no mutator is available for attribute `{attribute}` of `{class}`")]
    NoMutator {
        class: &'static str,
        attribute: String,
    },

    #[error("field `{class}::{field}` cannot be read directly")]
    NotReadable {
        class: &'static str,
        field: &'static str,
    },

    #[error("field `{class}::{field}` cannot be assigned directly")]
    NotWritable {
        class: &'static str,
        field: &'static str,
    },

    #[error("member `{class}::{member}` cannot be used in this direction")]
    WrongDirection {
        class: &'static str,
        member: &'static str,
    },

    #[error("method `{class}::{method}` is static")]
    Static {
        class: &'static str,
        method: &'static str,
    },

    #[error("method `{class}::{method}` needs exclusive access")]
    NeedsExclusive {
        class: &'static str,
        method: &'static str,
    },

    #[error("expected an instance of `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl AccessError {
    /// A closure registered for `T` received another object.
    pub fn type_mismatch<T: Typed>(found: &dyn Reflect) -> Self {
        Self::TypeMismatch {
            expected: T::class_info().name(),
            found: found.class_name(),
        }
    }

    /// Returns `true` if no member exists for the attribute at all.
    #[inline]
    pub const fn is_missing_member(&self) -> bool {
        matches!(self, Self::NoAccessor { .. } | Self::NoMutator { .. })
    }
}
