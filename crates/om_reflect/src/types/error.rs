use alloc::format;
use alloc::string::String;

use thiserror::Error;

/// Failures of type resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeError {
    /// A declared type shape that cannot be classified.
    ///
    /// Recovered locally by callers, which fall back to "no type information".
    #[error("unsupported declared type `{0}`")]
    Unsupported(String),

    /// `self`, `static` or `parent` without a context able to resolve it.
    #[error("cannot resolve `{keyword}`: {}", missing_context(.class))]
    InvalidContext {
        keyword: &'static str,
        /// The declaring class, when a context was given but has no parent.
        class: Option<&'static str>,
    },
}

impl TypeError {
    #[inline]
    pub const fn is_invalid_context(&self) -> bool {
        matches!(self, Self::InvalidContext { .. })
    }
}

fn missing_context(class: &Option<&'static str>) -> String {
    match class {
        Some(class) => format!("class `{class}` has no parent class"),
        None => String::from("no type context was provided"),
    }
}
