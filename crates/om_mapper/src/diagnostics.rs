//! Reports of the lenient skips a call made.
//!
//! Normalization and denormalization tolerate partially resolvable input: an
//! identifier that finds nothing, an attribute nobody can write, a `null`
//! a mutator rejects. None of these fail the call. Each one is logged at
//! `debug` level and recorded here, so callers can tell tolerated input
//! apart from silently lost data.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// DiagnosticKind

/// The reason an attribute or relationship member was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A relationship identifier did not resolve to an object of the target class.
    IdentifierNotFound,
    /// An input attribute has no mutator and no writable field.
    UnknownAttribute,
    /// The attribute filter rejected an input attribute.
    FilteredAttribute,
    /// A write to the inverse side of a collection relationship.
    NonOwningSide,
    /// A `null` the receiving member does not accept.
    NullRejected,
    /// The value does not fit the attribute's expected type.
    CoercionFailed,
    /// A related object without exactly one identifier field, in form mode.
    CompositeIdentifier,
    /// The member invocation failed.
    WriteFailed,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::IdentifierNotFound => "identifier not found",
            Self::UnknownAttribute => "unknown attribute",
            Self::FilteredAttribute => "filtered attribute",
            Self::NonOwningSide => "non-owning side",
            Self::NullRejected => "null rejected",
            Self::CoercionFailed => "coercion failed",
            Self::CompositeIdentifier => "composite identifier",
            Self::WriteFailed => "write failed",
        })
    }
}

// -----------------------------------------------------------------------------
// Diagnostic

/// One skipped attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    class: &'static str,
    attribute: String,
    message: String,
}

impl Diagnostic {
    #[inline]
    pub const fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    #[inline]
    pub const fn class(&self) -> &'static str {
        self.class
    }

    #[inline]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}: {} ({})",
            self.class, self.attribute, self.message, self.kind
        )
    }
}

// -----------------------------------------------------------------------------
// Diagnostics

/// The diagnostics of one or more calls, in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Logs and records a skip.
    pub(crate) fn record(
        &mut self,
        kind: DiagnosticKind,
        class: &'static str,
        attribute: &str,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            class,
            attribute: String::from(attribute),
            message: message.into(),
        };
        log::debug!("skipped {diagnostic}");
        self.entries.push(diagnostic);
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Returns the diagnostics of the given kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Returns `true` if `attribute` was skipped for `kind`.
    pub fn contains(&self, kind: DiagnosticKind, attribute: &str) -> bool {
        self.of_kind(kind).any(|entry| entry.attribute == attribute)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagnosticKind, Diagnostics};

    #[test]
    fn records_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(DiagnosticKind::UnknownAttribute, "Post", "extra", "no member");
        diagnostics.record(DiagnosticKind::IdentifierNotFound, "Post", "author", "id 9");

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.contains(DiagnosticKind::IdentifierNotFound, "author"));
        assert!(!diagnostics.contains(DiagnosticKind::UnknownAttribute, "author"));

        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.to_string(), "Post::extra: no member (unknown attribute)");
    }
}
