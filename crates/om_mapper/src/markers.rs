//! Field markers read by the engine and the default attribute filter.
//!
//! Markers are attached with `with_attribute` on
//! [`FieldInfo`](om_reflect::info::FieldInfo):
//!
//! ```
//! use om_mapper::markers::{DeepNormalize, Groups};
//! use om_reflect::info::FieldInfo;
//!
//! let field = FieldInfo::new("author")
//!     .protected()
//!     .with_attribute(DeepNormalize(true))
//!     .with_attribute(Groups::new(["detail"]));
//!
//! assert!(DeepNormalize::is_enabled_on(&field));
//! assert!(field.get_attribute::<Groups>().unwrap().contains("detail"));
//! ```

use alloc::vec::Vec;

use om_reflect::info::FieldInfo;

/// Opts a relationship attribute into normalization.
///
/// Relationships without `DeepNormalize(true)` never appear in normalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepNormalize(pub bool);

impl DeepNormalize {
    /// Returns `true` if `field` carries `DeepNormalize(true)`.
    pub fn is_enabled_on(field: &FieldInfo) -> bool {
        field.get_attribute::<Self>().is_some_and(|marker| marker.0)
    }
}

/// The serialization groups an attribute belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups(pub Vec<&'static str>);

impl Groups {
    pub fn new(groups: impl IntoIterator<Item = &'static str>) -> Self {
        Self(groups.into_iter().collect())
    }

    #[inline]
    pub fn contains(&self, group: &str) -> bool {
        self.0.iter().any(|own| *own == group)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}
