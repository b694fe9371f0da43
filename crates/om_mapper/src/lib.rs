//! Bidirectional mapping between mapped objects and flat values.
//!
//! The [`MappingEngine`] walks the visible attributes of an object described
//! by [`om_reflect`] and converts each to or from its external form:
//!
//! - [`engine`]: normalize, denormalize and recursive tree normalization.
//! - [`extractor`]: the expected type of an attribute, driving coercion.
//! - [`relation`]: `one`/`many` relationship descriptors and values.
//! - [`store`]: the [`EntityStore`](store::EntityStore) collaborator and an
//!   in-memory implementation.
//! - [`filter`]: the [`AttributeFilter`](filter::AttributeFilter) collaborator.
//! - [`coerce`]: the [`ValueCoercer`](coerce::ValueCoercer) collaborator.
//! - [`markers`]: field markers (`DeepNormalize`, `Groups`).
//! - [`options`], [`diagnostics`], [`error`].

// -----------------------------------------------------------------------------
// Extern Self

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod coerce;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod markers;
pub mod options;
pub mod relation;
pub mod store;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use engine::{MappingEngine, MappingEngineBuilder, NormalizationContext};
pub use error::{CoerceError, MapError};
pub use options::MapOptions;
