//! Shared containers for the `om_*` crates.
//!
//! - [`hash`]: `hashbrown` containers keyed with a fixed `foldhash` seed.
//! - [`ordered`]: insertion-ordered containers built on `indexmap`, used wherever
//!   output order must follow declaration or input order.

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
pub mod ordered;

// -----------------------------------------------------------------------------
// Top-level exports

pub use ordered::{IndexMap, IndexSet};
