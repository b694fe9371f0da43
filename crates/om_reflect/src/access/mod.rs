//! Member resolution: which field or method reads or writes an attribute.
//!
//! ## Menu
//!
//! - [`MemberResolver`]: resolves and memoizes [`MemberHandle`]s.
//! - [`MemberHandle`]: a public field, an accessor method or a mutator method.
//! - [`Probe`]: a named-candidate probe; see [`ACCESSOR_PROBES`] and [`MUTATOR_PROBES`].
//! - [`camelize`] / [`method_name`]: method-name synthesis.
//! - [`AccessError`]: resolution and invocation failures.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod handle;
mod naming;
mod resolver;

// -----------------------------------------------------------------------------
// Exports

pub use error::AccessError;
pub use handle::MemberHandle;
pub use naming::{ACCESSOR_PROBES, Arity, MUTATOR_PROBES, Probe, camelize, method_name};
pub use resolver::MemberResolver;
