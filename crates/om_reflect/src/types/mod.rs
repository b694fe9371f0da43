//! Type resolution: from declared types to normalized value shapes.
//!
//! ## Menu
//!
//! - [`TypeResolver`]: resolves a [`ReflectedType`](crate::info::ReflectedType)
//!   within an optional [`TypeContext`].
//! - [`TypeDescriptor`]: builtin, array, iterable, object, enum, nullable,
//!   union or intersection.
//! - [`BuiltinType`]: the builtin identifiers.
//! - [`TypeError`]: `Unsupported` or `InvalidContext`.

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod context;
mod descriptor;
mod error;
mod resolver;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::BuiltinType;
pub use context::TypeContext;
pub use descriptor::TypeDescriptor;
pub use error::TypeError;
pub use resolver::TypeResolver;
