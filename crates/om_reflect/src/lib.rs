//! Runtime class descriptions for objects that never declared a serialization
//! contract.
//!
//! Rust has no runtime reflection, so every mapped class registers a static
//! table ([`ClassInfo`](info::ClassInfo)) describing its fields, accessor and
//! mutator methods and their declared types. Everything else in this crate
//! operates purely against those tables:
//!
//! - [`info`]: class, field, method and parameter descriptions, plus the raw
//!   declared-type shapes ([`ReflectedType`](info::ReflectedType)).
//! - [`registry`]: the [`ClassRegistry`](registry::ClassRegistry), resolving class names.
//! - [`value`]: the dynamic [`Value`](value::Value) used for attribute values
//!   and flat external representations.
//! - [`access`]: the [`MemberResolver`](access::MemberResolver), locating the
//!   public field or accessor/mutator method behind an attribute name.
//! - [`types`]: the [`TypeResolver`](types::TypeResolver), normalizing declared
//!   types into [`TypeDescriptor`](types::TypeDescriptor)s.
//! - [`serde`]: `serde` support for [`Value`](value::Value).

// -----------------------------------------------------------------------------
// Extern Self

// `register_class!` expands to `$crate` paths, doc tests name the crate directly.
extern crate self as om_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod info;
pub mod registry;
pub mod serde;
pub mod types;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::{ClassInfoCell, Reflect, Typed};
