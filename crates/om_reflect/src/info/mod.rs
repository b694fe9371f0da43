//! Static class descriptions.
//!
//! ## Menu
//!
//! - [`ClassInfo`]: a class name, its kind, parent, fields, methods and custom attributes.
//!     - [`ClassKind`]: `Class` or `Enum`.
//!
//! - [`FieldInfo`]: a declared field with its visibility, write scope, declared type,
//!   default value and type-erased getter/setter.
//!     - [`Visibility`]: who may see a member.
//!     - [`WriteScope`]: who may assign a field.
//!
//! - [`MethodInfo`]: a method with its receiver, parameters and declared return type.
//!     - [`ParamInfo`]: a declared parameter.
//!     - [`MethodBody`] / [`Receiver`]: how the method is invoked.
//!
//! - [`ReflectedType`]: a raw declared type (named, union, intersection or unrecognized).
//!
//! - [`CustomAttributes`]: an attribute container, just like `Map<TypeId, Box<dyn Any>>`.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod class_info;
mod field_info;
mod method_info;
mod reflected_type;

// -----------------------------------------------------------------------------
// Internal API

use attributes::impl_custom_attributes_fn;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::CustomAttributes;
pub use class_info::{ClassInfo, ClassKind};
pub use field_info::{FieldInfo, Visibility, WriteScope};
pub use method_info::{MethodBody, MethodInfo, ParamInfo, Receiver};
pub use reflected_type::ReflectedType;
