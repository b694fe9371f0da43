//! Provide [`ClassRegistry`], resolving class names to class tables.
//!
//! ## auto_register
//!
//! With the `auto_register` feature (enabled by default), classes can be
//! submitted next to their definition with [`register_class!`](crate::register_class)
//! and collected at runtime with [`ClassRegistry::auto_register`]:
//!
//! ```
//! use om_reflect::{ClassInfoCell, Typed, register_class};
//! use om_reflect::info::ClassInfo;
//! use om_reflect::registry::ClassRegistry;
//!
//! struct Tag;
//!
//! impl Typed for Tag {
//!     fn class_info() -> &'static ClassInfo {
//!         static CELL: ClassInfoCell = ClassInfoCell::new();
//!         CELL.get_or_init(|| ClassInfo::new::<Self>("Tag"))
//!     }
//! }
//!
//! register_class!(Tag);
//!
//! let mut registry = ClassRegistry::new();
//! if registry.auto_register() {
//!     assert!(registry.contains("Tag"));
//! }
//! ```

// -----------------------------------------------------------------------------
// Modules

mod class_registry;

// -----------------------------------------------------------------------------
// Exports

pub use class_registry::ClassRegistry;
