use core::any::TypeId;

use om_utils::hash::HashMap;

use crate::Typed;
use crate::info::ClassInfo;

// -----------------------------------------------------------------------------
// ClassRegistry

/// A registry of mapped classes, keyed by class name.
///
/// The mapper resolves the class names found in declared types and
/// relationship schemas through this registry. It also answers hierarchy
/// questions (`is_subclass_of`) from the declared parent names.
///
/// # Example
///
/// ```
/// use om_reflect::{ClassInfoCell, Typed};
/// use om_reflect::info::ClassInfo;
/// use om_reflect::registry::ClassRegistry;
///
/// struct Content;
/// struct Post;
///
/// impl Typed for Content {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| ClassInfo::new::<Self>("Content"))
///     }
/// }
///
/// impl Typed for Post {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| ClassInfo::new::<Self>("Post").with_parent("Content"))
///     }
/// }
///
/// let mut registry = ClassRegistry::new();
/// registry.register::<Content>();
/// registry.register::<Post>();
///
/// assert_eq!(registry.get_of::<Post>().unwrap().name(), "Post");
/// assert!(registry.is_subclass_of("Post", "Content"));
/// assert!(registry.is_subclass_of("Post", "Post"));
/// assert!(!registry.is_subclass_of("Content", "Post"));
/// ```
#[derive(Default)]
pub struct ClassRegistry {
    classes: HashMap<&'static str, &'static ClassInfo>,
    by_type: HashMap<TypeId, &'static ClassInfo>,
    auto_registered: bool,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the class table of `T`.
    ///
    /// Returns `false` if a class with the same name was already registered;
    /// the earlier registration is kept.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> bool {
        self.register_info(T::class_info())
    }

    /// Registers a class table directly.
    ///
    /// Returns `false` if a class with the same name was already registered;
    /// the earlier registration is kept.
    pub fn register_info(&mut self, info: &'static ClassInfo) -> bool {
        if self.classes.contains_key(info.name()) {
            return false;
        }
        self.classes.insert(info.name(), info);
        if let Some(type_id) = info.type_id() {
            self.by_type.insert(type_id, info);
        }
        true
    }

    /// Registers every class submitted with [`register_class!`](crate::register_class).
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration works on the current
    /// platform. Always `false` without the `auto_register` feature.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if !self.auto_registered {
                self.auto_registered = crate::__macro_exports::auto_register::register_classes(self);
            }
        }
        self.auto_registered
    }

    #[inline]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Returns the class table registered under `class`.
    #[inline]
    pub fn get(&self, class: &str) -> Option<&'static ClassInfo> {
        self.classes.get(class).copied()
    }

    /// Returns the class table of the Rust type `T`, if registered.
    #[inline]
    pub fn get_of<T: Typed>(&self) -> Option<&'static ClassInfo> {
        self.get_by_type_id(TypeId::of::<T>())
    }

    #[inline]
    pub fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static ClassInfo> {
        self.by_type.get(&type_id).copied()
    }

    /// Returns `true` if `class` is a registered enumeration.
    #[inline]
    pub fn is_enum(&self, class: &str) -> bool {
        self.get(class).is_some_and(ClassInfo::is_enum)
    }

    /// Returns the registered parent of `class`.
    pub fn parent_of(&self, class: &str) -> Option<&'static ClassInfo> {
        self.get(self.get(class)?.parent()?)
    }

    /// Returns `true` if `class` is `ancestor` or extends it, directly or not.
    ///
    /// Parents that are not registered end the walk.
    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        if class == ancestor {
            return true;
        }

        let mut current = self.get(class);
        // A malformed parent chain could loop; bound the walk by the class count.
        for _ in 0..=self.classes.len() {
            let Some(info) = current else {
                return false;
            };
            match info.parent() {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => current = self.get(parent),
                None => return false,
            }
        }
        false
    }

    /// Returns an iterator over the registered class tables, in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static ClassInfo> + '_ {
        self.classes.values().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl core::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.classes.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ClassRegistry;
    use crate::ClassInfoCell;
    use crate::info::ClassInfo;

    static A: ClassInfoCell = ClassInfoCell::new();
    static B: ClassInfoCell = ClassInfoCell::new();
    static LOOP_X: ClassInfoCell = ClassInfoCell::new();
    static LOOP_Y: ClassInfoCell = ClassInfoCell::new();

    #[test]
    fn duplicate_names_keep_first() {
        let mut registry = ClassRegistry::new();
        assert!(registry.register_info(A.get_or_init(|| ClassInfo::named("A"))));
        assert!(!registry.register_info(A.get_or_init(|| ClassInfo::named("A"))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn parents() {
        let mut registry = ClassRegistry::new();
        registry.register_info(A.get_or_init(|| ClassInfo::named("A")));
        registry.register_info(B.get_or_init(|| ClassInfo::named("B").with_parent("A")));

        assert_eq!(registry.parent_of("B").map(ClassInfo::name), Some("A"));
        assert!(registry.parent_of("A").is_none());
        assert!(registry.is_subclass_of("B", "A"));
        assert!(!registry.is_subclass_of("A", "B"));
        assert!(!registry.is_subclass_of("Unknown", "A"));
    }

    #[test]
    fn cyclic_parents_terminate() {
        let mut registry = ClassRegistry::new();
        registry.register_info(LOOP_X.get_or_init(|| ClassInfo::named("X").with_parent("Y")));
        registry.register_info(LOOP_Y.get_or_init(|| ClassInfo::named("Y").with_parent("X")));

        assert!(registry.is_subclass_of("X", "Y"));
        assert!(!registry.is_subclass_of("X", "Z"));
    }
}
