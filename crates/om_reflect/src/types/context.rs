use crate::registry::ClassRegistry;

/// The classes `self`, `static` and `parent` refer to.
///
/// - `self`: the class declaring the member.
/// - `static`: the class the member was reached through.
/// - `parent`: the parent of the declaring class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeContext {
    declaring_class: &'static str,
    called_class: &'static str,
    parent_class: Option<&'static str>,
}

impl TypeContext {
    /// A context without a parent class.
    #[inline]
    pub const fn new(declaring_class: &'static str, called_class: &'static str) -> Self {
        Self {
            declaring_class,
            called_class,
            parent_class: None,
        }
    }

    #[inline]
    pub const fn with_parent(mut self, parent_class: &'static str) -> Self {
        self.parent_class = Some(parent_class);
        self
    }

    /// Builds the context of a member declared in `declaring` and reached
    /// through `called`, taking the parent from the registry.
    pub fn for_member(
        registry: &ClassRegistry,
        declaring: &'static str,
        called: &'static str,
    ) -> Self {
        Self {
            declaring_class: declaring,
            called_class: called,
            parent_class: registry.get(declaring).and_then(|info| info.parent()),
        }
    }

    #[inline]
    pub const fn declaring_class(&self) -> &'static str {
        self.declaring_class
    }

    #[inline]
    pub const fn called_class(&self) -> &'static str {
        self.called_class
    }

    #[inline]
    pub const fn parent_class(&self) -> Option<&'static str> {
        self.parent_class
    }
}
