use alloc::string::String;
use alloc::sync::Arc;
use core::any::{Any, TypeId};

use om_utils::IndexMap;

use crate::info::{CustomAttributes, FieldInfo, MethodInfo, Visibility, impl_custom_attributes_fn};

// -----------------------------------------------------------------------------
// ClassKind

/// Distinguishes ordinary classes from enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Enum,
}

// -----------------------------------------------------------------------------
// ClassInfo

/// The static description of a mapped class.
///
/// Fields keep their declaration order; methods are looked up
/// case-insensitively.
///
/// # Examples
///
/// ```
/// use om_reflect::info::{ClassInfo, ClassKind, FieldInfo, MethodInfo};
///
/// let status = ClassInfo::named("Status").enumeration();
/// assert_eq!(status.kind(), ClassKind::Enum);
///
/// let post = ClassInfo::named("Post")
///     .with_parent("Content")
///     .with_field(FieldInfo::new("title"))
///     .with_field(FieldInfo::new("body").protected())
///     .with_method(MethodInfo::new_static("create"));
///
/// assert_eq!(post.field_names().collect::<Vec<_>>(), ["title", "body"]);
/// assert_eq!(post.field("body").unwrap().declaring_class(), Some("Post"));
/// assert!(post.has_method("CREATE"));
/// assert_eq!(post.parent(), Some("Content"));
/// ```
#[derive(Debug)]
pub struct ClassInfo {
    name: &'static str,
    type_id: Option<TypeId>,
    kind: ClassKind,
    parent: Option<&'static str>,
    fields: IndexMap<&'static str, FieldInfo>,
    // Keyed by lower-case name.
    methods: IndexMap<String, MethodInfo>,
    // Use `Option` to reduce unnecessary heap requests (when empty content).
    custom_attributes: Option<Arc<CustomAttributes>>,
}

impl ClassInfo {
    impl_custom_attributes_fn!(custom_attributes);

    /// Creates the table of the Rust type `T`.
    pub fn new<T: Any>(name: &'static str) -> Self {
        Self {
            type_id: Some(TypeId::of::<T>()),
            ..Self::named(name)
        }
    }

    /// Creates a table that is not backed by a Rust type, e.g. an enumeration
    /// only ever referenced by name in declared types.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            type_id: None,
            kind: ClassKind::Class,
            parent: None,
            fields: IndexMap::default(),
            methods: IndexMap::default(),
            custom_attributes: None,
        }
    }

    /// Marks the class as an enumeration.
    #[inline]
    pub fn enumeration(mut self) -> Self {
        self.kind = ClassKind::Enum;
        self
    }

    #[inline]
    pub fn with_parent(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Appends a field, replacing an earlier one with the same name in place.
    pub fn with_field(mut self, mut field: FieldInfo) -> Self {
        field.set_declaring_class_if_missing(self.name);
        self.fields.insert(field.name(), field);
        self
    }

    /// Adds a method, replacing an earlier one whose name differs only in case.
    pub fn with_method(mut self, mut method: MethodInfo) -> Self {
        method.set_declaring_class_if_missing(self.name);
        self.methods.insert(method.name().to_ascii_lowercase(), method);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the `TypeId` of the backing Rust type.
    #[inline]
    pub const fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    #[inline]
    pub const fn kind(&self) -> ClassKind {
        self.kind
    }

    #[inline]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, ClassKind::Enum)
    }

    /// Returns the parent class name.
    #[inline]
    pub const fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    /// Returns the field with the given (case-sensitive) name.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &FieldInfo> {
        self.fields.values()
    }

    #[inline]
    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the names of non-static public or protected fields, in
    /// declaration order.
    ///
    /// These are the attributes a normalizer discovers on its own.
    pub fn instance_attribute_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .values()
            .filter(|field| !field.is_static() && field.visibility() != Visibility::Private)
            .map(FieldInfo::name)
    }

    /// Returns the method with the given name, ignoring ASCII case.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.methods.get(name.to_ascii_lowercase().as_str())
        } else {
            self.methods.get(name)
        }
    }

    #[inline]
    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    /// Returns an iterator over the methods in registration order.
    #[inline]
    pub fn methods(&self) -> impl ExactSizeIterator<Item = &MethodInfo> {
        self.methods.values()
    }
}
