//! The entity-store collaborator.
//!
//! The engine never persists anything. It asks an [`EntityStore`] for the
//! relationship schema of a class, for the identifier fields of related
//! objects and for the object behind an identifier. [`InMemoryStore`] is a
//! thread-safe implementation backed by maps.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock};

use om_reflect::value::{ObjectRef, Value};
use om_utils::IndexMap;
use om_utils::hash::HashMap;

use crate::relation::{AssociationMapping, RelationshipMap, relationship_map};

// -----------------------------------------------------------------------------
// EntityStore

/// Resolves identifiers and relationship schemas.
///
/// Implementations may block on I/O; the engine calls them synchronously and
/// imposes no timeout of its own.
pub trait EntityStore: Send + Sync {
    /// Returns the relationship descriptors of `class`, empty if it has none.
    fn relationship_schema(&self, class: &str) -> RelationshipMap;

    /// Returns the object of `class` identified by `identifier`.
    fn find_by_identifier(&self, class: &str, identifier: &Value) -> Option<ObjectRef>;

    /// Returns the identifier field names of `class`, in order.
    fn identifier_fields(&self, class: &str) -> Vec<String>;

    /// Returns `true` if the store maps `class`.
    fn is_managed(&self, class: &str) -> bool {
        let _ = class;
        true
    }
}

// -----------------------------------------------------------------------------
// EntityMetadata

/// What an [`InMemoryStore`] knows about one class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMetadata {
    identifier: Vec<String>,
    associations: Vec<AssociationMapping>,
    column_to_field: IndexMap<String, String>,
}

impl EntityMetadata {
    /// Metadata with the given identifier fields.
    pub fn new<I, S>(identifier: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifier: identifier.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_association(mut self, mapping: AssociationMapping) -> Self {
        self.associations.push(mapping);
        self
    }

    /// Declares that `column` stores the field `field`.
    pub fn with_column(mut self, column: impl Into<String>, field: impl Into<String>) -> Self {
        self.column_to_field.insert(column.into(), field.into());
        self
    }

    #[inline]
    pub fn identifier(&self) -> &[String] {
        &self.identifier
    }

    #[inline]
    pub fn associations(&self) -> &[AssociationMapping] {
        &self.associations
    }

    /// Translates the associations into relationship descriptors.
    pub fn relationship_map(&self) -> RelationshipMap {
        relationship_map(&self.associations, &self.column_to_field)
    }
}

// -----------------------------------------------------------------------------
// InMemoryStore

/// An [`EntityStore`] holding objects in memory.
///
/// Objects are keyed by class name and a canonical identifier string, so the
/// integer `3` and the string `"3"` find the same object.
///
/// # Examples
///
/// ```
/// use om_mapper::store::{EntityMetadata, EntityStore, InMemoryStore};
/// use om_reflect::value::Value;
/// # use om_reflect::{ClassInfoCell, Typed, info::ClassInfo};
/// # struct Tag;
/// # impl Typed for Tag {
/// #     fn class_info() -> &'static ClassInfo {
/// #         static CELL: ClassInfoCell = ClassInfoCell::new();
/// #         CELL.get_or_init(|| ClassInfo::new::<Self>("Tag"))
/// #     }
/// # }
///
/// let store = InMemoryStore::new();
/// store.define("Tag", EntityMetadata::new(["id"]));
/// store.insert(3, std::sync::Arc::new(Tag));
///
/// assert!(store.find_by_identifier("Tag", &Value::from("3")).is_some());
/// assert!(store.find_by_identifier("Tag", &Value::from(4)).is_none());
/// assert_eq!(store.identifier_fields("Tag"), ["id"]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    metadata: RwLock<HashMap<String, EntityMetadata>>,
    objects: RwLock<HashMap<(String, String), ObjectRef>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or replaces) the metadata of `class`.
    pub fn define(&self, class: impl Into<String>, metadata: EntityMetadata) {
        self.metadata
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class.into(), metadata);
    }

    /// Stores `object` under its own class and `identifier`, returning the
    /// object it replaces.
    ///
    /// Identifiers without a canonical form (null, lists, maps, objects) are
    /// not stored.
    pub fn insert(
        &self,
        identifier: impl Into<Value>,
        object: impl Into<ObjectRef>,
    ) -> Option<ObjectRef> {
        let object = object.into();
        let Some(key) = canonical_identifier(&identifier.into()) else {
            log::warn!(
                "object of class `{}` stored without a usable identifier",
                object.class_name()
            );
            return None;
        };
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((object.class_name().to_string(), key), object)
    }

    /// Removes the object of `class` identified by `identifier`.
    pub fn remove(&self, class: &str, identifier: &Value) -> Option<ObjectRef> {
        let key = canonical_identifier(identifier)?;
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(class.to_string(), key))
    }

    /// Returns the number of stored objects.
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityStore for InMemoryStore {
    fn relationship_schema(&self, class: &str) -> RelationshipMap {
        self.metadata
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .map(EntityMetadata::relationship_map)
            .unwrap_or_default()
    }

    fn find_by_identifier(&self, class: &str, identifier: &Value) -> Option<ObjectRef> {
        let key = canonical_identifier(identifier)?;
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(class.to_string(), key))
            .cloned()
    }

    fn identifier_fields(&self, class: &str) -> Vec<String> {
        self.metadata
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .map(|metadata| metadata.identifier.clone())
            .unwrap_or_default()
    }

    fn is_managed(&self, class: &str) -> bool {
        self.metadata
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(class)
    }
}

/// Returns the canonical string form of a scalar identifier.
///
/// Integral floats render like integers; booleans as `1`/`0`. Integral floats
/// outside the `i64` range have no canonical form.
pub fn canonical_identifier(identifier: &Value) -> Option<String> {
    match identifier {
        Value::Int(id) => Some(id.to_string()),
        Value::Float(id) if id.fract() == 0.0 && id.is_finite() => {
            // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
            (*id >= i64::MIN as f64 && *id < i64::MAX as f64).then(|| (*id as i64).to_string())
        }
        Value::Float(id) => Some(id.to_string()),
        Value::String(id) => Some(id.clone()),
        Value::Bool(id) => Some(String::from(if *id { "1" } else { "0" })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityMetadata, EntityStore, InMemoryStore, canonical_identifier};
    use crate::relation::{AssociationMapping, RelationshipDescriptor};
    use alloc::sync::Arc;
    use om_reflect::info::ClassInfo;
    use om_reflect::value::Value;
    use om_reflect::{ClassInfoCell, Typed};

    struct Marker;

    impl Typed for Marker {
        fn class_info() -> &'static ClassInfo {
            static CELL: ClassInfoCell = ClassInfoCell::new();
            CELL.get_or_init(|| ClassInfo::new::<Self>("Marker"))
        }
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(canonical_identifier(&Value::from(3)).as_deref(), Some("3"));
        assert_eq!(canonical_identifier(&Value::from(3.0)).as_deref(), Some("3"));
        assert_eq!(canonical_identifier(&Value::from("3")).as_deref(), Some("3"));
        assert_eq!(canonical_identifier(&Value::from(true)).as_deref(), Some("1"));
        assert_eq!(canonical_identifier(&Value::Null), None);
        assert_eq!(canonical_identifier(&Value::List(vec![])), None);
    }

    #[test]
    fn out_of_range_floats_have_no_canonical_form() {
        assert_eq!(canonical_identifier(&Value::from(1e20)), None);
        assert_eq!(canonical_identifier(&Value::from(-1e20)), None);
        assert_eq!(canonical_identifier(&Value::from(2f64.powi(63))), None);
        assert_eq!(
            canonical_identifier(&Value::from(-(2f64.powi(63)))).as_deref(),
            Some("-9223372036854775808")
        );

        let store = InMemoryStore::new();
        assert!(store.insert(i64::MAX, Arc::new(Marker)).is_none());
        assert!(store.find_by_identifier("Marker", &Value::from(i64::MAX)).is_some());
        assert!(store.find_by_identifier("Marker", &Value::from(1e20)).is_none());
    }

    #[test]
    fn schema_follows_metadata() {
        let store = InMemoryStore::new();
        assert!(!store.is_managed("Post"));
        assert!(store.relationship_schema("Post").is_empty());

        store.define(
            "Post",
            EntityMetadata::new(["id"])
                .with_association(AssociationMapping::to_one("author", "User", ["author_id"]))
                .with_column("author_id", "author"),
        );

        assert!(store.is_managed("Post"));
        assert_eq!(
            store.relationship_schema("Post")["author"],
            RelationshipDescriptor::One {
                target: "User".into(),
                column: "author".into(),
            }
        );
        assert_eq!(store.identifier_fields("Post"), ["id"]);
        assert!(store.identifier_fields("User").is_empty());
    }
}
