//! Relationship descriptors and their translation from association mappings.
//!
//! ## Menu
//!
//! - [`RelationshipDescriptor`]: `one` or `many` link of an attribute to a target class.
//! - [`RelationshipMap`]: the descriptors of one class, keyed by attribute name.
//! - [`AssociationMapping`]: an ORM-style association, the raw material of descriptors.
//! - [`relationship_map`]: translates association mappings into a [`RelationshipMap`].
//! - [`RelationshipValue`]: a relationship value in collapsed or expanded form.

use alloc::string::String;
use alloc::vec::Vec;

use om_reflect::registry::ClassRegistry;
use om_reflect::value::{ObjectRef, Value};
use om_utils::IndexMap;

// -----------------------------------------------------------------------------
// RelationshipDescriptor

/// Describes that an attribute links to another mapped class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipDescriptor {
    /// A single reference, stored in `column`.
    One { target: String, column: String },
    /// A collection of references. Only the owning side is ever written.
    Many { target: String, owning_side: bool },
}

impl RelationshipDescriptor {
    /// Returns the target class name.
    pub fn target(&self) -> &str {
        match self {
            Self::One { target, .. } | Self::Many { target, .. } => target,
        }
    }

    #[inline]
    pub const fn is_one(&self) -> bool {
        matches!(self, Self::One { .. })
    }

    #[inline]
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Many { .. })
    }
}

/// Relationship descriptors keyed by attribute name, in mapping order.
pub type RelationshipMap = IndexMap<String, RelationshipDescriptor>;

// -----------------------------------------------------------------------------
// AssociationMapping

/// An association as an ORM describes it.
///
/// - Join-table associations become [`Many`](RelationshipDescriptor::Many).
/// - Join-column associations become [`One`](RelationshipDescriptor::One).
/// - Inverse associations, with neither, become non-owning `Many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationMapping {
    field_name: String,
    target: String,
    join_table: bool,
    join_columns: Vec<String>,
    owning_side: bool,
}

impl AssociationMapping {
    /// A single-valued association stored in `join_columns`.
    pub fn to_one<I, S>(field_name: impl Into<String>, target: impl Into<String>, join_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_name: field_name.into(),
            target: target.into(),
            join_table: false,
            join_columns: join_columns.into_iter().map(Into::into).collect(),
            owning_side: true,
        }
    }

    /// A collection-valued association stored in a join table, on the owning side.
    pub fn to_many(field_name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            target: target.into(),
            join_table: true,
            join_columns: Vec::new(),
            owning_side: true,
        }
    }

    /// The inverse side of an association owned by `target`.
    pub fn inverse(field_name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            target: target.into(),
            join_table: false,
            join_columns: Vec::new(),
            owning_side: false,
        }
    }

    #[inline]
    pub fn with_owning_side(mut self, owning_side: bool) -> Self {
        self.owning_side = owning_side;
        self
    }

    #[inline]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[inline]
    pub const fn has_join_table(&self) -> bool {
        self.join_table
    }

    #[inline]
    pub fn join_columns(&self) -> &[String] {
        &self.join_columns
    }

    #[inline]
    pub const fn is_owning_side(&self) -> bool {
        self.owning_side
    }
}

/// Translates association mappings into relationship descriptors.
///
/// The column of a `one` relationship is its last join column, renamed
/// through `column_to_field` when the column backs a mapped field.
///
/// # Examples
///
/// ```
/// use om_mapper::relation::{AssociationMapping, RelationshipDescriptor, relationship_map};
/// use om_utils::IndexMap;
///
/// let mappings = [
///     AssociationMapping::to_one("author", "User", ["author_id"]),
///     AssociationMapping::to_many("tags", "Tag"),
/// ];
/// let mut columns = IndexMap::default();
/// columns.insert("author_id".to_string(), "authorId".to_string());
///
/// let map = relationship_map(&mappings, &columns);
/// assert_eq!(
///     map["author"],
///     RelationshipDescriptor::One { target: "User".into(), column: "authorId".into() },
/// );
/// assert_eq!(
///     map["tags"],
///     RelationshipDescriptor::Many { target: "Tag".into(), owning_side: true },
/// );
/// ```
pub fn relationship_map<'a>(
    mappings: impl IntoIterator<Item = &'a AssociationMapping>,
    column_to_field: &IndexMap<String, String>,
) -> RelationshipMap {
    let mut map = RelationshipMap::default();
    for mapping in mappings {
        let target = mapping.target.clone();
        let descriptor = if mapping.join_table {
            RelationshipDescriptor::Many {
                target,
                owning_side: mapping.owning_side,
            }
        } else if let Some(column) = mapping.join_columns.last() {
            RelationshipDescriptor::One {
                target,
                column: column_to_field
                    .get(column)
                    .unwrap_or(column)
                    .clone(),
            }
        } else {
            RelationshipDescriptor::Many {
                target,
                owning_side: false,
            }
        };
        map.insert(mapping.field_name.clone(), descriptor);
    }
    map
}

// -----------------------------------------------------------------------------
// RelationshipValue

/// A relationship value, collapsed to identifiers or expanded to objects.
#[derive(Debug, Clone)]
pub enum RelationshipValue {
    /// The identifiers of a collection's members.
    Identifiers(Vec<Value>),
    /// The members of a collection.
    Embedded(Vec<ObjectRef>),
    /// A related object.
    SingleRef(ObjectRef),
    /// The identifier of a related object.
    SingleId(Value),
    /// No related object.
    Cleared,
}

impl RelationshipValue {
    /// Classifies the input of a `one` relationship.
    ///
    /// Empty values clear the relationship; see [`Value::is_empty`].
    pub fn single(value: Value, target: &str, registry: &ClassRegistry) -> Self {
        if value.is_empty() {
            Self::Cleared
        } else {
            Self::reference(value, target, registry)
        }
    }

    /// Classifies one reference: an instance of `target` (or a subclass) is
    /// taken as-is, anything else is an identifier.
    pub fn reference(value: Value, target: &str, registry: &ClassRegistry) -> Self {
        match value {
            Value::Object(object) if registry.is_subclass_of(object.class_name(), target) => {
                Self::SingleRef(object)
            }
            other => Self::SingleId(other),
        }
    }

    /// Converts to the flat representation.
    pub fn into_value(self) -> Value {
        match self {
            Self::Identifiers(ids) => Value::List(ids),
            Self::Embedded(objects) => objects.into_iter().map(Value::Object).collect(),
            Self::SingleRef(object) => Value::Object(object),
            Self::SingleId(id) => id,
            Self::Cleared => Value::Null,
        }
    }
}
