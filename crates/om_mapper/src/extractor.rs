//! Expected types of attributes.

use alloc::string::String;
use std::sync::{PoisonError, RwLock};

use om_reflect::access::{MemberHandle, MemberResolver};
use om_reflect::info::{ClassInfo, ReflectedType};
use om_reflect::registry::ClassRegistry;
use om_reflect::types::{BuiltinType, TypeContext, TypeDescriptor, TypeError, TypeResolver};
use om_reflect::value::Value;
use om_utils::hash::HashMap;

use crate::relation::RelationshipMap;

/// Determines the type an attribute expects, for type-directed coercion.
///
/// Order of preference:
///
/// 1. the first parameter of the mutator method,
/// 2. the return type of the accessor method,
/// 3. the declared type of the field,
/// 4. the runtime kind of the field's default value.
///
/// A step without a declared type, or with a type the
/// [`TypeResolver`] does not support, falls through to the next one.
/// `self`/`static`/`parent` that cannot resolve fail the lookup.
///
/// Relationship attributes have no type here; the engine handles them.
/// Results are cached per class and attribute for the extractor's lifetime;
/// names that match no member are answered without being cached.
///
/// # Examples
///
/// ```
/// use om_mapper::extractor::AttributeTypeExtractor;
/// use om_mapper::relation::RelationshipMap;
/// use om_reflect::info::{ClassInfo, FieldInfo};
/// use om_reflect::registry::ClassRegistry;
/// use om_reflect::types::{BuiltinType, TypeDescriptor};
/// # use om_reflect::ClassInfoCell;
/// # static CELL: ClassInfoCell = ClassInfoCell::new();
///
/// let info = CELL.get_or_init(|| {
///     ClassInfo::named("Settings")
///         .with_field(FieldInfo::new("retries").with_type("?int"))
///         .with_field(FieldInfo::new("ratio").with_default(0.5))
/// });
/// let registry = ClassRegistry::new();
/// let extractor = AttributeTypeExtractor::new();
/// let relations = RelationshipMap::default();
///
/// assert_eq!(
///     extractor.get_type(&registry, info, "retries", &relations),
///     Ok(Some(TypeDescriptor::nullable(TypeDescriptor::builtin(BuiltinType::Int)))),
/// );
/// assert_eq!(
///     extractor.get_type(&registry, info, "ratio", &relations),
///     Ok(Some(TypeDescriptor::builtin(BuiltinType::Float))),
/// );
/// assert_eq!(extractor.get_type(&registry, info, "missing", &relations), Ok(None));
/// ```
#[derive(Default)]
pub struct AttributeTypeExtractor {
    members: MemberResolver,
    cache: RwLock<HashMap<(usize, String), Option<TypeDescriptor>>>,
}

impl AttributeTypeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the member resolver used to find accessors and mutators.
    #[inline]
    pub fn members(&self) -> &MemberResolver {
        &self.members
    }

    /// Returns the expected type of `attribute`, or `None` when unknown.
    pub fn get_type(
        &self,
        registry: &ClassRegistry,
        class: &'static ClassInfo,
        attribute: &str,
        relationships: &RelationshipMap,
    ) -> Result<Option<TypeDescriptor>, TypeError> {
        if relationships.contains_key(attribute) {
            return Ok(None);
        }

        let key = (core::ptr::from_ref(class) as usize, String::from(attribute));
        if let Some(found) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(found.clone());
        }

        let resolved = self.extract(registry, class, attribute)?;
        if resolved.is_none() && class.field(attribute).is_none() {
            return Ok(None);
        }
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Returns the number of cached types.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drops every cached type.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.members.clear_cache();
    }

    fn extract(
        &self,
        registry: &ClassRegistry,
        class: &'static ClassInfo,
        attribute: &str,
    ) -> Result<Option<TypeDescriptor>, TypeError> {
        let resolver = TypeResolver::new(registry);

        let methods = [
            self.members.mutator_method(class, attribute),
            self.members.accessor_method(class, attribute),
        ];
        for handle in methods.into_iter().flatten() {
            let declaring = match handle {
                MemberHandle::Accessor { method, .. } | MemberHandle::Mutator { method, .. } => {
                    method.declaring_class()
                }
                MemberHandle::Field(field) => field.declaring_class(),
            };
            if let Some(found) = resolve_declared(
                &resolver,
                registry,
                class,
                declaring,
                handle.declared_type(),
            )? {
                return Ok(Some(found));
            }
        }

        let Some(field) = class.field(attribute) else {
            return Ok(None);
        };
        if let Some(found) = resolve_declared(
            &resolver,
            registry,
            class,
            field.declaring_class(),
            field.declared_type(),
        )? {
            return Ok(Some(found));
        }

        Ok(field.default_value().and_then(infer_from_default))
    }
}

impl core::fmt::Debug for AttributeTypeExtractor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AttributeTypeExtractor")
            .field("members", &self.members)
            .field("cached", &self.cached_len())
            .finish()
    }
}

/// Resolves a declared type; unsupported shapes yield `None`.
fn resolve_declared(
    resolver: &TypeResolver<'_>,
    registry: &ClassRegistry,
    class: &'static ClassInfo,
    declaring: Option<&'static str>,
    ty: Option<&ReflectedType>,
) -> Result<Option<TypeDescriptor>, TypeError> {
    let Some(ty) = ty else {
        return Ok(None);
    };
    let context = TypeContext::for_member(registry, declaring.unwrap_or(class.name()), class.name());
    match resolver.resolve(ty, Some(&context)) {
        Ok(found) => Ok(Some(found)),
        Err(TypeError::Unsupported(_)) => Ok(None),
        Err(error) => Err(error),
    }
}

fn infer_from_default(value: &Value) -> Option<TypeDescriptor> {
    let builtin = match value {
        Value::Null => return None,
        Value::Bool(_) => BuiltinType::Bool,
        Value::Int(_) => BuiltinType::Int,
        Value::Float(_) => BuiltinType::Float,
        Value::String(_) => BuiltinType::String,
        Value::List(_) | Value::Map(_) => BuiltinType::Array,
        Value::Object(_) | Value::Collection(_) => BuiltinType::Object,
    };
    Some(TypeDescriptor::builtin(builtin))
}

#[cfg(test)]
mod tests {
    use super::AttributeTypeExtractor;
    use crate::relation::{RelationshipDescriptor, RelationshipMap};
    use om_reflect::info::{ClassInfo, FieldInfo, MethodInfo, ParamInfo};
    use om_reflect::registry::ClassRegistry;
    use om_reflect::types::{BuiltinType, TypeDescriptor, TypeError};
    use om_reflect::{ClassInfoCell, Typed};

    #[derive(Default)]
    struct Node {
        label: String,
        weight: i64,
    }

    impl Typed for Node {
        fn class_info() -> &'static ClassInfo {
            static CELL: ClassInfoCell = ClassInfoCell::new();
            CELL.get_or_init(|| {
                ClassInfo::new::<Self>("Node")
                    .with_parent("Base")
                    .with_field(FieldInfo::new("label").protected().with_type("string"))
                    .with_field(FieldInfo::new("weight").protected().with_type("float"))
                    .with_field(FieldInfo::new("next").protected().with_type("?self"))
                    .with_field(FieldInfo::new("odd").with_type("int|(A&"))
                    .with_field(FieldInfo::new("owner").protected())
                    .with_method(
                        MethodInfo::getter("getLabel", |n: &Node| n.label.clone().into())
                            .with_return_type("?string"),
                    )
                    .with_method(MethodInfo::setter(
                        "setLabel",
                        ParamInfo::typed("label", "string"),
                        |n: &mut Node, label: String| n.label = label,
                    ))
                    .with_method(MethodInfo::setter(
                        "setWeight",
                        ParamInfo::new("weight"),
                        |n: &mut Node, weight: i64| n.weight = weight,
                    ))
                    .with_method(MethodInfo::setter(
                        "setOwner",
                        ParamInfo::typed("owner", "parent"),
                        |_: &mut Node, _: om_reflect::value::Value| {},
                    ))
            })
        }
    }

    fn builtin(builtin: BuiltinType) -> TypeDescriptor {
        TypeDescriptor::builtin(builtin)
    }

    #[test]
    fn mutator_parameter_wins() {
        let extractor = AttributeTypeExtractor::new();
        let found = extractor
            .get_type(&ClassRegistry::new(), Node::class_info(), "label", &RelationshipMap::default())
            .unwrap();
        assert_eq!(found, Some(builtin(BuiltinType::String)));
    }

    #[test]
    fn untyped_mutator_falls_through_to_field() {
        let extractor = AttributeTypeExtractor::new();
        let found = extractor
            .get_type(&ClassRegistry::new(), Node::class_info(), "weight", &RelationshipMap::default())
            .unwrap();
        assert_eq!(found, Some(builtin(BuiltinType::Float)));
    }

    #[test]
    fn keywords_resolve_against_the_class() {
        let mut registry = ClassRegistry::new();
        registry.register::<Node>();
        let extractor = AttributeTypeExtractor::new();
        let relations = RelationshipMap::default();

        assert_eq!(
            extractor.get_type(&registry, Node::class_info(), "next", &relations),
            Ok(Some(TypeDescriptor::nullable(TypeDescriptor::object("Node"))))
        );
        assert_eq!(
            extractor.get_type(&registry, Node::class_info(), "owner", &relations),
            Ok(Some(TypeDescriptor::object("Base")))
        );
    }

    #[test]
    fn missing_parent_is_an_error() {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        let orphan = CELL.get_or_init(|| {
            ClassInfo::named("Orphan").with_field(FieldInfo::new("up").with_type("parent"))
        });
        let mut registry = ClassRegistry::new();
        registry.register_info(orphan);

        let result = AttributeTypeExtractor::new().get_type(
            &registry,
            orphan,
            "up",
            &RelationshipMap::default(),
        );
        assert_eq!(
            result,
            Err(TypeError::InvalidContext {
                keyword: "parent",
                class: Some("Orphan"),
            })
        );
    }

    #[test]
    fn unsupported_and_relationships_are_unknown() {
        let extractor = AttributeTypeExtractor::new();
        let registry = ClassRegistry::new();
        let mut relations = RelationshipMap::default();

        assert_eq!(
            extractor.get_type(&registry, Node::class_info(), "odd", &relations),
            Ok(None)
        );

        relations.insert(
            "label".into(),
            RelationshipDescriptor::One {
                target: "Label".into(),
                column: "label_id".into(),
            },
        );
        assert_eq!(
            extractor.get_type(&registry, Node::class_info(), "label", &relations),
            Ok(None)
        );
    }
}
