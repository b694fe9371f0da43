use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::info::ReflectedType;
use crate::registry::ClassRegistry;
use crate::types::{BuiltinType, TypeContext, TypeDescriptor, TypeError};

/// Normalizes declared types into [`TypeDescriptor`]s.
///
/// - Unions and intersections resolve their members recursively.
/// - `array` and `iterable` become collection descriptors, wrapped in
///   `Nullable` when the declaration allows null.
/// - `null` and `mixed` are never wrapped.
/// - `self`, `static` and `parent` are looked up in the [`TypeContext`];
///   without one the resolution fails with [`TypeError::InvalidContext`].
/// - Class names registered as enumerations become enum descriptors; every
///   other class name an object descriptor.
///
/// # Examples
///
/// ```
/// use om_reflect::info::{ClassInfo, ReflectedType};
/// use om_reflect::registry::ClassRegistry;
/// use om_reflect::types::{TypeContext, TypeDescriptor, TypeError, TypeResolver};
///
/// # use om_reflect::ClassInfoCell;
/// # static STATUS: ClassInfoCell = ClassInfoCell::new();
/// let mut registry = ClassRegistry::new();
/// registry.register_info(STATUS.get_or_init(|| ClassInfo::named("Status").enumeration()));
///
/// let resolver = TypeResolver::new(&registry);
///
/// let status = resolver.resolve(&ReflectedType::parse("?Status"), None).unwrap();
/// assert_eq!(status, TypeDescriptor::nullable(TypeDescriptor::enumeration("Status")));
///
/// let this = resolver.resolve(&ReflectedType::parse("self"), None);
/// assert!(matches!(this, Err(TypeError::InvalidContext { keyword: "self", .. })));
///
/// let context = TypeContext::new("Post", "Post");
/// let this = resolver.resolve(&ReflectedType::parse("self"), Some(&context)).unwrap();
/// assert_eq!(this, TypeDescriptor::object("Post"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'r> {
    registry: &'r ClassRegistry,
}

impl<'r> TypeResolver<'r> {
    #[inline]
    pub const fn new(registry: &'r ClassRegistry) -> Self {
        Self { registry }
    }

    /// Resolves a declared type.
    pub fn resolve(
        &self,
        ty: &ReflectedType,
        context: Option<&TypeContext>,
    ) -> Result<TypeDescriptor, TypeError> {
        match ty {
            ReflectedType::Union(members) => {
                let members = members
                    .iter()
                    .map(|member| self.resolve(member, context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::union(members))
            }
            ReflectedType::Intersection(members) => {
                let members = members
                    .iter()
                    .map(|member| self.resolve(member, context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::intersection(members))
            }
            ReflectedType::Named {
                name,
                builtin: true,
                allows_null,
            } => {
                let builtin = name.parse::<BuiltinType>()?;
                let descriptor = TypeDescriptor::builtin(builtin);
                Ok(wrap(descriptor, *allows_null))
            }
            ReflectedType::Named {
                name, allows_null, ..
            } => {
                let class = self.resolve_class_name(name, context)?;
                let descriptor = if self.registry.is_enum(&class) {
                    TypeDescriptor::Enum(class)
                } else {
                    TypeDescriptor::Object(class)
                };
                Ok(wrap(descriptor, *allows_null))
            }
            ReflectedType::Other(description) => {
                Err(TypeError::Unsupported(description.to_string()))
            }
        }
    }

    fn resolve_class_name(
        &self,
        name: &str,
        context: Option<&TypeContext>,
    ) -> Result<String, TypeError> {
        let keyword = match name.to_ascii_lowercase().as_str() {
            "self" => "self",
            "static" => "static",
            "parent" => "parent",
            _ => return Ok(String::from(name)),
        };

        let Some(context) = context else {
            return Err(TypeError::InvalidContext {
                keyword,
                class: None,
            });
        };

        let class = match keyword {
            "self" => context.declaring_class(),
            "static" => context.called_class(),
            _ => context.parent_class().ok_or(TypeError::InvalidContext {
                keyword,
                class: Some(context.declaring_class()),
            })?,
        };
        Ok(String::from(class))
    }
}

fn wrap(descriptor: TypeDescriptor, allows_null: bool) -> TypeDescriptor {
    if allows_null {
        TypeDescriptor::nullable(descriptor)
    } else {
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::TypeResolver;
    use crate::ClassInfoCell;
    use crate::info::{ClassInfo, ReflectedType};
    use crate::registry::ClassRegistry;
    use crate::types::{BuiltinType, TypeContext, TypeDescriptor, TypeError};

    static SUIT: ClassInfoCell = ClassInfoCell::new();

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.register_info(SUIT.get_or_init(|| ClassInfo::named("Suit").enumeration()));
        registry
    }

    fn resolve(declaration: &str, context: Option<&TypeContext>) -> Result<TypeDescriptor, TypeError> {
        let registry = registry();
        TypeResolver::new(&registry).resolve(&ReflectedType::parse(declaration), context)
    }

    #[test]
    fn builtins() {
        assert_eq!(
            resolve("int", None),
            Ok(TypeDescriptor::builtin(BuiltinType::Int))
        );
        assert_eq!(
            resolve("?array", None),
            Ok(TypeDescriptor::nullable(TypeDescriptor::Array))
        );
        assert_eq!(
            resolve("mixed", None),
            Ok(TypeDescriptor::builtin(BuiltinType::Mixed))
        );
        assert_eq!(
            resolve("null", None),
            Ok(TypeDescriptor::builtin(BuiltinType::Null))
        );
    }

    #[test]
    fn classes_and_enums() {
        assert_eq!(resolve("User", None), Ok(TypeDescriptor::object("User")));
        assert_eq!(resolve("Suit", None), Ok(TypeDescriptor::enumeration("Suit")));
        assert_eq!(
            resolve("Suit|int", None),
            Ok(TypeDescriptor::Union(vec![
                TypeDescriptor::enumeration("Suit"),
                TypeDescriptor::builtin(BuiltinType::Int),
            ]))
        );
    }

    #[test]
    fn contextual_keywords() {
        let context = TypeContext::new("Post", "DraftPost").with_parent("Content");

        assert_eq!(resolve("self", Some(&context)), Ok(TypeDescriptor::object("Post")));
        assert_eq!(
            resolve("?static", Some(&context)),
            Ok(TypeDescriptor::nullable(TypeDescriptor::object("DraftPost")))
        );
        assert_eq!(resolve("Parent", Some(&context)), Ok(TypeDescriptor::object("Content")));

        assert_eq!(
            resolve("parent", Some(&TypeContext::new("Post", "Post"))),
            Err(TypeError::InvalidContext {
                keyword: "parent",
                class: Some("Post"),
            })
        );
        assert!(resolve("static|int", None).is_err_and(|err| err.is_invalid_context()));
    }

    #[test]
    fn unsupported_shapes() {
        assert!(matches!(
            resolve("list<int>", None),
            Err(TypeError::Unsupported(_))
        ));
    }
}
