//! The attribute-filtering collaborator.
//!
//! An [`AttributeFilter`] decides which attribute names are eligible before
//! any relationship or type logic runs, for both directions.

use alloc::vec::Vec;

use om_reflect::info::ClassInfo;

use crate::engine::NormalizationContext;
use crate::markers::Groups;

/// Decides which attributes a call may touch.
pub trait AttributeFilter: Send + Sync {
    /// Returns `true` if `attribute` of `class` is eligible.
    fn is_attribute_allowed(
        &self,
        class: &'static ClassInfo,
        attribute: &str,
        context: &NormalizationContext,
    ) -> bool;

    /// Returns the attributes to normalize instead of the public and
    /// protected instance fields, or `None` to keep those.
    ///
    /// The returned names still pass through [`is_attribute_allowed`](Self::is_attribute_allowed)
    /// and need an accessor, so a filter may list attributes only reachable
    /// through accessor methods.
    fn allowed_attributes(
        &self,
        class: &'static ClassInfo,
        context: &NormalizationContext,
    ) -> Option<Vec<&'static str>> {
        let _ = (class, context);
        None
    }
}

/// Admits every attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AttributeFilter for AllowAll {
    #[inline]
    fn is_attribute_allowed(&self, _: &'static ClassInfo, _: &str, _: &NormalizationContext) -> bool {
        true
    }
}

/// Filters by ignored attributes and serialization [`Groups`].
///
/// - An ignored attribute is rejected.
/// - Without allowed groups, every other attribute is admitted.
/// - With allowed groups, only fields whose [`Groups`] marker shares one of
///   them are admitted, whatever their visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupFilter;

impl GroupFilter {
    fn in_allowed_group(class: &ClassInfo, attribute: &str, context: &NormalizationContext) -> bool {
        class
            .field(attribute)
            .and_then(|field| field.get_attribute::<Groups>())
            .is_some_and(|groups| groups.iter().any(|group| context.options().is_group_allowed(group)))
    }
}

impl AttributeFilter for GroupFilter {
    fn is_attribute_allowed(
        &self,
        class: &'static ClassInfo,
        attribute: &str,
        context: &NormalizationContext,
    ) -> bool {
        let options = context.options();
        if options.is_ignored(attribute) {
            return false;
        }
        !options.has_allowed_groups() || Self::in_allowed_group(class, attribute, context)
    }

    fn allowed_attributes(
        &self,
        class: &'static ClassInfo,
        context: &NormalizationContext,
    ) -> Option<Vec<&'static str>> {
        if !context.options().has_allowed_groups() {
            return None;
        }
        Some(
            class
                .fields()
                .filter(|field| !field.is_static())
                .map(|field| field.name())
                .filter(|name| Self::in_allowed_group(class, name, context))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{AllowAll, AttributeFilter, GroupFilter};
    use crate::engine::NormalizationContext;
    use crate::markers::Groups;
    use crate::options::MapOptions;
    use crate::relation::RelationshipMap;
    use om_reflect::ClassInfoCell;
    use om_reflect::info::{ClassInfo, FieldInfo};

    fn profile() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::named("Profile")
                .with_field(FieldInfo::new("name").with_attribute(Groups::new(["public"])))
                .with_field(FieldInfo::new("email").with_attribute(Groups::new(["admin"])))
                .with_field(FieldInfo::new("notes").private().with_attribute(Groups::new(["public"])))
                .with_field(FieldInfo::new("password"))
        })
    }

    fn context(options: MapOptions) -> NormalizationContext {
        NormalizationContext::new(profile(), RelationshipMap::default(), options)
    }

    #[test]
    fn no_groups_admit_all_but_ignored() {
        let context = context(MapOptions::new().with_ignored_attributes(["password"]));
        let class = profile();

        assert!(GroupFilter.is_attribute_allowed(class, "email", &context));
        assert!(!GroupFilter.is_attribute_allowed(class, "password", &context));
        assert!(GroupFilter.allowed_attributes(class, &context).is_none());
        assert!(AllowAll.is_attribute_allowed(class, "password", &context));
    }

    #[test]
    fn groups_select_marked_fields() {
        let context = context(MapOptions::new().with_allowed_groups(["public"]));
        let class = profile();

        assert!(GroupFilter.is_attribute_allowed(class, "name", &context));
        assert!(!GroupFilter.is_attribute_allowed(class, "email", &context));
        assert!(!GroupFilter.is_attribute_allowed(class, "password", &context));
        assert_eq!(
            GroupFilter.allowed_attributes(class, &context).unwrap(),
            ["name", "notes"]
        );
    }
}
