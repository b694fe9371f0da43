use om_reflect::info::ClassInfo;

use crate::options::MapOptions;
use crate::relation::{RelationshipDescriptor, RelationshipMap};

/// The state of one normalize or denormalize call.
///
/// Built at the start of every call and dropped at its end; it is passed
/// down explicitly and never stored in the engine.
#[derive(Debug, Clone)]
pub struct NormalizationContext {
    class: &'static ClassInfo,
    relationships: RelationshipMap,
    options: MapOptions,
}

impl NormalizationContext {
    /// A context for `class`, with options already merged over the defaults.
    pub fn new(class: &'static ClassInfo, relationships: RelationshipMap, options: MapOptions) -> Self {
        Self {
            class,
            relationships,
            options,
        }
    }

    /// Returns the class the relationship schema belongs to.
    #[inline]
    pub const fn class(&self) -> &'static ClassInfo {
        self.class
    }

    #[inline]
    pub const fn relationships(&self) -> &RelationshipMap {
        &self.relationships
    }

    #[inline]
    pub fn relationship(&self, attribute: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.get(attribute)
    }

    #[inline]
    pub const fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Returns `true` in form mode.
    #[inline]
    pub fn form_mode(&self) -> bool {
        self.options.collapses_relationships_to_identifiers()
    }
}
