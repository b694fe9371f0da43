use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use om_reflect::Reflect;
use om_reflect::info::ClassInfo;
use om_reflect::value::{ObjectRef, Value, ValueMap};

use super::{MappingEngine, NormalizationContext};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::MapError;
use crate::options::MapOptions;
use crate::relation::{RelationshipDescriptor, RelationshipValue};

impl MappingEngine {
    /// Converts `object` into a flat map of its visible attributes.
    ///
    /// Keys follow declaration order. Collections become lists of their
    /// members, or of member identifiers in form mode; nested objects are
    /// left as [`Value::Object`] (see [`normalize_tree`](Self::normalize_tree)).
    ///
    /// Form mode also collapses a `one` relationship to the identifier of the
    /// related object when its class has a single identifier field. This goes
    /// further than collapsing collections only; an object without a usable
    /// identifier stays embedded.
    ///
    /// # Errors
    ///
    /// [`MapError::NoAccessorAvailable`] if an attribute that passed the
    /// filter cannot be read; [`MapError::Access`] if an accessor fails.
    pub fn normalize(&self, object: &dyn Reflect, options: &MapOptions) -> Result<ValueMap, MapError> {
        self.normalize_with_diagnostics(object, options, &mut Diagnostics::new())
    }

    /// [`normalize`](Self::normalize), recording skipped relationship members.
    pub fn normalize_with_diagnostics(
        &self,
        object: &dyn Reflect,
        options: &MapOptions,
        diagnostics: &mut Diagnostics,
    ) -> Result<ValueMap, MapError> {
        let class = object.reflect_class_info();
        let context = self.build_context(class, options);

        let mut data = ValueMap::default();
        for attribute in self.normalizable_attributes(class, &context) {
            let value = self.attribute_value(object, attribute, &context, diagnostics)?;
            data.insert(String::from(attribute), value);
        }
        Ok(data)
    }

    /// Returns the attributes of `class` a normalization reads, in order.
    pub fn normalizable_attributes(
        &self,
        class: &'static ClassInfo,
        context: &NormalizationContext,
    ) -> Vec<&'static str> {
        let candidates = self
            .filter
            .allowed_attributes(class, context)
            .unwrap_or_else(|| class.instance_attribute_names().collect());

        candidates
            .into_iter()
            .filter(|attribute| self.is_allowed_attribute(class, attribute, context))
            .collect()
    }

    /// Returns `true` if the filter admits `attribute`, a relationship is
    /// opted into deep normalization, and an accessor exists.
    pub fn is_allowed_attribute(
        &self,
        class: &'static ClassInfo,
        attribute: &str,
        context: &NormalizationContext,
    ) -> bool {
        if !self.filter.is_attribute_allowed(class, attribute, context) {
            return false;
        }
        if context.relationship(attribute).is_some()
            && !Self::supports_deep_normalization(class, attribute)
        {
            return false;
        }
        self.members().resolve_accessor(class, attribute).is_ok()
    }

    fn attribute_value(
        &self,
        object: &dyn Reflect,
        attribute: &str,
        context: &NormalizationContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<Value, MapError> {
        let class = object.reflect_class_info();
        let relationship = context.relationship(attribute);

        if relationship.is_some() && !Self::supports_deep_normalization(class, attribute) {
            return Err(MapError::DeepTraversalDisabled {
                class: class.name(),
                attribute: String::from(attribute),
            });
        }

        let value = self.read_property(object, attribute)?;
        let collapsed = match value {
            Value::Collection(collection) => {
                let members = collection.values();
                if context.form_mode() {
                    RelationshipValue::Identifiers(
                        members
                            .iter()
                            .filter_map(|member| self.single_identifier(member, attribute, diagnostics))
                            .collect(),
                    )
                } else {
                    RelationshipValue::Embedded(members)
                }
            }
            Value::Object(related)
                if context.form_mode()
                    && matches!(relationship, Some(RelationshipDescriptor::One { .. })) =>
            {
                match self.single_identifier(&related, attribute, diagnostics) {
                    Some(id) => RelationshipValue::SingleId(id),
                    None => RelationshipValue::SingleRef(related),
                }
            }
            other => return Ok(other),
        };
        Ok(collapsed.into_value())
    }

    /// Reads the identifier of `member` if its class has exactly one
    /// identifier field and the value is not null.
    fn single_identifier(
        &self,
        member: &ObjectRef,
        attribute: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Value> {
        let class = member.class_name();
        let fields = self.store.identifier_fields(class);
        let [field] = fields.as_slice() else {
            diagnostics.record(
                DiagnosticKind::CompositeIdentifier,
                class,
                attribute,
                format!("`{class}` has {} identifier fields", fields.len()),
            );
            return None;
        };

        match self.read_property(member.as_reflect(), field) {
            Ok(Value::Null) => None,
            Ok(id) => Some(id),
            Err(error) => {
                diagnostics.record(
                    DiagnosticKind::IdentifierNotFound,
                    class,
                    attribute,
                    format!("{error}"),
                );
                None
            }
        }
    }
}
