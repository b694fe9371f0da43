use alloc::format;
use alloc::string::String;

use om_reflect::Reflect;
use om_reflect::value::{Value, ValueMap};

use super::{MappingEngine, NormalizationContext};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::MapError;
use crate::options::MapOptions;
use crate::relation::{RelationshipDescriptor, RelationshipValue};

impl MappingEngine {
    /// Populates `target` from `data`, as an instance of `class`.
    ///
    /// - `one` relationships accept an object of the target class, or an
    ///   identifier looked up in the store; an empty value clears them.
    /// - Owning `many` relationships are cleared and refilled from the input
    ///   sequence, in order. Inverse sides are never written.
    /// - Plain attributes are coerced to their expected type when it is known,
    ///   then written through a mutator or a writable public field.
    ///
    /// Unresolvable identifiers, unknown or filtered keys and rejected nulls
    /// are skipped; see [`denormalize_with_diagnostics`](Self::denormalize_with_diagnostics).
    ///
    /// # Errors
    ///
    /// - [`MapError::UnknownClass`] if `class` is not registered.
    /// - [`MapError::TargetMismatch`] if `target` is not an instance of `class`.
    /// - [`MapError::InvalidContext`] if a declared type uses `parent` in a class without one.
    pub fn denormalize(
        &self,
        data: ValueMap,
        class: &str,
        target: &mut dyn Reflect,
        options: &MapOptions,
    ) -> Result<(), MapError> {
        self.denormalize_with_diagnostics(data, class, target, options, &mut Diagnostics::new())
    }

    /// [`denormalize`](Self::denormalize), recording every skipped key.
    pub fn denormalize_with_diagnostics(
        &self,
        data: ValueMap,
        class: &str,
        target: &mut dyn Reflect,
        options: &MapOptions,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), MapError> {
        let info = self
            .registry
            .get(class)
            .ok_or_else(|| MapError::UnknownClass(String::from(class)))?;
        let target_class = target.reflect_class_info();
        if !self.registry.is_subclass_of(target_class.name(), info.name()) {
            return Err(MapError::TargetMismatch {
                expected: info.name(),
                found: target_class.name(),
            });
        }

        let context = self.build_context(info, options);

        for (attribute, value) in data {
            if !self.filter.is_attribute_allowed(target_class, &attribute, &context) {
                diagnostics.record(
                    DiagnosticKind::FilteredAttribute,
                    target_class.name(),
                    &attribute,
                    "rejected by the attribute filter",
                );
                continue;
            }

            match context.relationship(&attribute) {
                Some(RelationshipDescriptor::One { target: related, .. }) => {
                    self.write_one(target, &attribute, value, related, diagnostics);
                }
                Some(RelationshipDescriptor::Many {
                    target: related,
                    owning_side: true,
                }) => {
                    self.write_many(target, &attribute, value, related, diagnostics);
                }
                Some(RelationshipDescriptor::Many { .. }) => {
                    diagnostics.record(
                        DiagnosticKind::NonOwningSide,
                        target_class.name(),
                        &attribute,
                        "inverse side of the relationship is never written",
                    );
                }
                None => self.write_plain(target, &attribute, value, &context, diagnostics)?,
            }
        }
        Ok(())
    }

    fn write_one(
        &self,
        object: &mut dyn Reflect,
        attribute: &str,
        value: Value,
        related: &str,
        diagnostics: &mut Diagnostics,
    ) {
        let value = match RelationshipValue::single(value, related, &self.registry) {
            RelationshipValue::SingleId(id) => match self.find(related, &id) {
                Some(found) => Value::Object(found),
                None => {
                    diagnostics.record(
                        DiagnosticKind::IdentifierNotFound,
                        object.class_name(),
                        attribute,
                        format!("no `{related}` with identifier {id:?}"),
                    );
                    return;
                }
            },
            other => other.into_value(),
        };
        self.set_property(object, attribute, value, diagnostics);
    }

    fn write_many(
        &self,
        object: &mut dyn Reflect,
        attribute: &str,
        value: Value,
        related: &str,
        diagnostics: &mut Diagnostics,
    ) {
        let class = object.class_name();
        let collection = match self.read_property(object, attribute) {
            Ok(Value::Collection(collection)) => collection,
            Ok(other) => {
                diagnostics.record(
                    DiagnosticKind::WriteFailed,
                    class,
                    attribute,
                    format!("expected a collection, found {}", other.kind()),
                );
                return;
            }
            Err(error) => {
                diagnostics.record(DiagnosticKind::WriteFailed, class, attribute, format!("{error}"));
                return;
            }
        };

        collection.clear();
        if value.is_empty() {
            return;
        }

        for element in value.into_sequence() {
            match RelationshipValue::reference(element, related, &self.registry) {
                RelationshipValue::SingleRef(found) => collection.push(found),
                RelationshipValue::SingleId(id) => match self.find(related, &id) {
                    Some(found) => collection.push(found),
                    None => diagnostics.record(
                        DiagnosticKind::IdentifierNotFound,
                        class,
                        attribute,
                        format!("no `{related}` with identifier {id:?}"),
                    ),
                },
                _ => {}
            }
        }
    }

    fn write_plain(
        &self,
        object: &mut dyn Reflect,
        attribute: &str,
        value: Value,
        context: &NormalizationContext,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), MapError> {
        let class = object.reflect_class_info();
        let expected = self
            .extractor
            .get_type(&self.registry, class, attribute, context.relationships())
            .map_err(|source| MapError::InvalidContext {
                class: class.name(),
                attribute: String::from(attribute),
                source,
            })?;

        // Null goes straight to the member, which decides whether to accept it.
        let value = match expected {
            Some(ty) if !value.is_null() => match self.coercer.coerce(&ty, value, &self.registry) {
                Ok(coerced) => coerced,
                Err(error) => {
                    diagnostics.record(
                        DiagnosticKind::CoercionFailed,
                        class.name(),
                        attribute,
                        format!("{error}"),
                    );
                    return Ok(());
                }
            },
            _ => value,
        };

        self.set_property(object, attribute, value, diagnostics);
        Ok(())
    }
}
