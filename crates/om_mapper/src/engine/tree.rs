use om_reflect::Reflect;
use om_reflect::value::{Value, ValueMap};
use om_utils::hash::HashSet;

use super::MappingEngine;
use crate::diagnostics::Diagnostics;
use crate::error::MapError;
use crate::options::MapOptions;

impl MappingEngine {
    /// Normalizes `object` and, recursively, every object its output embeds.
    ///
    /// Each nested object is normalized with its own context; lists and maps
    /// are walked. The result holds no [`Value::Object`] or
    /// [`Value::Collection`] and can be handed to any encoder.
    ///
    /// # Errors
    ///
    /// [`MapError::CircularReference`] if an object is reached again while it
    /// is still being normalized, plus every error of [`normalize`](Self::normalize).
    pub fn normalize_tree(&self, object: &dyn Reflect, options: &MapOptions) -> Result<ValueMap, MapError> {
        self.normalize_tree_with_diagnostics(object, options, &mut Diagnostics::new())
    }

    /// [`normalize_tree`](Self::normalize_tree), recording skipped relationship members.
    pub fn normalize_tree_with_diagnostics(
        &self,
        object: &dyn Reflect,
        options: &MapOptions,
        diagnostics: &mut Diagnostics,
    ) -> Result<ValueMap, MapError> {
        let mut walk = TreeWalk {
            engine: self,
            options,
            diagnostics,
            visiting: HashSet::default(),
        };
        walk.object(object)
    }
}

struct TreeWalk<'a> {
    engine: &'a MappingEngine,
    options: &'a MapOptions,
    diagnostics: &'a mut Diagnostics,
    // Addresses of the objects on the current path.
    visiting: HashSet<usize>,
}

impl TreeWalk<'_> {
    fn object(&mut self, object: &dyn Reflect) -> Result<ValueMap, MapError> {
        let addr = core::ptr::from_ref(object).cast::<()>() as usize;
        if !self.visiting.insert(addr) {
            return Err(MapError::CircularReference {
                class: object.class_name(),
            });
        }

        let flat = self
            .engine
            .normalize_with_diagnostics(object, self.options, self.diagnostics)?;
        let mut data = ValueMap::with_capacity_and_hasher(flat.len(), Default::default());
        for (attribute, value) in flat {
            data.insert(attribute, self.value(value)?);
        }

        self.visiting.remove(&addr);
        Ok(data)
    }

    fn value(&mut self, value: Value) -> Result<Value, MapError> {
        Ok(match value {
            Value::Object(object) => Value::Map(self.object(object.as_reflect())?),
            Value::Collection(collection) => Value::List(
                collection
                    .values()
                    .iter()
                    .map(|member| self.object(member.as_reflect()).map(Value::Map))
                    .collect::<Result<_, _>>()?,
            ),
            Value::List(list) => Value::List(
                list.into_iter()
                    .map(|item| self.value(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(map) => {
                let mut nested = ValueMap::with_capacity_and_hasher(map.len(), Default::default());
                for (key, item) in map {
                    nested.insert(key, self.value(item)?);
                }
                Value::Map(nested)
            }
            scalar => scalar,
        })
    }
}
