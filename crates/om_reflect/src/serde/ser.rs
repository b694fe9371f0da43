use serde_core::ser::{Error, SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::value::Value;

/// Scalars, lists and maps serialize as their natural data-model shapes.
///
/// Objects and collections are still attached to the object graph and must be
/// normalized first; they fail with a custom error.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::List(list) => {
                let mut state = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Self::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Self::Object(object) => Err(S::Error::custom(format_args!(
                "object of class `{}` must be normalized before serialization",
                object.class_name()
            ))),
            Self::Collection(_) => Err(S::Error::custom(
                "collection must be normalized before serialization",
            )),
        }
    }
}
