//! `serde` support for [`Value`](crate::value::Value).
//!
//! A normalized map is plain data and can be handed to any encoder:
//!
//! ```
//! use om_reflect::value::{Value, ValueMap};
//!
//! let mut map = ValueMap::default();
//! map.insert("id".into(), Value::from(3));
//! map.insert("tags".into(), Value::from(vec![Value::from("a"), Value::Null]));
//!
//! let json = serde_json::to_string(&Value::Map(map)).unwrap();
//! assert_eq!(json, r#"{"id":3,"tags":["a",null]}"#);
//!
//! let back: Value = serde_json::from_str(&json).unwrap();
//! assert_eq!(back.as_map().unwrap().get("id"), Some(&Value::from(3)));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

#[cfg(test)]
mod tests {
    use crate::value::{Collection, Value, ValueMap};

    #[test]
    fn key_order_survives_json() {
        let json = r#"{"zeta":1,"alpha":[true,1.5],"mid":{"x":null}}"#;
        let value: Value = serde_json::from_str(json).unwrap();

        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&value).unwrap(), json);
    }

    #[test]
    fn attached_values_refuse_to_serialize() {
        let mut map = ValueMap::default();
        map.insert("members".into(), Value::Collection(Collection::new()));
        assert!(serde_json::to_string(&Value::Map(map)).is_err());
    }

    #[test]
    fn large_unsigned_is_rejected() {
        assert!(serde_json::from_str::<Value>("18446744073709551615").is_err());
        assert_eq!(
            serde_json::from_str::<Value>("9").unwrap(),
            Value::Int(9)
        );
    }
}
