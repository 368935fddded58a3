//! Object to tree rendering

use super::context::SerializeContext;
use crate::error::MappingResult;
use crate::registry::GraphObject;
use serde_json::{Map, Value};
use tracing::trace;

/// Render a declared object type as a JSON object
///
/// Fields are written in registry order. `None` fields become `null` unless
/// null values are ignored. When several fields share a key the last one
/// written wins; an ignored null never overwrites an earlier value.
///
/// # Errors
///
/// Registry configuration errors, or `MappingError::Unrepresentable` for a
/// field value with no JSON form.
pub fn serialize_object<T: GraphObject>(object: &T, cx: &SerializeContext<'_>) -> MappingResult<Value> {
    let entry = cx.mapper().registry().entry::<T>()?;
    let mut properties = Map::with_capacity(entry.tags().len());

    for tag in entry.tags() {
        let value = tag.render(object, cx)?;
        if value.is_null() && cx.ignore_null_values() {
            continue;
        }
        let key = tag.json_key().as_str();
        if entry.is_shared_key(tag.json_key()) && properties.contains_key(key) {
            trace!(
                owner = tag.owner(),
                field = tag.field_name(),
                key,
                "overwriting value of shared JSON key"
            );
        }
        properties.insert(key.to_owned(), value);
    }

    Ok(Value::Object(properties))
}

#[cfg(test)]
mod tests {
    use crate::mapper::SerializeOptions;
    use crate::{JsonMapper, graph_object};
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Checkin {
        message: Option<String>,
        place: Option<String>,
        place_id: Option<i64>,
    }

    graph_object!(Checkin {
        message,
        place,
        place_id => "place",
    });

    #[test]
    fn test_nulls_kept_by_default() {
        let mapper = JsonMapper::new();
        let value = mapper.to_value(&Checkin::default()).unwrap();
        assert_eq!(value, json!({"message": null, "place": null}));
    }

    #[test]
    fn test_ignore_null_values() {
        let mapper = JsonMapper::new();
        let checkin = Checkin {
            place: Some("Cafe".to_string()),
            ..Checkin::default()
        };
        let text = mapper
            .to_json_with(&checkin, SerializeOptions { ignore_null_values: true })
            .unwrap();
        assert_eq!(text, r#"{"place":"Cafe"}"#);
    }

    #[test]
    fn test_shared_key_last_write_wins() {
        let mapper = JsonMapper::new();
        let checkin = Checkin {
            message: Some("hi".to_string()),
            place: Some("Cafe".to_string()),
            place_id: Some(7),
        };
        let value = mapper.to_value(&checkin).unwrap();
        assert_eq!(value, json!({"message": "hi", "place": 7}));
    }
}
