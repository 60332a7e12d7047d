//! Structural checks run before anything is written.
//!
//! `check_shape` walks the serialized document against a fixed shape and
//! reports the first mismatch by path (`data.roles["…#alert"].name`).
//! `check_references` then makes sure every cross reference resolves.

use std::sync::LazyLock;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ExtractError;
use crate::model::AriaData;

pub enum Shape {
    String,
    Boolean,
    /// Absent, `null`, or the inner shape.
    Maybe(Box<Shape>),
    /// Absent or the inner shape. `null` is rejected so an explicit null
    /// can't be read back as a missing key.
    Omittable(Box<Shape>),
    ArrayOf(Box<Shape>),
    /// Object with arbitrary keys, every value of the inner shape.
    ObjectOf(Box<Shape>),
    /// Object with exactly these fields.
    Record(Vec<(&'static str, Shape)>),
}

fn maybe(inner: Shape) -> Shape {
    Shape::Maybe(Box::new(inner))
}

fn omittable(inner: Shape) -> Shape {
    Shape::Omittable(Box::new(inner))
}

fn array_of(inner: Shape) -> Shape {
    Shape::ArrayOf(Box::new(inner))
}

fn object_of(inner: Shape) -> Shape {
    Shape::ObjectOf(Box::new(inner))
}

pub static DATA_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    Shape::Record(vec![
        (
            "roles",
            object_of(Shape::Record(vec![
                ("ref", Shape::String),
                ("name", Shape::String),
                ("description", maybe(Shape::String)),
                ("abstract", Shape::Boolean),
                ("superClassRoles", array_of(Shape::String)),
                ("attributes", array_of(Shape::String)),
            ])),
        ),
        (
            "valueTypes",
            object_of(Shape::Record(vec![
                ("ref", Shape::String),
                ("name", Shape::String),
                ("description", maybe(Shape::String)),
            ])),
        ),
        (
            "attributes",
            object_of(Shape::Record(vec![
                ("ref", Shape::String),
                ("name", Shape::String),
                ("description", maybe(Shape::String)),
                ("valueType", Shape::String),
                (
                    "values",
                    omittable(array_of(Shape::Record(vec![
                        ("value", Shape::String),
                        ("isDefault", Shape::Boolean),
                        ("description", maybe(Shape::String)),
                    ]))),
                ),
            ])),
        ),
    ])
});

/// Shape check, then reference check. Returns the typed data on success.
pub fn validate(value: &Value) -> Result<AriaData, ExtractError> {
    check_shape(value, &DATA_SHAPE, "data")?;
    let data = AriaData::deserialize(value).map_err(|e| ExtractError::Shape {
        path: "data".to_string(),
        expected: e.to_string(),
    })?;
    check_references(&data)?;
    Ok(data)
}

pub fn check_shape(value: &Value, shape: &Shape, path: &str) -> Result<(), ExtractError> {
    let mismatch = |expected: &str| ExtractError::Shape {
        path: path.to_string(),
        expected: expected.to_string(),
    };

    match shape {
        Shape::String => value.is_string().then_some(()).ok_or_else(|| mismatch("string")),
        Shape::Boolean => value.is_boolean().then_some(()).ok_or_else(|| mismatch("boolean")),
        Shape::Maybe(inner) => match value {
            Value::Null => Ok(()),
            _ => check_shape(value, inner, path),
        },
        Shape::Omittable(inner) => check_shape(value, inner, path),
        Shape::ArrayOf(inner) => {
            let items = value.as_array().ok_or_else(|| mismatch("array"))?;
            for (i, item) in items.iter().enumerate() {
                check_shape(item, inner, &format!("{}[{}]", path, i))?;
            }
            Ok(())
        }
        Shape::ObjectOf(inner) => {
            let entries = value.as_object().ok_or_else(|| mismatch("object"))?;
            for (key, item) in entries {
                check_shape(item, inner, &format!("{}[{:?}]", path, key))?;
            }
            Ok(())
        }
        Shape::Record(fields) => {
            let entries = value.as_object().ok_or_else(|| mismatch("object"))?;
            for (name, field_shape) in fields {
                let field_path = format!("{}.{}", path, name);
                match entries.get(*name) {
                    Some(v) => check_shape(v, field_shape, &field_path)?,
                    None if matches!(field_shape, Shape::Maybe(_) | Shape::Omittable(_)) => {}
                    None => {
                        return Err(ExtractError::Shape {
                            path: field_path,
                            expected: expected_name(field_shape).to_string(),
                        })
                    }
                }
            }
            if let Some(extra) = entries.keys().find(|k| !fields.iter().any(|(n, _)| n == k)) {
                return Err(ExtractError::Shape {
                    path: format!("{}.{}", path, extra),
                    expected: "no such field".to_string(),
                });
            }
            Ok(())
        }
    }
}

fn expected_name(shape: &Shape) -> &'static str {
    match shape {
        Shape::String => "string",
        Shape::Boolean => "boolean",
        Shape::Maybe(_) | Shape::Omittable(_) => "optional value",
        Shape::ArrayOf(_) => "array",
        Shape::ObjectOf(_) | Shape::Record(_) => "object",
    }
}

/// roles → roles, roles → attributes, attributes → value types.
pub fn check_references(data: &AriaData) -> Result<(), ExtractError> {
    for (key, role) in &data.roles {
        for (i, parent) in role.super_class_roles.iter().enumerate() {
            if !data.roles.contains_key(parent) {
                return Err(broken(format!("data.roles[{:?}].superClassRoles[{}]", key, i), parent));
            }
        }
        for (i, attr) in role.attributes.iter().enumerate() {
            if !data.attributes.contains_key(attr) {
                return Err(broken(format!("data.roles[{:?}].attributes[{}]", key, i), attr));
            }
        }
    }
    for (key, attr) in &data.attributes {
        if !data.value_types.contains_key(&attr.value_type) {
            return Err(broken(
                format!("data.attributes[{:?}].valueType", key),
                &attr.value_type,
            ));
        }
    }
    Ok(())
}

fn broken(path: String, target: &str) -> ExtractError {
    ExtractError::BrokenReference {
        path,
        target: target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "roles": {
                "u#alert": {
                    "ref": "u#alert",
                    "name": "alert",
                    "description": null,
                    "abstract": false,
                    "superClassRoles": [],
                    "attributes": ["u#aria-live"]
                }
            },
            "valueTypes": {
                "u#valuetype_token": { "ref": "u#valuetype_token", "name": "token", "description": "One of a set." }
            },
            "attributes": {
                "u#aria-live": {
                    "ref": "u#aria-live",
                    "name": "aria-live",
                    "description": null,
                    "valueType": "u#valuetype_token",
                    "values": [{ "value": "off", "isDefault": true, "description": null }]
                }
            }
        })
    }

    fn shape_error(value: &Value) -> (String, String) {
        match validate(value) {
            Err(ExtractError::Shape { path, expected }) => (path, expected),
            other => panic!("expected shape error, got {:?}", other.map(|d| d.summary())),
        }
    }

    #[test]
    fn accepts_well_formed_document() {
        let data = validate(&sample()).unwrap();
        assert_eq!(data.roles.len(), 1);
    }

    #[test]
    fn rejects_missing_top_level_attributes() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("attributes");
        assert_eq!(shape_error(&value), ("data.attributes".to_string(), "object".to_string()));
    }

    #[test]
    fn reports_nested_path() {
        let mut value = sample();
        value["attributes"]["u#aria-live"]["values"][0]["isDefault"] = json!("yes");
        assert_eq!(
            shape_error(&value),
            (
                r#"data.attributes["u#aria-live"].values[0].isDefault"#.to_string(),
                "boolean".to_string()
            )
        );
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut value = sample();
        value["attributes"]["u#aria-live"].as_object_mut().unwrap().remove("values");
        value["roles"]["u#alert"].as_object_mut().unwrap().remove("description");
        assert!(validate(&value).is_ok());
    }

    #[test]
    fn null_values_is_not_absent() {
        let mut value = sample();
        value["attributes"]["u#aria-live"]["values"] = Value::Null;
        assert_eq!(
            shape_error(&value),
            (r#"data.attributes["u#aria-live"].values"#.to_string(), "array".to_string())
        );
    }

    #[test]
    fn required_name_must_be_present() {
        let mut value = sample();
        value["roles"]["u#alert"].as_object_mut().unwrap().remove("name");
        assert_eq!(
            shape_error(&value),
            (r#"data.roles["u#alert"].name"#.to_string(), "string".to_string())
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut value = sample();
        value["extra"] = json!({});
        assert_eq!(shape_error(&value).0, "data.extra");
    }

    #[test]
    fn broken_value_type_reference() {
        let mut value = sample();
        value["attributes"]["u#aria-live"]["valueType"] = json!("u#valuetype_nope");
        match validate(&value) {
            Err(ExtractError::BrokenReference { path, target }) => {
                assert_eq!(path, r#"data.attributes["u#aria-live"].valueType"#);
                assert_eq!(target, "u#valuetype_nope");
            }
            other => panic!("expected broken reference, got {:?}", other.map(|d| d.summary())),
        }
    }

    #[test]
    fn broken_parent_reference() {
        let mut value = sample();
        value["roles"]["u#alert"]["superClassRoles"] = json!(["u#section"]);
        assert!(matches!(
            validate(&value),
            Err(ExtractError::BrokenReference { .. })
        ));
    }
}
