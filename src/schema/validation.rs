//! Shape checks for inbound payloads.
//!
//! These functions only look at JSON structure: object-ness, required fields
//! and field types. Structural rules of the tree (name validity, sibling
//! uniqueness, cycles) are enforced by [`GroupTree`](crate::tree::GroupTree)
//! when the decoded records are inserted.

use super::GROUPS_META_KEY;
use super::types::{FieldType, GROUP_OBJECT, ObjectSchema};
use crate::error::{SchemaViolation, ViolationResult};
use serde_json::{Map, Value};

/// Name of the JSON type of `value`, for diagnostics.
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the path of an array element, e.g. `groups[2]`.
pub fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

/// Build the path of an object field, e.g. `groups[2].parent`.
pub fn field_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

/// Require `value` to be a JSON object.
pub fn expect_object<'a>(value: &'a Value, path: &str) -> ViolationResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| SchemaViolation::NotAnObject {
        path: path.to_string(),
        actual: value_type(value).to_string(),
    })
}

/// Check an object against a field table.
///
/// Required fields must be present and non-null; present fields must have
/// the declared type. Fields outside the table are rejected only when
/// `allow_unknown` is false.
pub fn validate_object<'a>(
    schema: &ObjectSchema,
    value: &'a Value,
    path: &str,
    allow_unknown: bool,
) -> ViolationResult<&'a Map<String, Value>> {
    let obj = expect_object(value, path)?;

    for field in schema.fields {
        match obj.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(SchemaViolation::missing_required(path, field.name));
            }
            None | Some(Value::Null) => {}
            Some(value) => check_type(value, field.field_type, path, field.name)?,
        }
    }

    if !allow_unknown {
        if let Some(unknown) = obj.keys().find(|key| schema.field(key).is_none()) {
            return Err(SchemaViolation::UnknownField {
                path: path.to_string(),
                field: unknown.clone(),
            });
        }
    }

    Ok(obj)
}

/// Validate a group object together with its nested parent chain.
pub fn validate_group_object(value: &Value, path: &str, allow_unknown: bool) -> ViolationResult<()> {
    let mut current = value;
    let mut current_path = path.to_string();
    loop {
        let obj = validate_object(&GROUP_OBJECT, current, &current_path, allow_unknown)?;
        match obj.get("parent") {
            Some(parent) if !parent.is_null() => {
                current = parent;
                current_path = field_path(&current_path, "parent");
            }
            _ => return Ok(()),
        }
    }
}

/// Fetch an optional array field of a payload object.
///
/// A missing or null field reads as empty.
pub fn array_field<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    field: &str,
) -> ViolationResult<&'a [Value]> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(SchemaViolation::invalid_type(
            path,
            field,
            FieldType::Array.as_str(),
            value_type(other),
        )),
    }
}

/// Read the group memberships carried in an entity's `_meta`.
///
/// Returns the fully qualified group names listed under
/// [`GROUPS_META_KEY`], or an empty list when the key is absent.
pub fn membership_names<'a>(entity: &'a Value, path: &str) -> ViolationResult<Vec<&'a str>> {
    let Some(listed) = entity
        .get("_meta")
        .and_then(|meta| meta.get(GROUPS_META_KEY))
    else {
        return Ok(Vec::new());
    };

    let meta_path = field_path(path, "_meta");
    let Some(items) = listed.as_array() else {
        return Err(SchemaViolation::invalid_type(
            meta_path,
            GROUPS_META_KEY,
            FieldType::Array.as_str(),
            value_type(listed),
        ));
    };

    let items_path = field_path(&meta_path, GROUPS_META_KEY);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().ok_or_else(|| {
                SchemaViolation::invalid_type(
                    items_path.clone(),
                    format!("[{}]", i),
                    FieldType::String.as_str(),
                    value_type(item),
                )
            })
        })
        .collect()
}

fn check_type(value: &Value, expected: FieldType, path: &str, field: &str) -> ViolationResult<()> {
    let ok = match expected {
        FieldType::String => value.is_string(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Number => value.is_number(),
        FieldType::Integer => value.is_u64(),
        FieldType::Object => value.is_object(),
        FieldType::Array => value.is_array(),
    };

    if ok {
        Ok(())
    } else {
        Err(SchemaViolation::invalid_type(
            path,
            field,
            expected.as_str(),
            value_type(value),
        ))
    }
}
