//! Member-name conversion between console-style job templates (PascalCase)
//! and the MediaConvert REST wire format (camelCase).

use serde_json::{Map, Value};

/// Members whose values are maps keyed by user-chosen names.
const USER_KEYED_MEMBERS: &[&str] = &[
    "AudioSelectors",
    "AudioSelectorGroups",
    "CaptionSelectors",
    "DynamicAudioSelectors",
    "UserMetadata",
    "Tags",
];

pub fn to_wire(value: Value) -> Value {
    convert(value, lower_first)
}

pub fn from_wire(value: Value) -> Value {
    convert(value, upper_first)
}

fn convert(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| {
                    let child = if is_user_keyed(&key) {
                        convert_values_only(child, rename)
                    } else {
                        convert(child, rename)
                    };
                    (rename(&key), child)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(|v| convert(v, rename)).collect()),
        other => other,
    }
}

// Keeps the map's own keys, converts whatever sits underneath them.
fn convert_values_only(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| (key, convert(child, rename)))
                .collect::<Map<_, _>>(),
        ),
        other => convert(other, rename),
    }
}

fn is_user_keyed(key: &str) -> bool {
    USER_KEYED_MEMBERS
        .iter()
        .any(|member| member.eq_ignore_ascii_case(key))
}

fn lower_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
