//! Format-neutral decoded document tree
//!
//! YAML and property-list decoders each produce their own value type. Both are
//! converted into [`Value`] so the parsers walk a single tagged tree with
//! explicit pattern matching at every step.

use std::collections::BTreeMap;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// A decoded YAML or property-list node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Look up `key` if this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short type name used in trace output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

impl From<serde_yml::Value> for Value {
    fn from(value: serde_yml::Value) -> Self {
        match value {
            serde_yml::Value::Null => Value::Null,
            serde_yml::Value::Bool(b) => Value::Bool(b),
            serde_yml::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_yml::Value::String(s) => Value::String(s),
            serde_yml::Value::Sequence(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_yml::Value::Mapping(mapping) => Value::Map(
                mapping
                    .into_iter()
                    .filter_map(|(key, value)| yaml_key(key).map(|key| (key, Value::from(value))))
                    .collect(),
            ),
            serde_yml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// Mapping keys become strings; keys that are themselves collections are dropped.
fn yaml_key(key: serde_yml::Value) -> Option<String> {
    match key {
        serde_yml::Value::String(s) => Some(s),
        serde_yml::Value::Number(n) => Some(n.to_string()),
        serde_yml::Value::Bool(b) => Some(b.to_string()),
        serde_yml::Value::Null => Some("null".to_string()),
        serde_yml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yml::Value::Sequence(_) | serde_yml::Value::Mapping(_) => None,
    }
}

impl From<plist::Value> for Value {
    fn from(value: plist::Value) -> Self {
        match value {
            plist::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            plist::Value::Dictionary(dict) => Value::Map(
                dict.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
            plist::Value::Boolean(b) => Value::Bool(b),
            plist::Value::Real(r) => Value::Number(r),
            plist::Value::Integer(i) => i
                .as_signed()
                .map(|n| n as f64)
                .or_else(|| i.as_unsigned().map(|n| n as f64))
                .map_or(Value::Null, Value::Number),
            plist::Value::String(s) => Value::String(s),
            plist::Value::Date(date) => {
                let time: DateTime<Utc> = SystemTime::from(date).into();
                Value::String(time.to_rfc3339())
            }
            // Raw data and archiver UIDs carry nothing a manifest needs
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml() {
        let yaml: serde_yml::Value = serde_yml::from_str(
            "name: demo\ncount: 3\nflags: [true, ~]\nnested:\n  key: value\n1.5: float-key\n",
        )
        .unwrap();
        let value = Value::from(yaml);

        assert_eq!(value.get("name").and_then(Value::as_str), Some("demo"));
        assert_eq!(value.get("count"), Some(&Value::Number(3.0)));
        assert_eq!(
            value.get("flags").and_then(Value::as_array),
            Some(&[Value::Bool(true), Value::Null][..])
        );
        assert_eq!(
            value
                .get("nested")
                .and_then(|nested| nested.get("key"))
                .and_then(Value::as_str),
            Some("value")
        );
        assert_eq!(value.get("1.5").and_then(Value::as_str), Some("float-key"));
    }

    #[test]
    fn test_yaml_scalar_keys_stringified() {
        let yaml: serde_yml::Value =
            serde_yml::from_str("~: none\ntrue: yes-key\n10: ten\n").unwrap();
        let value = Value::from(yaml);
        assert_eq!(value.get("null").and_then(Value::as_str), Some("none"));
        assert_eq!(value.get("true").and_then(Value::as_str), Some("yes-key"));
        assert_eq!(value.get("10").and_then(Value::as_str), Some("ten"));
    }

    #[test]
    fn test_from_plist() {
        let mut dict = plist::Dictionary::new();
        dict.insert("name".to_string(), plist::Value::String("App".to_string()));
        dict.insert("count".to_string(), plist::Value::Integer(7i64.into()));
        dict.insert("ratio".to_string(), plist::Value::Real(0.5));
        dict.insert("enabled".to_string(), plist::Value::Boolean(false));
        dict.insert("blob".to_string(), plist::Value::Data(vec![1, 2, 3]));
        dict.insert(
            "list".to_string(),
            plist::Value::Array(vec![plist::Value::String("a".to_string())]),
        );

        let value = Value::from(plist::Value::Dictionary(dict));

        assert_eq!(value.get("name").and_then(Value::as_str), Some("App"));
        assert_eq!(value.get("count"), Some(&Value::Number(7.0)));
        assert_eq!(value.get("ratio"), Some(&Value::Number(0.5)));
        assert_eq!(value.get("enabled"), Some(&Value::Bool(false)));
        assert_eq!(value.get("blob"), Some(&Value::Null));
        assert_eq!(
            value.get("list").and_then(Value::as_array).map(<[Value]>::len),
            Some(1)
        );
    }

    #[test]
    fn test_accessors_on_wrong_type() {
        let value = Value::String("x".to_string());
        assert!(value.get("x").is_none());
        assert!(value.as_array().is_none());
        assert!(value.as_map().is_none());
        assert_eq!(value.type_name(), "string");
        assert_eq!(Value::Null.as_str(), None);
    }
}
