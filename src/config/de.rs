//! Serde glue: typed extraction of the merged document and `with` helpers
//! for fields that accept more than one shape.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::ConfigError;

/// Deserializes the merged document, naming the offending field on error.
///
/// A missing field becomes `MissingRequiredField`, anything else serde
/// rejects becomes `InvalidValue` with serde's message as the constraint.
pub(crate) fn from_document<T: DeserializeOwned>(map: &Map<String, Value>) -> Result<T, ConfigError> {
    serde_path_to_error::deserialize(Value::Object(map.clone())).map_err(|e| {
        let path = e.path().to_string();
        let message = e.into_inner().to_string();
        match missing_field(&message) {
            Some(field) => ConfigError::missing(join(&path, field)),
            None => ConfigError::invalid(path, message),
        }
    })
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field)
}

fn join(path: &str, field: &str) -> String {
    if path == "." || path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

/// Free-text values (credentials, chat ids) that documents sometimes write
/// as bare numbers.
pub(crate) mod text {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::config::document::kind_of;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(serde::de::Error::custom(format!(
                "expected a string, found {}",
                kind_of(&other)
            ))),
        }
    }
}

/// Like [`text`], with an empty value meaning "not set".
pub(crate) mod optional_text {
    use serde::Deserializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = super::text::deserialize(deserializer)?;
        Ok(Some(s).filter(|s| !s.is_empty()))
    }
}

/// A single string or a list of strings.
pub(crate) mod one_or_many {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(s) => Ok(vec![s]),
            OneOrMany::Many(list) => Ok(list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[allow(dead_code)]
        inner: Inner,
    }

    #[derive(Debug, Deserialize)]
    struct Inner {
        #[allow(dead_code)]
        count: u32,
    }

    fn map(value: serde_json::Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_missing_field_gets_full_path() {
        let err = from_document::<Outer>(&map(json!({"inner": {}}))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequiredField { ref field } if field == "inner.count"));

        let err = from_document::<Outer>(&map(json!({}))).unwrap_err();
        assert_eq!(err.field(), Some("inner"));
    }

    #[test]
    fn test_wrong_type_names_nested_field() {
        let err = from_document::<Outer>(&map(json!({"inner": {"count": -1}}))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "inner.count"));
    }

    #[test]
    fn test_text_accepts_numbers() {
        #[derive(Deserialize)]
        struct Chat {
            #[serde(deserialize_with = "text::deserialize")]
            id: String,
        }
        let chat: Chat = serde_json::from_value(json!({"id": 12345})).unwrap();
        assert_eq!(chat.id, "12345");
    }
}
