//! JSON encoding with a fixed set of options: unicode and slashes are written
//! as-is, floats keep their zero fraction, and any value JSON cannot hold
//! fails the whole encode.

use super::*;
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::PrettyFormatter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent nested structures by four spaces per level.
    pub pretty: bool,
}

impl EncodeOptions {
    pub fn pretty() -> Self {
        EncodeOptions { pretty: true }
    }
}

/// List-shaped maps become arrays, other maps become objects.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(f) => Err(S::Error::custom(format!("Inf and NaN cannot be JSON encoded (found {})", f))),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) if self.is_list() => {
                let mut seq = serializer.serialize_seq(Some(map.len()))?;
                for item in map.values() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut object = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    object.serialize_entry(&key.to_string(), value)?;
                }
                object.end()
            }
            Value::Callable(_) => Err(S::Error::custom("Callable cannot be JSON encoded")),
        }
    }
}

/// Finds the first value JSON cannot represent, reporting its path.
fn check_encodable(value: &Value, path: &str) -> Result<()> {
    match value {
        Value::Float(f) if !f.is_finite() => Err(EncodeError::NonFinite(*f, path.to_owned())),
        Value::Callable(_) => Err(EncodeError::Callable(path.to_owned())),
        Value::List(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| check_encodable(item, &child_path(path, &index.to_string()))),
        Value::Map(map) => map
            .iter()
            .try_for_each(|(key, item)| check_encodable(item, &child_path(path, &key.to_string()))),
        _ => Ok(()),
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{}.{}", path, key)
    }
}

pub fn encode(value: &Value, options: EncodeOptions) -> Result<String> {
    check_encodable(value, "")?;

    if !options.pretty {
        return Ok(serde_json::to_string(value)?);
    }

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
