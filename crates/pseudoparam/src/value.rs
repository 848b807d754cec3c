//! value representation
//!
//! The tree handed to the passes contains the following data types
//! - null
//! - boolean (true/false)
//! - integer (signed, i64)
//! - unsigned integer (u64, only for values above i64::MAX)
//! - decimal (f64)
//! - string (utf-8)
//! - tagged (a YAML value carrying an explicit tag, e.g. `!!timestamp` or `!Ref`)
//! - array ("list" of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Only strings are ever rewritten. Tagged values are opaque: they are never traversed,
//! the same way dates are treated as plain scalars.
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serialize, Serializer,
};

/// All possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    UnsignedInteger(u64),
    Decimal(f64),
    String(String),
    Tagged(Box<serde_yaml::value::TaggedValue>),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Mappings and sequences, the only nodes the walker descends into
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    /// Look up a value by a dotted path of object keys
    ///
    /// ```
    /// # use pseudoparam::yaml_document;
    /// let service = yaml_document!("provider: { region: eu-west-1 }");
    /// assert_eq!(service.get_path("provider.region").and_then(|v| v.as_str()), Some("eu-west-1"));
    /// assert!(service.get_path("provider.stage").is_none());
    /// ```
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|step| !step.is_empty())
            .try_fold(self, |current, step| current.as_object()?.get(step))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => b.into(),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Integer)
                .or_else(|| n.as_u64().map(Value::UnsignedInteger))
                .or_else(|| n.as_f64().map(Value::Decimal))
                .unwrap_or(Value::Null),
            Json::String(s) => s.into(),
            Json::Array(a) => a.into(),
            Json::Object(o) => o.into_iter().collect(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Mapping key `{0}` occurs more than once after conversion to a string")]
    DuplicateKey(String),
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = ConversionError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value as Yaml;

        let value = match value {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => b.into(),
            Yaml::Number(n) => n
                .as_i64()
                .map(Value::Integer)
                .or_else(|| n.as_u64().map(Value::UnsignedInteger))
                .or_else(|| n.as_f64().map(Value::Decimal))
                .unwrap_or(Value::Null),
            Yaml::String(s) => s.into(),
            Yaml::Sequence(s) => Value::Array(
                s.into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(m) => {
                let mut object = IndexMap::with_capacity(m.len());
                for (key, value) in m {
                    match object.entry(yaml_key(key)) {
                        Entry::Occupied(entry) => {
                            return Err(ConversionError::DuplicateKey(entry.key().clone()));
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(Value::try_from(value)?);
                        }
                    }
                }
                Value::Object(object)
            }
            Yaml::Tagged(tagged) => Value::Tagged(tagged),
        };

        Ok(value)
    }
}

/// YAML allows non-string keys, JSON and templates do not
fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_string(),
        complex => serde_yaml::to_string(&complex)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::UnsignedInteger(value) => serializer.serialize_u64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Tagged(value) => value.serialize(serializer),
            Value::Array(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}
