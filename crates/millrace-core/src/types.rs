use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value a step execution hands back to the host's expression evaluator.
///
/// Read-style steps produce one of two document representations: the
/// graph the JSON library parses into ([`StepReturn::Json`]) or a plain
/// graph made of std collections ([`StepReturn::Plain`]). Steps that
/// render output return it as [`StepReturn::Text`]; steps that only
/// cause side effects return [`StepReturn::None`].
///
/// Serialization is untagged, so every variant writes as the ordinary
/// JSON form of its payload (`None` writes as `null`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepReturn {
    /// Parsed document graph exactly as produced by the JSON library.
    Json(serde_json::Value),
    /// Plain mapping/sequence graph built from std collections.
    Plain(PlainValue),
    /// Free-form text produced by the step.
    Text(String),
    /// The step produced no value.
    None,
}

impl StepReturn {
    /// Whether the step produced no value.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, StepReturn::None)
    }

    /// The library value graph, if that is what the step produced.
    #[inline]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            StepReturn::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The plain object graph, if that is what the step produced.
    #[inline]
    pub fn as_plain(&self) -> Option<&PlainValue> {
        match self {
            StepReturn::Plain(value) => Some(value),
            _ => None,
        }
    }

    /// The text payload, if that is what the step produced.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StepReturn::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Plain object graph: a JSON document rebuilt from std collections.
///
/// This is the "POJO" rendition of a parsed document. It differs from
/// the library graph in observable ways: mappings are sorted
/// [`BTreeMap`]s rather than insertion-ordered maps, and numbers are
/// split eagerly into `i64` integers and `f64` floats instead of staying
/// behind the library's opaque number type. Hosts can walk it without
/// depending on the JSON library at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlainValue {
    /// JSON null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer; any JSON number representable as `i64`.
    Int(i64),
    /// Floating point number; JSON numbers outside the `i64` range.
    Float(f64),
    /// String.
    Str(String),
    /// Sequence.
    List(Vec<PlainValue>),
    /// Mapping with sorted keys.
    Map(BTreeMap<String, PlainValue>),
}

impl PlainValue {
    /// Whether this is the null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, PlainValue::Null)
    }

    /// The boolean payload, if this is a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlainValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PlainValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric payload widened to `f64`, for either number variant.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PlainValue::Int(n) => Some(*n as f64),
            PlainValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlainValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The sequence payload, if this is a sequence.
    #[inline]
    pub fn as_list(&self) -> Option<&[PlainValue]> {
        match self {
            PlainValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// The mapping payload, if this is a mapping.
    #[inline]
    pub fn as_map(&self) -> Option<&BTreeMap<String, PlainValue>> {
        match self {
            PlainValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Mapping lookup; `None` for missing keys and non-mappings.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&PlainValue> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<&serde_json::Value> for PlainValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PlainValue::Null,
            serde_json::Value::Bool(b) => PlainValue::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(PlainValue::Int)
                .or_else(|| n.as_f64().map(PlainValue::Float))
                .unwrap_or(PlainValue::Null),
            serde_json::Value::String(s) => PlainValue::Str(s.clone()),
            serde_json::Value::Array(items) => {
                PlainValue::List(items.iter().map(PlainValue::from).collect())
            }
            serde_json::Value::Object(map) => PlainValue::Map(
                map.iter()
                    .map(|(key, item)| (key.clone(), PlainValue::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for PlainValue {
    fn from(value: serde_json::Value) -> Self {
        PlainValue::from(&value)
    }
}
