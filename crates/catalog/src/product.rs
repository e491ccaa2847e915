//! Read-only product snapshot handed over by the host catalog.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw stored value of a product attribute.
///
/// Multiselect attributes arrive either as a comma-joined string or as an
/// already-split list; both forms are accepted everywhere. List items are
/// kept in their string form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl AttributeValue {
    /// Convert a JSON value; `None` for null and for objects.
    ///
    /// Scalar list items are stringified the way [`Self::to_text`] would;
    /// null, nested lists and objects inside a list are skipped.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(AttributeValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(AttributeValue::Integer(i)),
                None => n.as_f64().map(AttributeValue::Float),
            },
            Value::String(s) => Some(AttributeValue::Text(s)),
            Value::Array(items) => Some(AttributeValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Array(_) | Value::Object(_) => None,
                        scalar => Self::from_json(scalar).map(|v| v.to_text().into_owned()),
                    })
                    .collect(),
            )),
            Value::Object(_) => None,
        }
    }

    /// Host falsiness: `""`, `"0"`, `0`, `0.0`, `false` and the empty list count as "no value".
    pub fn is_truthy(&self) -> bool {
        match self {
            AttributeValue::Text(s) => !(s.is_empty() || s == "0"),
            AttributeValue::Integer(n) => *n != 0,
            AttributeValue::Float(f) => *f != 0.0,
            AttributeValue::Bool(b) => *b,
            AttributeValue::List(items) => !items.is_empty(),
        }
    }

    /// Loose integer coercion.
    ///
    /// Strings contribute their leading numeric prefix (after leading
    /// whitespace), truncated toward zero, so `"1.9"` is 1 and `"1e3"` is 1000.
    /// Anything unparsable is 0. Lists are 1 when non-empty.
    pub fn to_int(&self) -> i64 {
        match self {
            AttributeValue::Text(s) => leading_int(s),
            AttributeValue::Integer(n) => *n,
            AttributeValue::Float(f) => truncate(*f),
            AttributeValue::Bool(b) => i64::from(*b),
            AttributeValue::List(items) => i64::from(!items.is_empty()),
        }
    }

    /// String form of the value. Lists are comma-joined; `true` is "1", `false` is "".
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            AttributeValue::Text(s) => Cow::Borrowed(s),
            AttributeValue::Integer(n) => Cow::Owned(n.to_string()),
            AttributeValue::Float(f) => Cow::Owned(f.to_string()),
            AttributeValue::Bool(true) => Cow::Borrowed("1"),
            AttributeValue::Bool(false) => Cow::Borrowed(""),
            AttributeValue::List(items) => Cow::Owned(items.join(",")),
        }
    }

    /// Individual option codes, untrimmed.
    ///
    /// Strings split on a literal comma; lists are taken element-wise.
    pub fn tokens(&self) -> Vec<Cow<'_, str>> {
        match self {
            AttributeValue::Text(s) => s.split(',').map(Cow::Borrowed).collect(),
            AttributeValue::List(items) => items.iter().map(|s| Cow::Borrowed(s.as_str())).collect(),
            other => vec![other.to_text()],
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).ok_or_else(|| de::Error::custom("unsupported attribute value"))
    }
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() { f as i64 } else { 0 }
}

/// Length of the numeric prefix of `s`: sign, digits, optional fraction and
/// exponent. The bool is set when a fraction or exponent was consumed.
fn numeric_prefix(s: &str) -> (usize, bool) {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(start);
    let mut mantissa_digits = end - start;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - end - 1;
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
            is_float = true;
        }
    }

    if mantissa_digits == 0 {
        return (0, false);
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
            is_float = true;
        }
    }

    (end, is_float)
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (len, is_float) = numeric_prefix(s);
    let prefix = &s[..len];
    if len == 0 {
        return 0;
    }

    if is_float {
        return prefix.parse::<f64>().map(truncate).unwrap_or(0);
    }

    // Out-of-range integers saturate.
    prefix
        .parse::<i64>()
        .or_else(|_| prefix.parse::<f64>().map(truncate))
        .unwrap_or(0)
}

/// Attribute map that never fails: unsupported values (objects) become unset.
fn lenient_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, Option<AttributeValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(code, value)| {
            if value.is_object() {
                tracing::debug!(code = %code, "ignoring object-valued attribute");
            }
            (code, AttributeValue::from_json(value))
        })
        .collect())
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(value: Vec<&str>) -> Self {
        AttributeValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Host capability: the displayed product's name, SKU and attribute values by code.
pub trait ProductSource {
    fn name(&self) -> &str;

    fn sku(&self) -> &str;

    /// Raw stored value for `code`; `None` when unset or null.
    fn attribute(&self, code: &str) -> Option<&AttributeValue>;
}

/// Plain in-memory product snapshot.
///
/// Deserializes from `{"name": .., "sku": .., "attributes": {code: value}}`;
/// `null` and object-valued attributes are treated as unset, so one odd
/// value never rejects the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub sku: String,
    #[serde(default, deserialize_with = "lenient_attributes")]
    pub attributes: BTreeMap<String, Option<AttributeValue>>,
}

impl ProductSnapshot {
    pub fn new(name: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, code: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(code.into(), Some(value.into()));
        self
    }

    pub fn with_null(mut self, code: impl Into<String>) -> Self {
        self.attributes.insert(code.into(), None);
        self
    }
}

impl ProductSource for ProductSnapshot {
    fn name(&self) -> &str {
        &self.name
    }

    fn sku(&self) -> &str {
        &self.sku
    }

    fn attribute(&self, code: &str) -> Option<&AttributeValue> {
        self.attributes.get(code).and_then(Option::as_ref)
    }
}
