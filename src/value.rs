use std::cmp::Ordering;

/// A JSON value as seen by the query engine.
///
/// Records passed to a query and the literals inside a query are both
/// represented with this type. Integers and floats are kept apart so that
/// integral input survives a round trip unchanged, but they compare as one
/// numeric type.
///
/// Object fields keep the order in which the caller supplied them, so the
/// filtered output has the same shape as the input.
///
/// # Examples
///
/// ```
/// use json_linq::Value;
///
/// let record = Value::Object(vec![
///     ("name".to_string(), Value::String("Oslo".to_string())),
///     ("temperatureC".to_string(), Value::Integer(12)),
/// ]);
///
/// assert_eq!(record.get("temperatureC"), Some(&Value::Integer(12)));
/// assert!(record.is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object fields in insertion order
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Look up a field on an object. Returns `None` for missing fields and
    /// for anything that is not an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether the value counts as true in a condition.
    ///
    /// `null`, `false`, zero, NaN and the empty string are falsy. Everything
    /// else is truthy, including empty arrays and objects.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Returns a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Strict equality: same JSON type and same value.
    ///
    /// Integers and floats are the same JSON type and compare by exact
    /// numeric value. No coercion happens between numbers, strings and
    /// booleans. Object equality ignores field order.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                numeric_cmp(self, other) == Some(Ordering::Equal)
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| other.get(k).is_some_and(|w| v.strict_eq(w)))
                    && b.iter().all(|(k, _)| self.get(k).is_some())
            }
            _ => false,
        }
    }

    /// Ordering between two values of a comparable type.
    ///
    /// Numbers order numerically, strings lexicographically and booleans
    /// with `false < true`. Any other pairing, including anything involving
    /// `null`, has no ordering.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                numeric_cmp(self, other)
            }
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Integer(a), Value::Float(b)) => int_float_cmp(*a, *b),
        (Value::Float(a), Value::Integer(b)) => int_float_cmp(*b, *a).map(Ordering::reverse),
        _ => None,
    }
}

// -(2^63) and 2^63 are the bounds of i64, both exact as f64.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

// `i64 as f64` rounds above 2^53, so compare the float's integral part as an
// integer and break ties on its fraction. Every step is exact.
fn int_float_cmp(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_UPPER {
        return Some(Ordering::Less);
    }
    if float < I64_LOWER {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        unequal => Some(unequal),
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
