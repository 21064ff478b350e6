//! JSON output serialization for query results.
//!
//! The pretty form is what callers of [`crate::process`] receive: one element
//! or field per line, two-space indentation, object fields in the order the
//! caller supplied them. It is byte-for-byte the layout produced by
//! `JSON.stringify(value, null, 2)`, so results can be compared against
//! output from JavaScript hosts.
//!
//! # Examples
//!
//! ```
//! use json_linq::Value;
//! use json_linq::output::{to_json, to_json_pretty};
//!
//! let value = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
//!
//! assert_eq!(to_json(&value), "[1,2]");
//! assert_eq!(to_json_pretty(&value), "[\n  1,\n  2\n]");
//! ```

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        let mut out = String::new();
        self.print_value(&mut out, value, 0);
        out
    }

    fn print_value(&self, out: &mut String, value: &Value, indent: usize) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => out.push_str(&n.to_string()),
            Value::Float(n) if n.is_finite() => out.push_str(&format_float(*n)),
            // JSON has no NaN or infinity
            Value::Float(_) => out.push_str("null"),
            Value::String(s) => self.print_string(out, s),
            Value::Array(arr) => self.print_array(out, arr, indent),
            Value::Object(fields) => self.print_object(out, fields, indent),
        }
    }

    fn print_array(&self, out: &mut String, arr: &[Value], indent: usize) {
        if arr.is_empty() {
            out.push_str("[]");
            return;
        }

        out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(out, indent + 1);
            self.print_value(out, item, indent + 1);
        }
        self.newline(out, indent);
        out.push(']');
    }

    fn print_object(&self, out: &mut String, fields: &[(String, Value)], indent: usize) {
        if fields.is_empty() {
            out.push_str("{}");
            return;
        }

        out.push('{');
        for (i, (key, value)) in fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(out, indent + 1);
            self.print_string(out, key);
            out.push(':');
            if self.pretty {
                out.push(' ');
            }
            self.print_value(out, value, indent + 1);
        }
        self.newline(out, indent);
        out.push('}');
    }

    fn newline(&self, out: &mut String, level: usize) {
        if self.pretty {
            out.push('\n');
            out.push_str(&"  ".repeat(level));
        }
    }

    fn print_string(&self, out: &mut String, s: &str) {
        out.push('"');
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{08}' => out.push_str("\\b"),
                '\u{0c}' => out.push_str("\\f"),
                c if c < '\u{20}' => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('"');
    }
}

// Number-to-string the way JavaScript does it: exponent form outside
// [1e-6, 1e21), an explicit `+` on positive exponents, and no negative zero.
fn format_float(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }
    let s = format!("{:e}", n);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

/// Converts a Value to compact JSON with no whitespace.
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed JSON with 2-space indentation.
///
/// # Examples
///
/// ```
/// use json_linq::Value;
/// use json_linq::output::to_json_pretty;
///
/// let record = Value::Object(vec![
///     ("name".to_string(), Value::String("Alice".to_string())),
///     ("age".to_string(), Value::Integer(30)),
/// ]);
///
/// assert_eq!(
///     to_json_pretty(&record),
///     "{\n  \"name\": \"Alice\",\n  \"age\": 30\n}"
/// );
/// ```
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
