use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::attributes::Attributes;
use crate::model::Model;

/// Value held by a synthesized attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    List(Vec<Value>),
    Record(Box<RecordSnapshot>),
}

/// Attributes of an associated instance captured after it was generated.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSnapshot {
    pub type_name: String,
    pub attributes: Attributes,
}

impl RecordSnapshot {
    pub fn of<T: Model>(record: &T) -> Self {
        Self {
            type_name: T::type_info().simple_name().to_string(),
            attributes: record.attributes(),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordSnapshot> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Successor of this value.
    ///
    /// Integers count up by one, dates by a day and timestamps by a second.
    /// Text follows the alphanumeric carry rule (`"az"` becomes `"ba"`,
    /// `"zz"` becomes `"aaa"`). Values without a natural successor return a
    /// copy of themselves.
    pub fn succ(&self) -> Value {
        match self {
            Value::Int(value) => Value::Int(value.saturating_add(1)),
            Value::Text(value) => Value::Text(text_successor(value)),
            Value::Date(value) => Value::Date(value.succ_opt().unwrap_or(*value)),
            Value::Timestamp(value) => Value::Timestamp(
                value
                    .checked_add_signed(TimeDelta::seconds(1))
                    .unwrap_or(*value),
            ),
            other => other.clone(),
        }
    }
}

fn text_successor(input: &str) -> String {
    let mut chars: Vec<char> = input.chars().collect();
    let Some(last) = chars.len().checked_sub(1) else {
        return String::new();
    };

    let alnum: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_ascii_alphanumeric())
        .map(|(idx, _)| idx)
        .collect();

    if alnum.is_empty() {
        if let Some(next) = char::from_u32(chars[last] as u32 + 1) {
            chars[last] = next;
        }
        return chars.into_iter().collect();
    }

    for &idx in alnum.iter().rev() {
        let (next, carry) = match chars[idx] {
            'z' => ('a', true),
            'Z' => ('A', true),
            '9' => ('0', true),
            c => ((c as u8 + 1) as char, false),
        };
        chars[idx] = next;
        if !carry {
            return chars.into_iter().collect();
        }
    }

    // Carried past the leftmost alphanumeric: grow by one character.
    let first = alnum[0];
    let grown = match chars[first] {
        '0' => '1',
        other => other,
    };
    chars.insert(first, grown);
    chars.into_iter().collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
            Value::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            Value::Timestamp(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S")),
            Value::List(values) => {
                f.write_str("[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Value::Record(record) => write!(f, "#<{}>", record.type_name),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

impl From<RecordSnapshot> for Value {
    fn from(record: RecordSnapshot) -> Self {
        Value::Record(Box::new(record))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::text_successor;

    #[test]
    fn successor_carries_across_separators() {
        assert_eq!(text_successor("a-9"), "b-0");
        assert_eq!(text_successor("1.9"), "2.0");
    }

    #[test]
    fn successor_without_alphanumerics_bumps_last_char() {
        assert_eq!(text_successor("**"), "*+");
        assert_eq!(text_successor(""), "");
    }
}
