//! Named field values handed to the line renderer.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A record ready for rendering: schema field name to value.
///
/// Fields the schema names but the record lacks render as blank.
pub type Record = BTreeMap<String, FieldValue>;

/// One value in a [`Record`].
///
/// The field's schema type, not the value variant, decides how the value is
/// rendered; every variant can be coerced into every field type. JSON strings
/// always stay `Text`, even when they look numeric, so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Money(Money),
}

impl FieldValue {
    /// Returns `true` for values that render the same as a missing field:
    /// empty text, integer zero and zero money.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Integer(n) => *n == 0,
            FieldValue::Money(m) => m.is_zero(),
            FieldValue::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Money(m) => write!(f, "{}", m),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<char> for FieldValue {
    fn from(value: char) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<Money> for FieldValue {
    fn from(value: Money) -> Self {
        FieldValue::Money(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::from("").is_blank());
        assert!(FieldValue::from(0i64).is_blank());
        assert!(FieldValue::from(Money::ZERO).is_blank());

        assert!(!FieldValue::from(" ").is_blank());
        assert!(!FieldValue::from(7i64).is_blank());
        assert!(!FieldValue::from(Money::from_minor_units(1)).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from(1337i64).to_string(), "1337");
        assert_eq!(FieldValue::from(Money::from_minor_units(1200)).to_string(), "12.00");
        assert_eq!(FieldValue::from("Vault").to_string(), "Vault");
    }

    #[test]
    fn test_untagged_deserialize() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[42, 12.5, "text"]"#).unwrap();
        assert_eq!(values[0], FieldValue::Integer(42));
        assert_eq!(values[1], FieldValue::Money(Money::from_minor_units(1250)));
        assert_eq!(values[2], FieldValue::Text("text".to_string()));
    }

    #[test]
    fn test_numeric_strings_stay_text() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"["000123", "0", "12.50"]"#).unwrap();
        assert_eq!(values[0], FieldValue::Text("000123".to_string()));
        assert_eq!(values[1], FieldValue::Text("0".to_string()));
        assert_eq!(values[2], FieldValue::Text("12.50".to_string()));
        assert!(!values[1].is_blank());
    }
}
