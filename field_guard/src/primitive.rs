//! Primitive field types
//!
//! Each implementation accepts exactly one JSON shape. Nothing is coerced: `"42"` is never a
//! number and `1` is never a boolean.

use serde_json::Value;

use crate::value_kind::ExpectedShape;

/// A primitive value that can be read straight out of a JSON field
pub trait Primitive: Sized {
    /// Shape reported when the value does not match
    const EXPECTED: ExpectedShape;

    /// Convert `value` if it has exactly the right runtime type
    fn from_value(value: &Value) -> Option<Self>;
}

impl Primitive for String {
    const EXPECTED: ExpectedShape = ExpectedShape::String;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(Self::from)
    }
}

impl Primitive for bool {
    const EXPECTED: ExpectedShape = ExpectedShape::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Primitive for f64 {
    const EXPECTED: ExpectedShape = ExpectedShape::Number;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl Primitive for i64 {
    const EXPECTED: ExpectedShape = ExpectedShape::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl Primitive for u64 {
    const EXPECTED: ExpectedShape = ExpectedShape::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_no_coercion() {
        assert_eq!(String::from_value(&json!("test")), Some("test".to_string()));
        assert_eq!(String::from_value(&json!(123)), None);
        assert_eq!(f64::from_value(&json!("123")), None);
        assert_eq!(bool::from_value(&json!(1)), None);
        assert_eq!(bool::from_value(&json!("true")), None);
        assert_eq!(String::from_value(&Value::Null), None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(f64::from_value(&json!(123)), Some(123.0));
        assert_eq!(f64::from_value(&json!(1.5)), Some(1.5));
        assert_eq!(i64::from_value(&json!(-7)), Some(-7));
        assert_eq!(i64::from_value(&json!(1.5)), None);
        assert_eq!(u64::from_value(&json!(-7)), None);
        assert_eq!(u64::from_value(&json!(7)), Some(7));
    }
}
