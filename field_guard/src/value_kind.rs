//! Shape names used in extraction diagnostics
//!
//! `ValueKind` describes what was actually found in a record, `ExpectedShape`
//! describes what an extraction call asked for. Both render lowercase so error
//! messages read like `Property age of type string is not assignable to type number`.

use serde_json::Value;
use strum::{AsRefStr, Display};

/// Observed runtime shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    /// The field does not exist in the record
    Absent,
    /// JSON `null`, present but empty
    Null,
    /// `true` or `false`
    Boolean,
    /// Any JSON number
    Number,
    /// JSON string
    String,
    /// JSON array
    Array,
    /// JSON object
    Object,
}

impl ValueKind {
    /// Classify an optional field value, `None` meaning the key is missing
    pub const fn of(value: Option<&Value>) -> Self {
        match value {
            None => Self::Absent,
            Some(Value::Null) => Self::Null,
            Some(Value::Bool(_)) => Self::Boolean,
            Some(Value::Number(_)) => Self::Number,
            Some(Value::String(_)) => Self::String,
            Some(Value::Array(_)) => Self::Array,
            Some(Value::Object(_)) => Self::Object,
        }
    }
}

impl From<&Value> for ValueKind {
    fn from(value: &Value) -> Self {
        Self::of(Some(value))
    }
}

/// Shape an extraction call requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ExpectedShape {
    /// JSON string
    String,
    /// Any JSON number
    Number,
    /// A number without a fractional part that fits the requested integer type
    Integer,
    /// `true` or `false`
    Boolean,
    /// JSON array with unvalidated elements
    Array,
    /// JSON object, validated by a nested extractor
    Object,
    /// A string holding a date under the active `DatePolicy`
    Date,
    /// A string naming a member of an `EnumDefinition`
    #[strum(serialize = "enum key")]
    EnumKey,
    /// An array whose elements are all enum keys
    #[strum(serialize = "array of enum keys")]
    EnumKeyArray,
}
