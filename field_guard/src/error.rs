//! Error types for field extraction

use error_stack::Report;
use strum::Display;
use thiserror::Error;

use crate::date::DatePolicy;
use crate::value_kind::{ExpectedShape, ValueKind};

/// Result type for the `field_guard` library
pub type Result<T> = core::result::Result<T, Report<Error>>;

/// Coarse failure category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The root record is not an object
    Shape,
    /// A field has the wrong runtime type, or a required field is absent
    TypeMismatch,
    /// A field has the right type but invalid content
    Validation,
}

/// Extraction failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The root record is not a JSON object
    #[error(
        "Data of type {actual} passed to {target} constructor is not assignable to type \"object\""
    )]
    Shape {
        /// Value object being constructed
        target: String,
        /// Observed shape of the root value
        actual: ValueKind,
    },

    /// The field value has the wrong runtime type
    #[error("Property {field} of type {actual} is not assignable to type {expected}")]
    TypeMismatch {
        /// Field name
        field:    String,
        /// Observed shape, `absent` for a missing required field
        actual:   ValueKind,
        /// Shape the call asked for
        expected: ExpectedShape,
    },

    /// The string does not satisfy the date policy
    #[error("Property {field} with value {value} is not a valid date ({policy})")]
    InvalidDate {
        /// Field name
        field:  String,
        /// Rejected string
        value:  String,
        /// Policy that rejected it
        policy: DatePolicy,
    },

    /// The string is not a member of the enum's key set
    #[error("Could not match any {enum_name} key to property {field} with value {value}")]
    UnknownEnumKey {
        /// Field name
        field:     String,
        /// Rejected string
        value:     String,
        /// Name of the enum definition
        enum_name: String,
    },

    /// An array element is not a string member of the enum's key set
    #[error("Array value {value} at index {index} in property {field} is not a key of {enum_name}")]
    EnumArrayElement {
        /// Field name
        field:     String,
        /// Position of the first offending element
        index:     usize,
        /// Offending element rendered as JSON
        value:     String,
        /// Name of the enum definition
        enum_name: String,
    },
}

impl Error {
    // Builder methods for common patterns

    /// Create a root guard failure
    pub fn shape(target: &str, actual: ValueKind) -> Self {
        Self::Shape {
            target: target.to_string(),
            actual,
        }
    }

    /// Create a wrong-type failure, `actual` being [`ValueKind::Absent`] for missing fields
    pub fn type_mismatch(field: &str, actual: ValueKind, expected: ExpectedShape) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            actual,
            expected,
        }
    }

    /// Create a failure for a string the date policy rejects
    pub fn invalid_date(field: &str, value: &str, policy: DatePolicy) -> Self {
        Self::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
            policy,
        }
    }

    /// Create a failure for a string outside the enum's key set
    pub fn unknown_enum_key(field: &str, value: &str, enum_name: &str) -> Self {
        Self::UnknownEnumKey {
            field:     field.to_string(),
            value:     value.to_string(),
            enum_name: enum_name.to_string(),
        }
    }

    /// Create a failure for an array element that is not a valid enum key
    ///
    /// `value` is the element rendered as JSON, so non-string elements stay recognizable.
    pub fn enum_array_element(field: &str, index: usize, value: &str, enum_name: &str) -> Self {
        Self::EnumArrayElement {
            field: field.to_string(),
            index,
            value: value.to_string(),
            enum_name: enum_name.to_string(),
        }
    }

    /// Failure category
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Shape { .. } => ErrorKind::Shape,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::InvalidDate { .. }
            | Self::UnknownEnumKey { .. }
            | Self::EnumArrayElement { .. } => ErrorKind::Validation,
        }
    }

    /// Name of the offending field, `None` for root guard failures
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Shape { .. } => None,
            Self::TypeMismatch { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::UnknownEnumKey { field, .. }
            | Self::EnumArrayElement { field, .. } => Some(field),
        }
    }
}
