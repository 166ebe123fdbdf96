//! Extension trait for type-safe record field access
//!
//! Field names are taken as any `AsRef<str>`, so callers can name fields with a strum enum
//! (`#[derive(AsRefStr)]`) instead of loose string literals.

use serde_json::{Map, Value};

use crate::value_kind::ValueKind;

/// Extension trait for reading fields of an untyped record
pub trait RecordAccess {
    /// Get field value using any type that can be a string reference
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value>;

    /// Observed shape of a field, [`ValueKind::Absent`] when the key is missing
    fn field_kind<T: AsRef<str>>(&self, field: T) -> ValueKind {
        ValueKind::of(self.get_field(field))
    }
}

impl RecordAccess for Map<String, Value> {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value> {
        self.get(field.as_ref())
    }
}
