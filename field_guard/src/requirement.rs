//! Required/optional markers for extraction calls
//!
//! The marker passed to a `get_*` call decides its return type: [`Required`] yields the value
//! itself, [`Optional`] yields `Option<_>` with `None` meaning the field is absent.
//!
//! ```
//! use field_guard::{FieldExtractor, Optional, Required};
//! use serde_json::json;
//!
//! let record = json!({"name": "widget"});
//! let extractor = FieldExtractor::new(&record, "Part")?;
//!
//! let name: String = extractor.get_string("name", Required)?;
//! let note: Option<String> = extractor.get_string("note", Optional)?;
//! assert_eq!(name, "widget");
//! assert_eq!(note, None);
//! # Ok::<(), error_stack::Report<field_guard::Error>>(())
//! ```

use error_stack::Report;

use crate::error::{Error, Result};

/// Presence contract of a single extraction call
pub trait Requirement: Copy {
    /// Whether an absent field is a failure
    const REQUIRED: bool;

    /// What a successful extraction returns
    type Output<T>;

    /// Turn a looked-up value into the call's output
    ///
    /// `absent` builds the failure reported when a required field is missing.
    fn resolve<T>(
        value: Option<T>,
        absent: impl FnOnce() -> Report<Error>,
    ) -> Result<Self::Output<T>>;
}

/// The field must be present; absence is a type mismatch against `absent`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Required;

/// The field may be missing, in which case the call returns `None`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Optional;

impl Requirement for Required {
    const REQUIRED: bool = true;

    type Output<T> = T;

    fn resolve<T>(
        value: Option<T>,
        absent: impl FnOnce() -> Report<Error>,
    ) -> Result<Self::Output<T>> {
        value.ok_or_else(absent)
    }
}

impl Requirement for Optional {
    const REQUIRED: bool = false;

    type Output<T> = Option<T>;

    fn resolve<T>(
        value: Option<T>,
        _absent: impl FnOnce() -> Report<Error>,
    ) -> Result<Self::Output<T>> {
        Ok(value)
    }
}
