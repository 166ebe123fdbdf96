//! # field_guard
//!
//! Field-level validating extraction from untyped JSON records.
//!
//! A [`FieldExtractor`] wraps one decoded record and hands out typed fields one call at a time.
//! Each call names the field, the shape it expects, and whether the field is [`Required`] or
//! [`Optional`]. A value of the wrong runtime type never gets through: there is no coercion,
//! and absence of a required field is reported like any other type mismatch.
//!
//! | Call | Accepts | Returns |
//! |------|---------|---------|
//! | [`get_string`], [`get_number`], [`get_integer`], [`get_boolean`] | matching JSON primitive | `String`, `f64`, `i64`, `bool` |
//! | [`get_array`] | JSON array | `&[Value]` |
//! | [`get_record`] | JSON object | nested [`FieldExtractor`] |
//! | [`get_date`], [`get_iso_date`], [`get_calendar_date`] | string valid under a [`DatePolicy`] | [`ParsedDate`], `DateTime`, `NaiveDate` |
//! | [`get_enum`], [`get_enum_key`] | string in an [`EnumDefinition`] | `&str`, enum variant |
//! | [`get_array_of_enum`], [`get_array_of_enum_keys`] | array of such strings | `Vec<&str>`, `Vec<E>` |
//!
//! [`get_string`]: FieldExtractor::get_string
//! [`get_number`]: FieldExtractor::get_number
//! [`get_integer`]: FieldExtractor::get_integer
//! [`get_boolean`]: FieldExtractor::get_boolean
//! [`get_array`]: FieldExtractor::get_array
//! [`get_record`]: FieldExtractor::get_record
//! [`get_date`]: FieldExtractor::get_date
//! [`get_iso_date`]: FieldExtractor::get_iso_date
//! [`get_calendar_date`]: FieldExtractor::get_calendar_date
//! [`get_enum`]: FieldExtractor::get_enum
//! [`get_enum_key`]: FieldExtractor::get_enum_key
//! [`get_array_of_enum`]: FieldExtractor::get_array_of_enum
//! [`get_array_of_enum_keys`]: FieldExtractor::get_array_of_enum_keys
//!
//! ## Building a value object
//!
//! Every call returns a [`Result`], so a value object is built as a chain of `?` and the first
//! invalid field aborts construction:
//!
//! ```
//! use chrono::NaiveDate;
//! use field_guard::{FieldExtractor, Optional, Required, Result};
//! use serde_json::{Value, json};
//! use strum::{EnumString, VariantNames};
//!
//! #[derive(Debug, PartialEq, EnumString, VariantNames)]
//! #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
//! enum Priority {
//!     Low,
//!     High,
//! }
//!
//! struct Task {
//!     title:    String,
//!     due:      Option<NaiveDate>,
//!     priority: Priority,
//! }
//!
//! impl TryFrom<&Value> for Task {
//!     type Error = error_stack::Report<field_guard::Error>;
//!
//!     fn try_from(value: &Value) -> Result<Self> {
//!         let fields = FieldExtractor::new(value, "Task")?;
//!         Ok(Self {
//!             title:    fields.get_string("title", Required)?,
//!             due:      fields.get_calendar_date("due", Optional)?,
//!             priority: fields.get_enum_key::<Priority, _>("priority", Required)?,
//!         })
//!     }
//! }
//!
//! let task = Task::try_from(&json!({"title": "ship", "priority": "HIGH"}))?;
//! assert_eq!(task.title, "ship");
//! assert_eq!(task.due, None);
//! assert_eq!(task.priority, Priority::High);
//!
//! assert!(Task::try_from(&json!({"title": "ship", "priority": "URGENT"})).is_err());
//! # Ok::<(), error_stack::Report<field_guard::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Failures are [`error_stack::Report`]s over [`Error`]. [`Error::kind`] groups them into
//! [`ErrorKind::Shape`] (root is not an object), [`ErrorKind::TypeMismatch`] (wrong runtime
//! type, or a required field is absent) and [`ErrorKind::Validation`] (right type, invalid
//! content). Reports carry the target value object's name as an attachment.
//!
//! ## Logging
//!
//! Rejections are logged with `tracing` at `debug`, accepted fields at `trace`. The library
//! never installs a subscriber.

mod config;
mod date;
mod enum_keys;
mod error;
mod extractor;
mod primitive;
mod record_access;
mod requirement;
mod value_kind;

pub use config::{ExtractorConfig, OptionalEnumPolicy};
pub use date::{DatePolicy, ParsedDate, days_in_month, is_leap_year};
pub use enum_keys::EnumDefinition;
pub use error::{Error, ErrorKind, Result};
pub use extractor::FieldExtractor;
pub use primitive::Primitive;
pub use record_access::RecordAccess;
pub use requirement::{Optional, Required, Requirement};
pub use value_kind::{ExpectedShape, ValueKind};
