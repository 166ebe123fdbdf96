//! Validating extractor over a single untyped record
//!
//! A [`FieldExtractor`] is built once per record. Construction checks that the record is a
//! JSON object; after that every `get_*` call validates exactly one field and either returns a
//! correctly typed value or fails with a [`Report<Error>`]. Nothing is ever coerced and nothing
//! is partially validated.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use error_stack::Report;
use itertools::Itertools;
use serde_json::{Map, Value};
use strum::VariantNames;

use crate::config::{ExtractorConfig, OptionalEnumPolicy};
use crate::date::{self, DatePolicy, ParsedDate};
use crate::enum_keys::EnumDefinition;
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use crate::record_access::RecordAccess;
use crate::requirement::Requirement;
use crate::value_kind::{ExpectedShape, ValueKind};

/// Typed field access over one untyped JSON record
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor<'a> {
    record: &'a Map<String, Value>,
    target: &'a str,
    config: ExtractorConfig,
}

impl<'a> FieldExtractor<'a> {
    /// Wrap `record` with the default configuration
    ///
    /// `target` names the value object being built and only appears in diagnostics.
    pub fn new(record: &'a Value, target: &'a str) -> Result<Self> {
        Self::with_config(record, target, ExtractorConfig::default())
    }

    /// Wrap `record`, failing with [`Error::Shape`] unless it is a JSON object
    pub fn with_config(record: &'a Value, target: &'a str, config: ExtractorConfig) -> Result<Self> {
        let Value::Object(record) = record else {
            let actual = ValueKind::from(record);
            tracing::debug!("Rejected {actual} record passed to {target}");
            return Err(Report::new(Error::shape(target, actual))
                .attach(format!("Target: {target}"))
                .attach("Expected: object"));
        };

        Ok(Self {
            record,
            target,
            config,
        })
    }

    /// Name of the value object this extractor feeds
    pub const fn target(&self) -> &'a str {
        self.target
    }

    /// Configuration in effect
    pub const fn config(&self) -> ExtractorConfig {
        self.config
    }

    /// Whether the record has the key at all, `null` counting as present
    pub fn has_field(&self, field: impl AsRef<str>) -> bool {
        self.record.get_field(field).is_some()
    }

    /// Observed shape of a field without validating it
    pub fn field_kind(&self, field: impl AsRef<str>) -> ValueKind {
        self.record.field_kind(field)
    }

    // Primitive extraction

    /// Extract a primitive, failing unless the runtime type matches `P` exactly
    pub fn get_primitive<P: Primitive, R: Requirement>(
        &self,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<P>> {
        let field = field.as_ref();
        self.extract::<R, P>(field, P::EXPECTED, |value| {
            P::from_value(value).ok_or_else(|| self.mismatch(field, value, P::EXPECTED))
        })
    }

    /// Extract a string field
    pub fn get_string<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        requirement: R,
    ) -> Result<R::Output<String>> {
        self.get_primitive::<String, R>(field, requirement)
    }

    /// Extract a number field as `f64`
    pub fn get_number<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        requirement: R,
    ) -> Result<R::Output<f64>> {
        self.get_primitive::<f64, R>(field, requirement)
    }

    /// Extract a number field that must be a whole `i64`
    pub fn get_integer<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        requirement: R,
    ) -> Result<R::Output<i64>> {
        self.get_primitive::<i64, R>(field, requirement)
    }

    /// Extract a boolean field
    pub fn get_boolean<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        requirement: R,
    ) -> Result<R::Output<bool>> {
        self.get_primitive::<bool, R>(field, requirement)
    }

    // Container extraction

    /// Extract an array field without looking at its elements
    pub fn get_array<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<&'a [Value]>> {
        let field = field.as_ref();
        self.extract::<R, &'a [Value]>(field, ExpectedShape::Array, |value| {
            value
                .as_array()
                .map(Vec::as_slice)
                .ok_or_else(|| self.mismatch(field, value, ExpectedShape::Array))
        })
    }

    /// Extract a nested object as an independent extractor labelled `target`
    ///
    /// The nested extractor inherits this extractor's configuration.
    pub fn get_record<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        target: &'a str,
        _requirement: R,
    ) -> Result<R::Output<Self>> {
        let field = field.as_ref();
        self.extract::<R, Self>(field, ExpectedShape::Object, |value| {
            value
                .as_object()
                .map(|record| Self {
                    record,
                    target,
                    config: self.config,
                })
                .ok_or_else(|| self.mismatch(field, value, ExpectedShape::Object))
        })
    }

    // Date extraction

    /// Extract a date using the configured [`DatePolicy`]
    pub fn get_date<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        requirement: R,
    ) -> Result<R::Output<ParsedDate>> {
        self.get_date_with(self.config.date_policy, field, requirement)
    }

    /// Extract a date using `policy` for this call only
    pub fn get_date_with<R: Requirement>(
        &self,
        policy: DatePolicy,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<ParsedDate>> {
        self.extract_date::<R, ParsedDate>(field.as_ref(), policy, |raw| policy.parse(raw))
    }

    /// Extract an ISO-8601 timestamp with timezone
    pub fn get_iso_date<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<DateTime<FixedOffset>>> {
        self.extract_date::<R, DateTime<FixedOffset>>(
            field.as_ref(),
            DatePolicy::IsoTimestamp,
            date::parse_iso_timestamp,
        )
    }

    /// Extract a bare calendar date, checked against the Gregorian calendar
    pub fn get_calendar_date<R: Requirement>(
        &self,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<NaiveDate>> {
        self.extract_date::<R, NaiveDate>(
            field.as_ref(),
            DatePolicy::Calendar,
            date::parse_calendar_date,
        )
    }

    // Enum extraction

    /// Extract a string that must be one of `definition`'s keys, returned unchanged
    pub fn get_enum<R: Requirement>(
        &self,
        definition: &EnumDefinition<'_>,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<&'a str>> {
        let field = field.as_ref();
        if self.skips_optional_enum::<R>(field) {
            return R::resolve::<&'a str>(None, || self.absent(field, ExpectedShape::EnumKey));
        }
        self.extract::<R, &'a str>(field, ExpectedShape::EnumKey, |value| {
            self.enum_key(definition, field, value)
        })
    }

    /// Extract an enum key and convert it into the `VariantNames` enum it names
    pub fn get_enum_key<E, R>(&self, field: impl AsRef<str>, _requirement: R) -> Result<R::Output<E>>
    where
        E: VariantNames + FromStr,
        R: Requirement,
    {
        let field = field.as_ref();
        if self.skips_optional_enum::<R>(field) {
            return R::resolve::<E>(None, || self.absent(field, ExpectedShape::EnumKey));
        }
        let definition = EnumDefinition::of::<E>();
        self.extract::<R, E>(field, ExpectedShape::EnumKey, |value| {
            let key = self.enum_key(&definition, field, value)?;
            self.variant::<E>(&definition, field, key)
        })
    }

    /// Extract an array whose elements must all be keys of `definition`
    ///
    /// Fails on the first offending element, naming its index. An empty array is valid.
    pub fn get_array_of_enum<R: Requirement>(
        &self,
        definition: &EnumDefinition<'_>,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<Vec<&'a str>>> {
        let field = field.as_ref();
        self.extract::<R, Vec<&'a str>>(field, ExpectedShape::EnumKeyArray, |value| {
            self.enum_keys(definition, field, value)
        })
    }

    /// Extract an array of enum keys converted into the `VariantNames` enum they name
    pub fn get_array_of_enum_keys<E, R>(
        &self,
        field: impl AsRef<str>,
        _requirement: R,
    ) -> Result<R::Output<Vec<E>>>
    where
        E: VariantNames + FromStr,
        R: Requirement,
    {
        let field = field.as_ref();
        let definition = EnumDefinition::of::<E>();
        self.extract::<R, Vec<E>>(field, ExpectedShape::EnumKeyArray, |value| {
            self.enum_keys(&definition, field, value)?
                .into_iter()
                .map(|key| self.variant::<E>(&definition, field, key))
                .collect()
        })
    }

    // Shared validation plumbing

    /// Look up `field`, validate it when present and apply the requirement when absent
    fn extract<R: Requirement, T>(
        &self,
        field: &str,
        expected: ExpectedShape,
        validate: impl FnOnce(&'a Value) -> Result<T>,
    ) -> Result<R::Output<T>> {
        let record: &'a Map<String, Value> = self.record;
        let value = record.get(field).map(validate).transpose()?;
        if value.is_some() {
            tracing::trace!("Extracted {field} as {expected} for {}", self.target);
        }
        R::resolve(value, || self.absent(field, expected))
    }

    fn extract_date<R: Requirement, T>(
        &self,
        field: &str,
        policy: DatePolicy,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<R::Output<T>> {
        self.extract::<R, T>(field, ExpectedShape::Date, |value| {
            let raw = value
                .as_str()
                .ok_or_else(|| self.mismatch(field, value, ExpectedShape::Date))?;
            parse(raw).ok_or_else(|| {
                self.reject(Error::invalid_date(field, raw, policy))
                    .attach(format!("Expected format: {}", policy.pattern()))
            })
        })
    }

    fn enum_key(
        &self,
        definition: &EnumDefinition<'_>,
        field: &str,
        value: &'a Value,
    ) -> Result<&'a str> {
        let key = value
            .as_str()
            .ok_or_else(|| self.mismatch(field, value, ExpectedShape::EnumKey))?;
        if definition.contains(key) {
            Ok(key)
        } else {
            Err(self
                .reject(Error::unknown_enum_key(field, key, definition.name()))
                .attach(format!("Valid keys: {}", definition.keys().iter().join(", "))))
        }
    }

    fn enum_keys(
        &self,
        definition: &EnumDefinition<'_>,
        field: &str,
        value: &'a Value,
    ) -> Result<Vec<&'a str>> {
        let elements = value
            .as_array()
            .ok_or_else(|| self.mismatch(field, value, ExpectedShape::EnumKeyArray))?;

        elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                element
                    .as_str()
                    .filter(|key| definition.contains(key))
                    .ok_or_else(|| {
                        tracing::debug!(
                            "Element {index} of {field} is not a {} key: {element}",
                            definition.name()
                        );
                        self.reject(Error::enum_array_element(
                            field,
                            index,
                            &element.to_string(),
                            definition.name(),
                        ))
                        .attach(format!("Element type: {}", ValueKind::from(element)))
                        .attach(format!("Valid keys: {}", definition.keys().iter().join(", ")))
                    })
            })
            .collect()
    }

    fn variant<E: FromStr>(
        &self,
        definition: &EnumDefinition<'_>,
        field: &str,
        key: &str,
    ) -> Result<E> {
        // A key in `VARIANTS` that `FromStr` refuses means mismatched strum attributes
        E::from_str(key).map_err(|_| {
            self.reject(Error::unknown_enum_key(field, key, definition.name()))
                .attach("Key is listed in VARIANTS but FromStr rejected it")
        })
    }

    fn skips_optional_enum<R: Requirement>(&self, field: &str) -> bool {
        let skip = !R::REQUIRED && self.config.optional_enums == OptionalEnumPolicy::RequiredOnly;
        if skip && self.record.contains_key(field) {
            tracing::debug!(
                "Ignoring optional enum field {field} on {} (required_only policy)",
                self.target
            );
        }
        skip
    }

    fn absent(&self, field: &str, expected: ExpectedShape) -> Report<Error> {
        self.reject(Error::type_mismatch(field, ValueKind::Absent, expected))
            .attach("Field is required")
    }

    fn mismatch(&self, field: &str, value: &Value, expected: ExpectedShape) -> Report<Error> {
        self.reject(Error::type_mismatch(field, ValueKind::from(value), expected))
            .attach(format!("Expected: {expected}"))
    }

    fn reject(&self, error: Error) -> Report<Error> {
        tracing::debug!("Rejected field for {}: {error}", self.target);
        let field = error.field().map(|field| format!("Field: {field}"));
        let report = Report::new(error).attach(format!("Target: {}", self.target));
        match field {
            Some(field) => report.attach(field),
            None => report,
        }
    }
}
