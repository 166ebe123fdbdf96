//! Extractor configuration

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::date::DatePolicy;

/// How optional enum-key fields that are present get treated
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OptionalEnumPolicy {
    /// Present optional values must be valid keys, same as every other extractor
    #[default]
    Validate,
    /// Optional enum calls always return absent without inspecting the value
    ///
    /// Only for compatibility with records produced against the older, narrower behavior.
    RequiredOnly,
}

/// Settings shared by an extractor and every nested extractor it creates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Policy used by `FieldExtractor::get_date`
    pub date_policy:    DatePolicy,
    /// Treatment of optional enum-key fields
    pub optional_enums: OptionalEnumPolicy,
}

impl ExtractorConfig {
    /// Replace the default date policy
    #[must_use]
    pub const fn with_date_policy(mut self, date_policy: DatePolicy) -> Self {
        self.date_policy = date_policy;
        self
    }

    /// Replace the optional enum policy
    #[must_use]
    pub const fn with_optional_enums(mut self, optional_enums: OptionalEnumPolicy) -> Self {
        self.optional_enums = optional_enums;
        self
    }
}
