//! Closed sets of valid enum keys
//!
//! An [`EnumDefinition`] is supplied by the caller on every enum-typed extraction. It can be
//! derived from any enum implementing [`strum::VariantNames`] or spelled out as a constant list.

use std::fmt;

use itertools::Itertools;
use strum::VariantNames;

/// Name and key set of an enumeration, used for membership checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDefinition<'k> {
    name: &'k str,
    keys: &'k [&'k str],
}

impl<'k> EnumDefinition<'k> {
    /// Build a definition from an explicit key list
    pub const fn new(name: &'k str, keys: &'k [&'k str]) -> Self {
        Self { name, keys }
    }

    /// Human-readable name used in diagnostics
    pub const fn name(&self) -> &'k str {
        self.name
    }

    /// Every valid key, in declaration order
    pub const fn keys(&self) -> &'k [&'k str] {
        self.keys
    }

    /// Exact, case-sensitive membership test
    pub fn contains(&self, candidate: &str) -> bool {
        self.keys.contains(&candidate)
    }
}

impl EnumDefinition<'static> {
    /// Derive the definition from a `strum::VariantNames` enum
    ///
    /// Keys follow the enum's strum serialization, so
    /// `#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]` yields keys like `"ONE"`.
    pub fn of<E: VariantNames>() -> Self {
        let full_name = std::any::type_name::<E>();
        let name = full_name.rsplit("::").next().unwrap_or(full_name);
        Self::new(name, E::VARIANTS)
    }
}

impl fmt::Display for EnumDefinition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.keys.iter().join(", "))
    }
}
