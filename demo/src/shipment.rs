//! Shipment value object assembled from an untyped JSON record

use std::fmt;

use chrono::{DateTime, FixedOffset};
use error_stack::Report;
use field_guard::{
    EnumDefinition, Error, ExtractorConfig, FieldExtractor, Optional, ParsedDate, Required,
};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, VariantNames};

/// Field names of a shipment record
#[derive(AsRefStr)]
#[strum(serialize_all = "camelCase")]
enum ShipmentField {
    TrackingId,
    WeightKg,
    Parcels,
    Fragile,
    ShippedAt,
    DeliverBy,
    Priority,
    Handling,
    Origin,
    Destination,
    Notes,
}

/// Field names of an address record
#[derive(AsRefStr)]
#[strum(serialize_all = "camelCase")]
enum AddressField {
    Street,
    City,
    Country,
}

const COUNTRIES: EnumDefinition<'static> =
    EnumDefinition::new("Country", &["DE", "FR", "GB", "NO", "SE"]);

/// Delivery speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Ground delivery
    Standard,
    /// Next available flight
    Express,
    /// Delivered the next morning
    Overnight,
}

/// Handling instruction printed on the parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Handling {
    /// Keep away from moisture
    KeepDry,
    /// Keep upright
    ThisSideUp,
    /// Breakable contents
    Fragile,
    /// Refrigerate
    Perishable,
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Street and number
    pub street:  String,
    /// City name
    pub city:    String,
    /// Two-letter country key
    pub country: String,
}

impl Address {
    fn from_fields(fields: FieldExtractor<'_>) -> Result<Self, Report<Error>> {
        Ok(Self {
            street:  fields.get_string(AddressField::Street, Required)?,
            city:    fields.get_string(AddressField::City, Required)?,
            country: fields
                .get_enum(&COUNTRIES, AddressField::Country, Required)?
                .to_string(),
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} ({})", self.street, self.city, self.country)
    }
}

/// A parcel shipment
#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    /// Carrier tracking number
    pub tracking_id: String,
    /// Total weight in kilograms
    pub weight_kg:   f64,
    /// Number of parcels
    pub parcels:     i64,
    /// Whether the sender flagged the contents as fragile
    pub fragile:     Option<bool>,
    /// When the shipment left the origin
    pub shipped_at:  DateTime<FixedOffset>,
    /// Promised delivery date, read with the configured date policy
    pub deliver_by:  Option<ParsedDate>,
    /// Delivery speed
    pub priority:    Priority,
    /// Handling instructions, empty when none were given
    pub handling:    Vec<Handling>,
    /// Sender address
    pub origin:      Address,
    /// Recipient address
    pub destination: Address,
    /// Free-form notes
    pub notes:       Option<String>,
}

impl Shipment {
    /// Build a shipment from `record`, failing on the first invalid field
    pub fn from_record(record: &Value, config: ExtractorConfig) -> Result<Self, Report<Error>> {
        let fields = FieldExtractor::with_config(record, "Shipment", config)?;

        Ok(Self {
            tracking_id: fields.get_string(ShipmentField::TrackingId, Required)?,
            weight_kg:   fields.get_number(ShipmentField::WeightKg, Required)?,
            parcels:     fields.get_integer(ShipmentField::Parcels, Required)?,
            fragile:     fields.get_boolean(ShipmentField::Fragile, Optional)?,
            shipped_at:  fields.get_iso_date(ShipmentField::ShippedAt, Required)?,
            deliver_by:  fields.get_date(ShipmentField::DeliverBy, Optional)?,
            priority:    fields.get_enum_key::<Priority, _>(ShipmentField::Priority, Required)?,
            handling:    fields
                .get_array_of_enum_keys::<Handling, _>(ShipmentField::Handling, Optional)?
                .unwrap_or_default(),
            origin:      Address::from_fields(fields.get_record(
                ShipmentField::Origin,
                "Address",
                Required,
            )?)?,
            destination: Address::from_fields(fields.get_record(
                ShipmentField::Destination,
                "Address",
                Required,
            )?)?,
            notes:       fields.get_string(ShipmentField::Notes, Optional)?,
        })
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shipment {} ({})", self.tracking_id, self.priority)?;
        writeln!(f, "  from:      {}", self.origin)?;
        writeln!(f, "  to:        {}", self.destination)?;
        writeln!(
            f,
            "  parcels:   {} totalling {} kg{}",
            self.parcels,
            self.weight_kg,
            if self.fragile == Some(true) { ", fragile" } else { "" }
        )?;
        writeln!(f, "  shipped:   {}", self.shipped_at.to_rfc3339())?;
        if let Some(deliver_by) = self.deliver_by {
            writeln!(f, "  due:       {}", deliver_by.date_naive())?;
        }
        if !self.handling.is_empty() {
            let handling: Vec<String> = self.handling.iter().map(ToString::to_string).collect();
            writeln!(f, "  handling:  {}", handling.join(", "))?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "  notes:     {notes}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "tests fail on broken fixtures")]
mod tests {
    use field_guard::{DatePolicy, ErrorKind};
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        serde_json::from_str(include_str!("../data/shipment.json")).expect("sample is valid JSON")
    }

    #[test]
    fn test_sample_shipment() {
        let shipment =
            Shipment::from_record(&sample(), ExtractorConfig::default()).expect("sample is valid");

        assert_eq!(shipment.tracking_id, "FG-20240131-0042");
        assert_eq!(shipment.parcels, 3);
        assert_eq!(shipment.priority, Priority::Express);
        assert_eq!(shipment.handling, vec![Handling::KeepDry, Handling::ThisSideUp]);
        assert_eq!(shipment.destination.country, "FR");
        assert!(matches!(shipment.deliver_by, Some(ParsedDate::Calendar(_))));
        assert_eq!(shipment.notes, None);
    }

    #[test]
    fn test_date_policy_changes_deliver_by() {
        let config = ExtractorConfig::default().with_date_policy(DatePolicy::IsoTimestamp);
        let report = Shipment::from_record(&sample(), config)
            .err()
            .expect("bare date is not a timestamp");

        assert_eq!(report.current_context().field(), Some("deliverBy"));
        assert_eq!(report.current_context().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_unknown_country_in_nested_address() {
        let mut record = sample();
        record["origin"]["country"] = json!("XX");

        let report = Shipment::from_record(&record, ExtractorConfig::default())
            .err()
            .expect("XX is not a country key");

        assert_eq!(
            report.current_context(),
            &Error::unknown_enum_key("country", "XX", "Country")
        );
    }
}
