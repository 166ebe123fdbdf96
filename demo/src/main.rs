//! # field_guard demo
//!
//! Reads a JSON file, builds a [`Shipment`] from it and prints the result.
//!
//! ```text
//! field_guard_demo <path.json> [calendar|iso_timestamp]
//! ```
//!
//! The optional second argument selects the date policy used for the `deliverBy` field. Set
//! `RUST_LOG=field_guard=debug` to see every rejected field.

use std::error::Error;
use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, ValueHint};
use field_guard::{DatePolicy, ExtractorConfig};
use serde_json::Value;
use shipment::Shipment;
use strum::VariantNames;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod shipment;

#[derive(Debug, Parser)]
#[command(
    name = "field_guard_demo",
    version,
    about = "Build a shipment value object from a JSON file",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(help = "JSON file holding one shipment record", value_hint = ValueHint::FilePath)]
    path:        PathBuf,
    #[arg(
        default_value_t = DatePolicy::default(),
        value_parser = PossibleValuesParser::new(DatePolicy::VARIANTS.iter().copied())
            .try_map(|raw| raw.parse::<DatePolicy>()),
        help = "Date policy for the deliverBy field"
    )]
    date_policy: DatePolicy,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();

    let contents = std::fs::read_to_string(&cli.path)?;
    let record: Value = serde_json::from_str(&contents)?;
    let config = ExtractorConfig::default().with_date_policy(cli.date_policy);

    let shipment =
        Shipment::from_record(&record, config).map_err(|report| format!("{report:?}"))?;
    tracing::info!(
        "Built shipment {} from {}",
        shipment.tracking_id,
        cli.path.display()
    );

    print!("{shipment}");
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` and defaulting to `warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    Registry::default().with(filter).with(stderr_layer).init();
}
