//! `slots` CLI — generate slot catalogs and resolve booking availability.
//!
//! ## Usage
//!
//! ```sh
//! # Generate an hourly catalog for a working day
//! slots catalog --open 09:00 --close 18:00 --step 60 -o catalog.json
//!
//! # Resolve availability of desk-4 on a date (reservations from a file)
//! slots resolve -c catalog.json -r reservations.json --resource desk-4 --date 2026-03-16
//!
//! # Reservations from stdin, legacy overlap test, result written to a file
//! cat reservations.json | slots resolve -c catalog.json --resource desk-4 \
//!     --date 2026-03-16 --policy legacy -o availability.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `--verbose` to see them.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use slot_engine::{OverlapPolicy, Reservation, SlotAvailabilityResolver, SlotCatalog};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Workspace booking slot availability")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve which catalog slots are still available for a resource
    Resolve {
        /// Slot catalog JSON file
        #[arg(short, long)]
        catalog: String,
        /// Reservations JSON file (reads from stdin if omitted or "-")
        #[arg(short, long)]
        reservations: Option<String>,
        /// Resource (seat, desk, room) to check
        #[arg(long)]
        resource: String,
        /// Booking date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Overlap test: "half-open" or "legacy"
        #[arg(long, env = "SLOTS_POLICY", default_value = "half-open")]
        policy: OverlapPolicy,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate a uniform slot catalog between opening and closing time
    Catalog {
        /// Opening time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        open: NaiveTime,
        /// Closing time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        close: NaiveTime,
        /// Slot length in minutes
        #[arg(long, default_value_t = 60)]
        step: u32,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Resolve {
            catalog,
            reservations,
            resource,
            date,
            policy,
            output,
        } => {
            let catalog_path = catalog;
            let catalog_json = read_input(Some(catalog_path.as_str()))?;
            let catalog = SlotCatalog::from_json(&catalog_json)
                .with_context(|| format!("Invalid slot catalog: {}", catalog_path))?;
            if catalog.is_empty() {
                anyhow::bail!("Slot catalog has no slots: {}", catalog_path);
            }

            let reservations_json = read_input(reservations.as_deref())?;
            let reservations: Vec<Reservation> = serde_json::from_str(&reservations_json)
                .context("Failed to parse reservations JSON")?;
            tracing::info!(
                slots = catalog.len(),
                reservations = reservations.len(),
                "loaded inputs"
            );

            let result = SlotAvailabilityResolver::new(policy)
                .resolve(&resource, date, catalog.intervals(), &reservations)
                .context("Failed to resolve availability")?;
            tracing::info!(
                available = result.available_count(),
                booked = result.slots.len() - result.available_count(),
                "resolved"
            );

            let pretty = serde_json::to_string_pretty(&result)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Catalog {
            open,
            close,
            step,
            output,
        } => {
            let catalog = SlotCatalog::uniform(open, close, step)
                .context("Failed to generate slot catalog")?;
            write_output(output.as_deref(), &catalog.to_json()?)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Accept `HH:MM` as well as `HH:MM:SS`.
fn parse_time(raw: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{}', expected HH:MM", raw))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
