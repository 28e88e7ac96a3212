//! # Reservation CLI Tool
//!
//! Command-line driver for the booking wizard: list the offered slots, show
//! the effective configuration, or send a reservation request end to end.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use reservation_core::config::ReservationConfig;
use reservation_core::logging::init_structured_logging;
use reservation_core::models::{DraftSeed, PartySize, ReservationPayload, TimeSlot};
use reservation_core::state_machine::{BookingWizard, SubmissionOutcome};
use reservation_core::validation::parse_iso_date;

#[derive(Parser, Debug)]
#[command(name = "reservation-cli")]
#[command(about = "Command-line interface for table reservation requests")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ./config/reservation.toml or ./reservation.toml)
    #[arg(short, long, env = "RESERVATION_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the offered dining slots
    Slots,

    /// Print the effective configuration as JSON
    Config,

    /// Fill in the wizard and send a reservation request
    Submit {
        /// Party size: 1-7 or 8+
        #[arg(short, long, default_value = "2")]
        guests: PartySize,
        /// Reservation date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Dining slot (HH:MM)
        #[arg(short, long)]
        time: TimeSlot,
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Special requests for the restaurant
        #[arg(long, default_value = "")]
        requests: String,
        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ReservationConfig::load_from(cli.config.as_deref())
        .context("failed to load reservation configuration")?;

    // Verbosity overrides the configured level
    let level = match cli.verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    if let Some(level) = level {
        config.logging.level = Some(level.to_string());
    } else if config.logging.level.is_none() {
        config.logging.level = Some("warn".to_string());
    }
    init_structured_logging(&config.logging);

    info!(endpoint = %config.gateway.endpoint, "Reservation CLI starting");

    match cli.command {
        Commands::Slots => {
            for (group, slots) in TimeSlot::grouped() {
                let rendered: Vec<String> = slots.iter().map(ToString::to_string).collect();
                println!("{:<7} {}", group.label(), rendered.join("  "));
            }
            Ok(())
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Submit {
            guests,
            date,
            time,
            first_name,
            last_name,
            email,
            phone,
            requests,
            dry_run,
        } => {
            let wizard = BookingWizard::from_config(&config)?;
            let seed = DraftSeed {
                party_size: Some(guests),
                date: Some(parse_iso_date(&date)?),
                time: Some(time),
            };

            wizard.open_with(seed)?;
            wizard.continue_to_contact()?;
            wizard.set_first_name(first_name)?;
            wizard.set_last_name(last_name)?;
            wizard.set_email(email)?;
            wizard.set_phone(phone)?;
            wizard.set_special_requests(requests)?;

            if !wizard.is_step2_valid() {
                bail!("a first name and a valid email address are required");
            }

            if dry_run {
                let payload = ReservationPayload::from_draft(&wizard.draft())
                    .context("reservation draft is missing a date or time")?;
                println!("{}", serde_json::to_string_pretty(&payload)?);
                wizard.close();
                return Ok(());
            }

            let outcome = wizard.submit_reservation().await?;
            wizard.close();

            match outcome {
                SubmissionOutcome::Confirmed(summary) => {
                    println!("{summary}");
                    Ok(())
                }
                SubmissionOutcome::Failed(notice) => bail!("{notice}"),
                SubmissionOutcome::Discarded => bail!("reservation request was abandoned"),
            }
        }
    }
}
