//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use diary_core::EventForm;

/// diary - the agency diary from the terminal
#[derive(Debug, Parser)]
#[command(name = "diary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "DIARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the diary store (overrides the config file)
    #[arg(long, env = "DIARY_STORE")]
    pub store: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a working week as a day grid (the default)
    Week {
        /// Any date inside the week; defaults to the current week
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Show a single day in detail
    Day {
        /// The date to show (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Show the week as a flat agenda with the focus event marked
    Agenda {
        /// Any date inside the week; defaults to the current week
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Import a week from the diary store and report what it holds
    Import {
        /// Any date inside the week; defaults to the current week
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Book an event into its week
    Add(AddArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Booking form fields.
///
/// Left as free text; the composer reports every missing or malformed field
/// at once.
#[derive(Debug, Clone, Default, Args)]
pub struct AddArgs {
    /// Event title
    #[arg(long)]
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    /// Appointment type, e.g. Viewing or Valuation
    #[arg(long = "type")]
    pub event_type: Option<String>,

    /// Negotiator handling the appointment
    #[arg(long)]
    pub negotiator: Option<String>,

    /// Comma-separated attendees, each "Name" or "Name - Role"
    #[arg(long)]
    pub attendees: Option<String>,

    /// Property reference id
    #[arg(long)]
    pub property: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl From<AddArgs> for EventForm {
    fn from(args: AddArgs) -> Self {
        Self {
            title: args.title,
            date: args.date,
            start: args.start,
            end: args.end,
            event_type: args.event_type,
            negotiator: args.negotiator,
            attendees: args.attendees,
            property: args.property,
            location: args.location,
            notes: args.notes,
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
