use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::currency::Currency;
use crate::types::{SortKey, Step};

/// Holiday Planner - plan a trip from the terminal
#[derive(Parser)]
#[command(name = "holiday-planner")]
#[command(about = "Plan a trip: destination, activities, accommodation and transport")]
#[command(version)]
pub struct Cli {
    /// Planner configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Display currency code, e.g. USD or EUR
    #[arg(long, global = true)]
    pub currency: Option<Currency>,

    /// Write logs to this file. The interactive planner logs nowhere else.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive planner
    Plan {
        /// Start from this trip request file
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Destination to start with
        #[arg(short, long)]
        destination: Option<String>,

        /// Budget to start with
        #[arg(short, long)]
        budget: Option<f64>,

        /// Save the finished plan to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print the catalog for a destination
    Catalog {
        /// Destination, e.g. "Bali, Indonesia"
        destination: String,

        /// Only print one step's catalog
        #[arg(short, long)]
        step: Option<Step>,

        #[arg(short, long)]
        budget: Option<f64>,

        /// Trip length in days
        #[arg(long)]
        duration: Option<u32>,

        /// Keep only items of this type (repeatable)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Maximum total price per item
        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum rating
        #[arg(long)]
        min_rating: Option<f64>,

        /// Sort order
        #[arg(long, default_value_t = SortKey::Popularity)]
        sort: SortKey,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Select items without the interactive planner and print the cost summary
    Quote {
        /// Trip request file
        #[arg(short, long)]
        request: PathBuf,

        /// Activity id to select (repeatable)
        #[arg(long = "activity")]
        activities: Vec<String>,

        /// Accommodation id to select (repeatable)
        #[arg(long = "accommodation")]
        accommodation: Vec<String>,

        /// Transportation id to select (repeatable)
        #[arg(long = "transportation")]
        transportation: Vec<String>,

        #[arg(long)]
        json: bool,
    },
    /// Print the day-by-day itinerary for a request
    Itinerary {
        /// Trip request file
        #[arg(short, long)]
        request: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Validate a trip request file
    Validate {
        /// Path to trip request file to validate
        request: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
