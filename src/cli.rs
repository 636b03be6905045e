//! CLI definitions for foodroute.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foodroute_store::KEY_AREA_PLACES;

/// foodroute CLI.
#[derive(Parser)]
#[command(name = "foodroute")]
#[command(about = "Scrape delivery listings, geocode restaurants and build road-distance matrices")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scrape restaurant names from the listing page
    Scrape {
        /// Listing URL (overrides config and DELIVEROO_BASE_URL)
        #[arg(long)]
        url: Option<String>,
    },

    /// Resolve scraped names to places
    Resolve,

    /// Keep resolved places inside the configured area
    Filter,

    /// Build the distance matrix CSV
    Matrix {
        /// Store key holding the keyed places
        #[arg(long, default_value = KEY_AREA_PLACES)]
        source_key: String,

        /// CSV output path (overrides storage.matrix_csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the routing service health endpoint
    Health,

    /// Show the routing service status
    Status,

    /// Scrape, resolve, filter and build the matrix (default)
    Run {
        /// Listing URL (overrides config and DELIVEROO_BASE_URL)
        #[arg(long)]
        url: Option<String>,
    },
}
