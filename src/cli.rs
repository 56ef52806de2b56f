//! CLI definitions for stracked.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// stracked CLI.
#[derive(Parser)]
#[command(name = "stracked")]
#[command(about = "Website interaction heatmaps")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render pages and store a new snapshot for the site
    Capture {
        /// Site ID the snapshots belong to
        site: String,

        /// Page URLs; each is captured in its own browser context
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Build a heatmap from recorded events against the latest snapshot
    Aggregate {
        /// Site ID
        site: String,

        /// JSON-lines event file (default: events.path from the config)
        #[arg(short, long)]
        events: Option<PathBuf>,
    },

    /// Show the latest snapshot and heatmap of a site
    Show {
        /// Site ID
        site: String,

        /// Print the latest heatmap as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the latest snapshot image of a site to a file
    ExportImage {
        /// Site ID
        site: String,

        /// Output file; the image format's extension is added if missing
        #[arg(short, long)]
        output: PathBuf,
    },
}
