use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// TrayNutrition — checks a photographed meal tray against a share of daily intake targets.
#[derive(Parser, Debug)]
#[command(name = "tray_nutrition")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON config file (defaults to tray_config.json if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the detector label map.
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Food catalog file (.csv or .json) replacing the built-in table.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Intake profiles file (.json) replacing the built-in table.
    #[arg(long, global = true)]
    pub profiles: Option<PathBuf>,

    /// Share of the daily intake the meal should cover, in (0, 1].
    #[arg(long, global = true)]
    pub meal_fraction: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect the foods on tray photos and check them against a profile.
    Analyze {
        /// JPEG or PNG tray photos.
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Intake profile name (prompted for when omitted).
        #[arg(short, long)]
        profile: Option<String>,

        /// Food identifiers to add to the detected set.
        #[arg(long, value_delimiter = ',')]
        add: Vec<String>,

        /// Food identifiers to remove from the detected set.
        #[arg(long, value_delimiter = ',')]
        remove: Vec<String>,

        /// Skip the interactive correction step.
        #[arg(long)]
        no_edit: bool,

        /// Print the reports of all photos as one JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Check a list of foods against a profile, without a photo.
    Evaluate {
        /// Food identifiers on the tray.
        #[arg(short, long, value_delimiter = ',', required = true)]
        foods: Vec<String>,

        /// Intake profile name (prompted for when omitted).
        #[arg(short, long)]
        profile: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List intake profiles with their daily and per-meal targets.
    Profiles,

    /// List the food catalog.
    Foods,
}
