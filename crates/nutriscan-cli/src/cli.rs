//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// NutriScan - Check packaged food against your health profile
#[derive(Parser)]
#[command(name = "nutriscan")]
#[command(about = "Classify food products as healthy, ok or risky for you", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile JSON file
    ///
    /// Overrides NUTRISCAN_PROFILE and the config file. Defaults to
    /// ~/.local/share/nutriscan/profile.json.
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a product JSON file against your profile
    Classify {
        /// Product JSON file ({name, brand, ingredients, nutritionalInfo})
        #[arg(short, long)]
        product: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the 0-100 nutrition score for a product
    Score {
        /// Product JSON file
        #[arg(short, long)]
        product: PathBuf,
    },

    /// Scan an image and classify the product
    Scan {
        #[command(subcommand)]
        action: ScanAction,
    },

    /// Manage your health profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Show the reference tables used for matching
    Knowledge {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config)
        #[arg(long)]
        host: Option<String>,

        /// Disable authentication (for local development only)
        #[arg(long)]
        no_auth: bool,

        /// Directory of static files to serve (web UI)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ScanAction {
    /// Photo of a barcode
    Barcode {
        /// Image file
        #[arg(short, long)]
        image: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Photo of an ingredient label
    Ingredients {
        /// Image file
        #[arg(short, long)]
        image: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the current profile
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update profile fields (lists are comma-separated and replace the old value)
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// e.g. "peanuts,tree nuts"
        #[arg(long)]
        allergens: Option<String>,

        /// e.g. "vegan,low sugar"
        #[arg(long)]
        diets: Option<String>,

        /// e.g. "muscle gain,endurance"
        #[arg(long)]
        goals: Option<String>,

        /// e.g. "diabetes" or "none"
        #[arg(long)]
        conditions: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Reset the profile to defaults
    Reset,

    /// Add an allergen not in the common list
    AddAllergen {
        /// Allergen name (e.g. "Sesame")
        label: String,
    },

    /// Remove a custom allergen
    RemoveAllergen {
        /// Allergen key, as shown by `profile show`
        key: String,
    },
}
