//! NutriScan CLI - Food product health classifier
//!
//! Usage:
//!   nutriscan classify --product FILE        Classify a product against your profile
//!   nutriscan scan barcode --image FILE      Scan a barcode photo
//!   nutriscan profile set --allergens dairy  Update your profile
//!   nutriscan serve --port 3000              Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { product, json } => {
            let store = commands::open_store(&config, cli.profile.as_deref())?;
            commands::cmd_classify(&store, &config, &product, json)
        }
        Commands::Score { product } => commands::cmd_score(&product),
        Commands::Scan { action } => {
            let store = commands::open_store(&config, cli.profile.as_deref())?;
            match action {
                ScanAction::Barcode { image, json } => {
                    commands::cmd_scan(&store, &config, commands::ScanKind::Barcode, &image, json)
                        .await
                }
                ScanAction::Ingredients { image, json } => {
                    commands::cmd_scan(
                        &store,
                        &config,
                        commands::ScanKind::Ingredients,
                        &image,
                        json,
                    )
                    .await
                }
            }
        }
        Commands::Profile { action } => {
            let store = commands::open_store(&config, cli.profile.as_deref())?;
            match action {
                None => commands::cmd_profile_show(&store, false),
                Some(ProfileAction::Show { json }) => commands::cmd_profile_show(&store, json),
                Some(ProfileAction::Set {
                    name,
                    age,
                    height,
                    weight,
                    allergens,
                    diets,
                    goals,
                    conditions,
                    notes,
                }) => {
                    let update = commands::build_profile_update(commands::ProfileArgs {
                        name,
                        age,
                        height,
                        weight,
                        allergens,
                        diets,
                        goals,
                        conditions,
                        notes,
                    })?;
                    commands::cmd_profile_set(&store, update)
                }
                Some(ProfileAction::Reset) => commands::cmd_profile_reset(&store),
                Some(ProfileAction::AddAllergen { label }) => {
                    commands::cmd_profile_add_allergen(&store, &label)
                }
                Some(ProfileAction::RemoveAllergen { key }) => {
                    commands::cmd_profile_remove_allergen(&store, &key)
                }
            }
        }
        Commands::Knowledge { json } => commands::cmd_knowledge(json),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            let store = commands::open_store(&config, cli.profile.as_deref())?;
            commands::cmd_serve(
                store,
                &config,
                host.as_deref(),
                port,
                no_auth,
                static_dir.as_deref(),
            )
            .await
        }
    }
}
