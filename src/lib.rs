pub mod checkout;
pub mod cli;
pub mod core;
pub mod pricing;
pub mod providers;
pub mod resolver;
pub mod session;
pub mod store;

use crate::core::Country;
use crate::core::config::AppConfig;
use crate::session::PricingSession;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    Price {
        amounts: Vec<f64>,
        country: Option<Country>,
    },
    Country {
        select: Option<Country>,
    },
    Checkout {
        order_path: PathBuf,
        country: Option<Country>,
    },
    Share {
        item_path: PathBuf,
        country: Option<Country>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("vitrina starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let preferences = store::open_preferences(&config);

    match command {
        AppCommand::Country { select } => cli::country::run(&config, preferences, select).await,
        AppCommand::Price { amounts, country } => {
            let session = PricingSession::from_config(&config, preferences, country).await?;
            cli::price::run(&session, &amounts).await
        }
        AppCommand::Checkout {
            order_path,
            country,
        } => {
            let session = PricingSession::from_config(&config, preferences, country).await?;
            cli::checkout::run_order(&config, &session, &order_path).await
        }
        AppCommand::Share { item_path, country } => {
            let session = PricingSession::from_config(&config, preferences, country).await?;
            cli::checkout::run_share(&config, &session, &item_path).await
        }
    }
}
