use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use vitrina::core::Country;
use vitrina::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show display prices for canonical catalog prices
    Price {
        /// Canonical prices in the base currency
        #[arg(required = true)]
        amounts: Vec<f64>,
        /// Show prices for this country instead of the stored one (AR or PY)
        #[arg(long)]
        country: Option<Country>,
    },
    /// Show the active country, or store a new selection (AR or PY)
    Country { select: Option<Country> },
    /// Build the WhatsApp order message and links for an order file
    Checkout {
        /// YAML file describing the order
        order: PathBuf,
        #[arg(long)]
        country: Option<Country>,
    },
    /// Build a WhatsApp share message and link for a catalog item file
    Share {
        /// YAML file describing the item
        item: PathBuf,
        #[arg(long)]
        country: Option<Country>,
    },
}

impl From<Commands> for vitrina::AppCommand {
    fn from(cmd: Commands) -> vitrina::AppCommand {
        match cmd {
            Commands::Price { amounts, country } => vitrina::AppCommand::Price { amounts, country },
            Commands::Country { select } => vitrina::AppCommand::Country { select },
            Commands::Checkout { order, country } => vitrina::AppCommand::Checkout {
                order_path: order,
                country,
            },
            Commands::Share { item, country } => vitrina::AppCommand::Share {
                item_path: item,
                country,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => vitrina::cli::setup::setup(),
        Some(cmd) => vitrina::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
