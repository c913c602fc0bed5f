use clap::Parser;
use restaurant_orders::config::RestaurantConfig;
use restaurant_orders::console::Console;
use restaurant_orders::lifecycle::{self, setup_tracing, Restaurant, ServiceError};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{error, info};

/// Console ordering for a single restaurant
#[derive(Parser, Debug)]
#[command(name = "restaurant")]
#[command(version, about = "Console ordering for a single restaurant")]
struct Cli {
    /// TOML config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Menu file, one `name ; price` per line
    #[arg(short, long)]
    menu: Option<PathBuf>,

    /// Ledger file that finalized orders are appended to
    #[arg(short, long)]
    ledger: Option<PathBuf>,

    /// Write ledger records to the console instead of a file
    #[arg(long)]
    console_ledger: bool,
}

impl Cli {
    fn into_config(self) -> Result<RestaurantConfig, ServiceError> {
        let mut config = match &self.config {
            Some(path) => RestaurantConfig::load(path)?,
            None => RestaurantConfig::default(),
        };
        if let Some(menu) = self.menu {
            config.menu_path = menu;
        }
        if let Some(ledger) = self.ledger {
            config.ledger.path = ledger;
        }
        if self.console_ledger {
            config.ledger.console = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Cli::parse().into_config()?;
    let restaurant = lifecycle::init(&config)?;
    info!(name = restaurant.name(), "Opening console");

    serve(restaurant, BufReader::new(tokio::io::stdin()), std::io::stdout()).await
}

/// Runs the console, then shuts the restaurant down whatever the console's outcome.
/// A console failure takes precedence over a shutdown failure.
async fn serve<R, W>(restaurant: &dyn Restaurant, input: R, output: W) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let outcome = Console::new(restaurant, input, output).run().await;
    if let Err(e) = &outcome {
        error!(error = %e, "Console stopped");
    }

    let shutdown = restaurant.shutdown().await;
    if let Err(e) = &shutdown {
        error!(error = %e, "Shutdown failed");
    }

    outcome?;
    shutdown?;
    Ok(())
}
