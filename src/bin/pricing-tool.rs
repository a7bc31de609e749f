//! Pricing management CLI tool
//!
//! This tool helps initialize and manage pricing data across all providers

use clap::Command;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    warn!("Pricing tool is temporarily disabled due to missing modules");
    info!("This will be fixed when the pricing modules are implemented");

    let _matches = Command::new("Pricing Management Tool")
        .version("1.0")
        .author("LiteLLM Team")
        .about("Manage pricing data for all AI providers")
        .subcommand(
            Command::new("init").about("Initialize pricing data from predefined configurations"),
        )
        .get_matches();

    Ok(())
}
