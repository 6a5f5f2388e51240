use call_trader::cli::{Cli, Commands};
use call_trader::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    call_trader::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Parse(args) => {
            args.execute()?;
        }
        Commands::Plan(args) => {
            args.execute(&config)?;
        }
        Commands::Place(args) => {
            tracing::info!("Starting order placement");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Exchange: {}", config.exchange.base_url);
            println!(
                "  Trading: {:?} {:?} total_qty={}",
                config.trading.category, config.trading.order_type, config.trading.total_qty
            );
            println!(
                "  Telemetry: {} {:?}",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
