//! CLI interface for call-trader
//!
//! Provides subcommands for:
//! - `parse`: Parse a trade-call text file
//! - `plan`: Preview the order fan-out and risk for a call
//! - `place`: Place the planned orders on the exchange
//! - `config`: Show effective configuration

mod parse;
mod place;
mod plan;

pub use parse::ParseArgs;
pub use place::PlaceArgs;
pub use plan::PlanArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "call-trader")]
#[command(about = "Turns adviser trade calls into risk-checked Bybit derivatives orders")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a trade-call text file
    Parse(ParseArgs),
    /// Preview the order fan-out and risk for a call
    Plan(PlanArgs),
    /// Place the planned orders on the exchange
    Place(PlaceArgs),
    /// Show effective configuration
    Config,
}
