//! `plan` subcommand

use crate::config::Config;
use crate::prediction::AdviserPrediction;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Trade-call text file
    pub file: PathBuf,

    /// Instrument symbol, e.g. SOLUSDT
    #[arg(short, long)]
    pub symbol: String,

    /// Total quantity split across the fan-out (config default otherwise)
    #[arg(short, long)]
    pub qty: Option<Decimal>,

    /// Adviser name recorded on the prediction
    #[arg(short, long, default_value = "unknown")]
    pub adviser: String,
}

impl PlanArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.file)?;
        let prediction = AdviserPrediction::parse(&self.adviser, &text)?;
        let qty = self.qty.unwrap_or(config.trading.total_qty);
        let complex = prediction.complex_order(
            config.trading.category,
            &self.symbol,
            config.trading.order_type,
            qty,
        )?;

        println!("Plan for {} ({:?}):", self.symbol, prediction.side);
        for order in &complex.orders {
            println!(
                "  {} {} @ {}  sl={}  tp={}  risk_rate={}",
                order.side.as_str(),
                order.qty(),
                order.open.price(),
                order
                    .stop_losses
                    .last()
                    .map(|p| p.price().to_string())
                    .unwrap_or_else(|| "-".to_string()),
                order
                    .take_profits
                    .last()
                    .map(|p| p.price().to_string())
                    .unwrap_or_else(|| "-".to_string()),
                order.risk_rate,
            );
        }
        println!("Total: qty={} value={}", complex.qty, complex.value);
        println!(
            "Risk: loss={} profit={} rate={}",
            complex.loss, complex.profit, complex.risk_profit_rate
        );
        Ok(())
    }
}
