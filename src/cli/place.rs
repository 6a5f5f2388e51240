//! `place` subcommand

use crate::config::Config;
use crate::gateway::{BybitConfig, BybitGateway};
use crate::prediction::AdviserPrediction;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PlaceArgs {
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

    /// Fetch constraints and prices but skip placement
    #[arg(long)]
    pub dry_run: bool,
}

impl PlaceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.file)?;
        let prediction = AdviserPrediction::parse(&self.adviser, &text)?;
        let qty = self.qty.unwrap_or(config.trading.total_qty);
        let mut complex = prediction.complex_order(
            config.trading.category,
            &self.symbol,
            config.trading.order_type,
            qty,
        )?;

        let gateway = BybitGateway::with_config(BybitConfig::from(&config.exchange));
        for order in &mut complex.orders {
            order.refresh_constraints(&gateway).await?;
            order.fit_positions();
            order.refresh_price(&gateway).await?;
            if self.dry_run {
                tracing::info!(order_id = %order.id, "dry run, skipping placement");
                continue;
            }
            order.place(&gateway).await?;
            order.set_partial_stops(&gateway).await?;
        }
        complex.calculate()?;

        let verb = if self.dry_run { "Planned" } else { "Placed" };
        println!(
            "{} {} orders: qty={} value={} risk_rate={}",
            verb,
            complex.orders.len(),
            complex.qty,
            complex.value,
            complex.risk_profit_rate
        );
        Ok(())
    }
}
