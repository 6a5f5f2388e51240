//! `parse` subcommand

use crate::prediction::AdviserPrediction;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Trade-call text file
    pub file: PathBuf,

    /// Adviser name recorded on the prediction
    #[arg(short, long, default_value = "unknown")]
    pub adviser: String,
}

impl ParseArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.file)?;
        let prediction = AdviserPrediction::parse(&self.adviser, &text)?;
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        Ok(())
    }
}
