//! Adviser prediction module
//!
//! Extracts structured trade parameters from free-form trade-call text and
//! fans them out into orders.

mod parser;
mod types;

pub use types::{AdviserPrediction, ParseError};
