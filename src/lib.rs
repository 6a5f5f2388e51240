//! call-trader: turns adviser trade calls into risk-checked Bybit orders
//!
//! This library provides the core components for:
//! - Market positions with exact decimal arithmetic
//! - Exchange constraint fitting (tick size, lot step, bounds)
//! - Single and batch order risk computation
//! - Free-text trade-call parsing (multilingual)
//! - Bybit v5 gateway and paper gateway

pub mod cli;
pub mod config;
pub mod gateway;
pub mod instrument;
pub mod order;
pub mod prediction;
pub mod telemetry;
