//! Orders and positions
//!
//! Market positions with exact decimal arithmetic, single orders with
//! protective ladders, and batch aggregation.

mod complex;
mod position;
mod simple;
mod types;

pub use complex::ComplexOrder;
pub use position::MarketPosition;
pub use simple::{LevelOutcome, SimpleOrder};
pub use types::{OrderCategory, OrderError, OrderSide, OrderType};
