//! Domain models of the transaction engine.
//!
//! - `allocation` — allocation plans and their parser.
//! - `quote` — `Quote` and the per-request `QuoteBook`.
//! - `trade` — `Holding`, `Trade` and rendering helpers.

pub mod allocation;
pub mod quote;
pub mod trade;

pub use allocation::{Allocation, AllocationParser};
pub use quote::{Quote, QuoteBook};
pub use trade::{Holding, Trade, TradeId};
