//! Transaction engine for percentage-based stock purchases.
//!
//! A client submits a plan such as `AAPL:60%,MSFT:40%` with a cash budget. The
//! engine prices it with fresh quotes, buys whole shares, records the trade in
//! the ledger and later values it against current prices.
//!
//! - `model` — allocations, quotes, holdings and trades.
//! - `allocator` — cash to whole shares plus unvested remainder.
//! - `ledger` — concurrency-safe, append-only trade store.
//! - `valuation` — current value and profit/loss of a trade.
//! - `fetcher` — quote provider trait and implementations.
//! - `service` — Buy and Check orchestration.
//! - `connection`, `server` — the RPC front end over TCP.

pub mod allocator;
pub mod connection;
pub mod error;
pub mod fetcher;
pub mod ledger;
pub mod model;
pub mod server;
pub mod service;
pub mod valuation;

pub use error::{FetchError, TransactionError};
pub use service::{ServiceConfig, TransactionService};
