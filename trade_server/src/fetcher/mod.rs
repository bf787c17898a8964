//! Quote provider boundary.
//!
//! The engine only sees the [`QuoteFetcher`] trait: give it symbols, get back a
//! [`QuoteBook`] of usable prices. A symbol the provider does not know, or
//! quotes without a usable price, is simply absent from the book; the caller
//! decides whether that is an error.
//!
//! Implementations:
//! - `http` — the live HTTP/JSON provider, bounded by a request timeout.
//! - `simulated` — offline random-walk prices for a fixed ticker universe.
//! - `fixed` — prices set by hand, for tests and demos.

use crate::error::FetchError;
use crate::model::QuoteBook;

pub mod fixed;
pub mod http;
pub mod simulated;

pub use fixed::FixedQuoteFetcher;
pub use http::HttpQuoteFetcher;
pub use simulated::SimulatedQuoteFetcher;

/// Source of last-trade prices.
///
/// Implementations must be `Send + Sync`: one fetcher is shared by every
/// connection thread.
pub trait QuoteFetcher: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch fresh prices for `symbols` in a single provider round trip.
    fn fetch(&self, symbols: &[String]) -> Result<QuoteBook, FetchError>;
}
