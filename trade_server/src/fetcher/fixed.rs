//! Hand-set prices.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::FetchError;
use crate::fetcher::QuoteFetcher;
use crate::model::{Quote, QuoteBook};

/// Fetcher answering from a price table that can be changed between calls.
#[derive(Default)]
pub struct FixedQuoteFetcher {
    prices: RwLock<HashMap<String, f64>>,
    calls: AtomicUsize,
}

impl FixedQuoteFetcher {
    /// Fetcher seeded with `prices`.
    pub fn new<'a>(prices: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let fetcher = Self::default();
        for (symbol, price) in prices {
            fetcher.set(symbol, price);
        }
        fetcher
    }

    /// Set or replace the price of `symbol`.
    pub fn set(&self, symbol: &str, price: f64) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_ascii_uppercase(), price);
    }

    /// Make `symbol` unknown.
    pub fn remove(&self, symbol: &str) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&symbol.to_ascii_uppercase());
    }

    /// How many times `fetch` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuoteFetcher for FixedQuoteFetcher {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn fetch(&self, symbols: &[String]) -> Result<QuoteBook, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prices = self.prices.read().unwrap_or_else(PoisonError::into_inner);
        Ok(symbols
            .iter()
            .filter_map(|symbol| {
                prices
                    .get(&symbol.to_ascii_uppercase())
                    .map(|price| Quote::new(symbol, *price))
            })
            .collect())
    }
}
