//! Offline quote source.
//!
//! Prices for a fixed universe of liquid tickers start at 100 and take a small
//! random walk (uniform in `[-1%, +1%]`) on every fetch, so repeated Checks
//! show movement without a network connection. Symbols outside the universe
//! are unknown.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use rand::Rng;
use strum_macros::{Display, EnumString};

use crate::error::FetchError;
use crate::fetcher::QuoteFetcher;
use crate::model::{Quote, QuoteBook};

const INITIAL_PRICE: f64 = 100.0;
const MIN_PRICE: f64 = 0.01;

/// Tickers the simulated market knows about.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SimulatedTicker {
    AAPL,
    MSFT,
    GOOGL,
    AMZN,
    NVDA,
    META,
    TSLA,
    JPM,
    V,
    NFLX,
    ADBE,
    INTC,
    ORCL,
    CSCO,
    KO,
    PEP,
    DIS,
    NKE,
    #[strum(serialize = "BRK.B")]
    BrkB,
}

/// Random-walk fetcher over [`SimulatedTicker`].
#[derive(Default)]
pub struct SimulatedQuoteFetcher {
    prices: Mutex<HashMap<SimulatedTicker, f64>>,
}

impl SimulatedQuoteFetcher {
    /// Fetcher with every ticker at its initial price.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next price of a small random walk around `current_price`, never below one cent.
    pub fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.01..0.01);
        (current_price * (1.0 + change)).max(MIN_PRICE)
    }
}

impl QuoteFetcher for SimulatedQuoteFetcher {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn fetch(&self, symbols: &[String]) -> Result<QuoteBook, FetchError> {
        let mut prices = self.prices.lock().unwrap_or_else(PoisonError::into_inner);
        let mut book = QuoteBook::default();
        for symbol in symbols {
            let Ok(ticker) = symbol.parse::<SimulatedTicker>() else {
                continue;
            };
            let price = prices.entry(ticker).or_insert(INITIAL_PRICE);
            *price = Self::next_price(*price);
            book.insert(Quote::new(&ticker.to_string(), *price));
        }
        Ok(book)
    }
}
