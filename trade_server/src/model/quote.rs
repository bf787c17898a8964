//! Quote data model.
//!
//! A `Quote` is a symbol with its last traded price. Quotes are fetched fresh
//! for every Buy and Check and collected into a `QuoteBook`, which only ever
//! holds positive, finite prices: anything else means "no usable quote" and is
//! left out, so downstream code never divides by zero.

use std::collections::HashMap;

/// Market quote for a single ticker symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Upper-case ticker.
    pub symbol: String,
    /// Last traded price.
    pub price: f64,
}

impl Quote {
    /// Build a quote, normalizing the symbol to upper case.
    pub fn new(symbol: &str, price: f64) -> Self {
        Self {
            symbol: symbol.trim().to_ascii_uppercase(),
            price,
        }
    }

    /// Whether the price can be traded against.
    pub fn is_usable(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// Fresh prices keyed by upper-case symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteBook {
    prices: HashMap<String, f64>,
}

impl QuoteBook {
    /// Add `quote` if its price is usable. Returns whether it was kept.
    pub fn insert(&mut self, quote: Quote) -> bool {
        if !quote.is_usable() {
            return false;
        }
        self.prices.insert(quote.symbol, quote.price);
        true
    }

    /// Price for `symbol`, if one was quoted.
    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(&symbol.to_ascii_uppercase()).copied()
    }

    /// Number of usable quotes.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// `true` when no usable quote was received.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Symbols of `wanted` that have no usable quote, in the given order.
    pub fn missing<'a>(&self, wanted: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        wanted
            .into_iter()
            .filter(|symbol| self.price(symbol).is_none())
            .collect()
    }
}

impl FromIterator<Quote> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        let mut book = QuoteBook::default();
        for quote in iter {
            book.insert(quote);
        }
        book
    }
}
