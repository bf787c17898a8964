//! Holdings and trades.
//!
//! A `Trade` is created once by a successful Buy and never changes afterwards;
//! the ledger hands out shared `Arc<Trade>` handles to readers.

use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier of a recorded trade. Starts at 1.
pub type TradeId = u64;

/// Whole shares of one symbol bought at a fixed price.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    /// Upper-case ticker.
    pub symbol: String,
    /// Number of whole shares.
    pub shares: u64,
    /// Price per share at purchase time.
    pub cost_basis: f64,
}

impl Holding {
    /// Amount paid for the holding.
    pub fn cost(&self) -> f64 {
        self.cost_basis * self.shares as f64
    }
}

/// Renders as `SYMBOL:SHARES:$COSTBASIS`, e.g. `AAPL:6:$150`.
impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:${}", self.symbol, self.shares, self.cost_basis)
    }
}

/// An immutable record of one Buy.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Ledger-assigned identifier.
    pub id: TradeId,
    /// Holdings in plan order.
    pub holdings: Vec<Holding>,
    /// Cash left after integer-share rounding.
    pub unvested: f64,
    /// When the ledger recorded the trade.
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// Distinct symbols held, in holding order.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = Vec::with_capacity(self.holdings.len());
        for holding in &self.holdings {
            if !symbols.contains(&holding.symbol) {
                symbols.push(holding.symbol.clone());
            }
        }
        symbols
    }
}

/// Comma-joins the `Display` form of each item.
pub fn join_rendered<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(symbol: &str, shares: u64, cost_basis: f64) -> Holding {
        Holding {
            symbol: symbol.into(),
            shares,
            cost_basis,
        }
    }

    #[test]
    fn holding_renders_with_shortest_price() {
        assert_eq!(holding("AAPL", 6, 150.0).to_string(), "AAPL:6:$150");
        assert_eq!(holding("BRK.B", 2, 410.25).to_string(), "BRK.B:2:$410.25");
    }

    #[test]
    fn cost_is_price_times_shares() {
        assert_eq!(holding("AAPL", 6, 150.0).cost(), 900.0);
        assert_eq!(holding("X", 0, 10.0).cost(), 0.0);
    }

    #[test]
    fn symbols_are_distinct_and_ordered() {
        let trade = Trade {
            id: 1,
            holdings: vec![
                holding("MSFT", 1, 250.0),
                holding("AAPL", 4, 150.0),
                holding("MSFT", 2, 250.0),
            ],
            unvested: 0.0,
            created_at: Utc::now(),
        };
        assert_eq!(trade.symbols(), ["MSFT", "AAPL"]);
    }

    #[test]
    fn join_rendered_uses_commas() {
        let holdings = [holding("AAPL", 4, 150.0), holding("MSFT", 1, 250.0)];
        assert_eq!(join_rendered(&holdings), "AAPL:4:$150,MSFT:1:$250");
        assert_eq!(join_rendered::<Holding>(&[]), "");
    }
}
