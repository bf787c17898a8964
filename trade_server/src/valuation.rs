//! Current value and profit/loss of a recorded trade.

use std::fmt;

use strum_macros::Display;

use crate::error::TransactionError;
use crate::model::{QuoteBook, Trade, TradeId};

/// Direction of a holding's price against its cost basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Indicator {
    /// Current price below cost basis.
    #[strum(serialize = "-")]
    BelowCost,
    /// Current price above cost basis.
    #[strum(serialize = "+")]
    AboveCost,
    /// Price equals cost basis.
    #[strum(serialize = "")]
    Unchanged,
}

impl Indicator {
    /// Compare `price` with `cost_basis`.
    pub fn from_prices(price: f64, cost_basis: f64) -> Self {
        if price < cost_basis {
            Indicator::BelowCost
        } else if price > cost_basis {
            Indicator::AboveCost
        } else {
            Indicator::Unchanged
        }
    }
}

/// One holding at current prices.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingValuation {
    pub symbol: String,
    pub shares: u64,
    pub cost_basis: f64,
    /// Fresh price per share.
    pub price: f64,
    /// `price * shares`.
    pub value: f64,
    pub indicator: Indicator,
}

/// Renders as `SYMBOL:SHARES:{+|-}$PRICE`; an unchanged price has no sign.
impl fmt::Display for HoldingValuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}${}",
            self.symbol, self.shares, self.indicator, self.price
        )
    }
}

/// A whole trade at current prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub trade_id: TradeId,
    pub holdings: Vec<HoldingValuation>,
    /// Sum of holding values.
    pub market_value: f64,
    /// Unvested cash as stored with the trade.
    pub unvested: f64,
}

/// Value `trade` against `quotes`.
pub fn value(trade: &Trade, quotes: &QuoteBook) -> Result<Valuation, TransactionError> {
    let missing = quotes.missing(trade.holdings.iter().map(|h| h.symbol.as_str()));
    if !missing.is_empty() {
        return Err(TransactionError::QuoteUnavailable(missing.join(",")));
    }

    let mut holdings = Vec::with_capacity(trade.holdings.len());
    for holding in &trade.holdings {
        let price = quotes
            .price(&holding.symbol)
            .ok_or_else(|| TransactionError::QuoteUnavailable(holding.symbol.clone()))?;
        holdings.push(HoldingValuation {
            symbol: holding.symbol.clone(),
            shares: holding.shares,
            cost_basis: holding.cost_basis,
            price,
            value: price * holding.shares as f64,
            indicator: Indicator::from_prices(price, holding.cost_basis),
        });
    }
    let market_value = holdings.iter().map(|h| h.value).sum();

    Ok(Valuation {
        trade_id: trade.id,
        holdings,
        market_value,
        unvested: trade.unvested,
    })
}
