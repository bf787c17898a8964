//! Cash to whole shares.
//!
//! Each allocation buys `floor(cash / price)` shares at its quoted price; the
//! remainder stays as unvested cash. The invariant per line is
//! `shares * price <= cash < (shares + 1) * price`, and the reported unvested
//! amount is the sum of the per-line remainders.
//!
//! Share counts are bounded by [`MAX_SHARES`]; below 2^53 every integer is
//! exact in `f64`, so the `+ 1` of the invariant is too. A plan whose quotient
//! exceeds it is rejected as `InvalidFormat` before anything is recorded.

use crate::error::TransactionError;
use crate::model::{Allocation, Holding, QuoteBook};

/// Largest share count a single allocation may buy, `2^53 - 1`.
pub const MAX_SHARES: u64 = (1 << 53) - 1;

/// One allocation turned into shares.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    /// Shares bought and their cost basis.
    pub holding: Holding,
    /// Cash of this allocation that could not buy a whole share.
    pub leftover: f64,
}

/// Result of allocating a whole plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocated {
    /// One purchase per allocation, in plan order.
    pub purchases: Vec<Purchase>,
    /// Sum of all leftovers.
    pub unvested: f64,
}

impl Allocated {
    /// Split into the pieces the ledger records.
    pub fn into_parts(self) -> (Vec<Holding>, f64) {
        let holdings = self.purchases.into_iter().map(|p| p.holding).collect();
        (holdings, self.unvested)
    }
}

/// Buy whole shares for every allocation at the prices in `quotes`.
///
/// Fails with `QuoteUnavailable` naming every symbol without a usable quote,
/// or with `InvalidFormat` when a line would need more than [`MAX_SHARES`]
/// shares; nothing is bought in either case.
pub fn allocate(allocations: &[Allocation], quotes: &QuoteBook) -> Result<Allocated, TransactionError> {
    let missing = quotes.missing(allocations.iter().map(|a| a.symbol.as_str()));
    if !missing.is_empty() {
        return Err(TransactionError::QuoteUnavailable(missing.join(",")));
    }

    let mut purchases = Vec::with_capacity(allocations.len());
    let mut unvested = 0.0;
    for allocation in allocations {
        let price = quotes
            .price(&allocation.symbol)
            .ok_or_else(|| TransactionError::QuoteUnavailable(allocation.symbol.clone()))?;
        let purchase = purchase(allocation, price)?;
        unvested += purchase.leftover;
        purchases.push(purchase);
    }

    Ok(Allocated { purchases, unvested })
}

fn purchase(allocation: &Allocation, price: f64) -> Result<Purchase, TransactionError> {
    let cash = allocation.cash;
    let mut shares = (cash / price).floor().max(0.0);
    // The quotient may round across an integer boundary.
    if shares * price > cash {
        shares -= 1.0;
    } else if (shares + 1.0) * price <= cash {
        shares += 1.0;
    }
    if !shares.is_finite() || shares > MAX_SHARES as f64 {
        return Err(TransactionError::InvalidFormat(format!(
            "budget too large for quoted price of {} ({})",
            allocation.symbol, price
        )));
    }
    let leftover = (cash - shares * price).max(0.0);

    Ok(Purchase {
        holding: Holding {
            symbol: allocation.symbol.clone(),
            shares: shares as u64,
            cost_basis: price,
        },
        leftover,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AllocationParser, Quote};

    fn book(quotes: &[(&str, f64)]) -> QuoteBook {
        quotes.iter().map(|(s, p)| Quote::new(s, *p)).collect()
    }

    fn plan(text: &str, budget: f64) -> Vec<Allocation> {
        AllocationParser::default().parse(text, budget).unwrap()
    }

    #[test]
    fn single_symbol_keeps_remainder() {
        let allocated = allocate(&plan("AAPL:100%", 1000.0), &book(&[("AAPL", 150.0)])).unwrap();
        assert_eq!(allocated.purchases.len(), 1);
        assert_eq!(allocated.purchases[0].holding.shares, 6);
        assert_eq!(allocated.purchases[0].holding.cost_basis, 150.0);
        assert_eq!(allocated.unvested, 100.0);
    }

    #[test]
    fn two_symbols_sum_leftovers() {
        let allocated = allocate(
            &plan("AAPL:60%,MSFT:40%", 1000.0),
            &book(&[("AAPL", 150.0), ("MSFT", 250.0)]),
        )
        .unwrap();
        let (aapl, msft) = (&allocated.purchases[0], &allocated.purchases[1]);
        assert_eq!((aapl.holding.shares, aapl.leftover), (4, 0.0));
        assert_eq!((msft.holding.shares, msft.leftover), (1, 150.0));
        assert_eq!(allocated.unvested, 150.0);
    }

    #[test]
    fn degenerate_zero_percent_entry_changes_nothing() {
        let quotes = book(&[("AAPL", 150.0), ("X", 10.0)]);
        let single = allocate(&plan("AAPL:100%", 1000.0), &quotes).unwrap();
        let padded = allocate(&plan("AAPL:100%,X:0%", 1000.0), &quotes).unwrap();
        assert_eq!(single.purchases[0], padded.purchases[0]);
        assert_eq!(padded.purchases[1].holding.shares, 0);
        assert_eq!(single.unvested, padded.unvested);
    }

    #[test]
    fn missing_or_zero_price_is_unavailable() {
        let err = allocate(
            &plan("AAPL:50%,MSFT:25%,ZERO:25%", 1000.0),
            &book(&[("AAPL", 150.0), ("ZERO", 0.0)]),
        )
        .unwrap_err();
        assert_eq!(err, TransactionError::QuoteUnavailable("MSFT,ZERO".into()));
    }

    #[test]
    fn whole_share_bounds_hold_for_awkward_prices() {
        let quotes = book(&[("A", 0.1), ("B", 3.3), ("C", 7.77), ("D", 1234.5)]);
        for budget in [0.3, 1.0, 9.99, 100.0, 12345.67, 1e6] {
            let allocated = allocate(&plan("A:10%,B:20.5%,C:30%,D:39.5%", budget), &quotes).unwrap();
            let mut leftovers = 0.0;
            for (purchase, allocation) in allocated.purchases.iter().zip(plan("A:10%,B:20.5%,C:30%,D:39.5%", budget)) {
                let price = purchase.holding.cost_basis;
                let shares = purchase.holding.shares as f64;
                assert!(shares * price <= allocation.cash, "{purchase:?}");
                assert!(allocation.cash < (shares + 1.0) * price, "{purchase:?}");
                leftovers += purchase.leftover;
            }
            assert!((leftovers - allocated.unvested).abs() < 1e-9);
        }
    }

    #[test]
    fn oversized_quotient_is_rejected() {
        let err = allocate(&plan("AAPL:100%", 1e20), &book(&[("AAPL", 0.01)])).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidFormat(ref m) if m.contains("budget too large")), "{err:?}");
    }

    #[test]
    fn share_count_bound_is_exclusive_of_two_pow_53() {
        let budget = (1u64 << 52) as f64;
        let allocated = allocate(&plan("AAPL:100%", budget), &book(&[("AAPL", 1.0)])).unwrap();
        assert_eq!(allocated.purchases[0].holding.shares, 1 << 52);
        assert_eq!(allocated.unvested, 0.0);

        let err = allocate(&plan("AAPL:100%", budget), &book(&[("AAPL", 0.5)])).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidFormat(_)), "{err:?}");
    }
}
