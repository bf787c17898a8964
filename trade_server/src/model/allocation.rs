//! Allocation plans: parsing `SYMBOL:PERCENT%` lists into cash shares.
//!
//! A plan is a comma-separated list of tokens such as `AAPL:60%,msft:40%`.
//! Each token is a ticker made of ASCII letters, digits and dots, a colon, a
//! non-negative decimal number and a trailing `%`. Tickers are upper-cased.
//! Percentages must add up to 100 within the parser's epsilon.
//!
//! Format problems are reported before the percentage sum is checked, so a
//! plan with both a malformed token and a bad total reports `InvalidFormat`.

use crate::error::TransactionError;

/// One line of a plan with its resolved share of the budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Upper-case ticker.
    pub symbol: String,
    /// Share of the budget in percent, `0..=100`.
    pub percent: f64,
    /// `percent / 100 * budget`.
    pub cash: f64,
}

/// Validates allocation plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationParser {
    /// Allowed absolute deviation of the percentage sum from 100.
    epsilon: f64,
}

impl AllocationParser {
    /// Parser accepting sums within `epsilon` of 100. Negative or NaN values
    /// are treated as zero.
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: if epsilon.is_finite() && epsilon > 0.0 { epsilon } else { 0.0 },
        }
    }

    /// Parse `plan` and spread `budget` over its entries, preserving order.
    pub fn parse(&self, plan: &str, budget: f64) -> Result<Vec<Allocation>, TransactionError> {
        if !(budget.is_finite() && budget > 0.0) {
            return Err(TransactionError::InvalidFormat(format!(
                "budget must be a positive amount, got {}",
                budget
            )));
        }

        let entries = plan
            .split(',')
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()?;

        let total: f64 = entries.iter().map(|(_, percent)| percent).sum();
        if (total - 100.0).abs() > self.epsilon {
            return Err(TransactionError::PercentageMismatch(total));
        }

        Ok(entries
            .into_iter()
            .map(|(symbol, percent)| Allocation {
                symbol,
                percent,
                cash: budget * percent / 100.0,
            })
            .collect())
    }
}

fn parse_token(raw: &str) -> Result<(String, f64), TransactionError> {
    let token = raw.trim();
    let invalid = || TransactionError::InvalidFormat(format!("`{}` is not SYMBOL:PERCENT%", token));

    let (ticker, amount) = token.split_once(':').ok_or_else(invalid)?;
    if !is_ticker(ticker) {
        return Err(invalid());
    }
    let number = amount.strip_suffix('%').ok_or_else(invalid)?;
    if !is_unsigned_decimal(number) {
        return Err(invalid());
    }
    let percent: f64 = number.parse().map_err(|_| invalid())?;

    Ok((ticker.to_ascii_uppercase(), percent))
}

fn is_ticker(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
}

/// `123`, `12.5` and `12.` are accepted; `.5`, `-1` and `1e2` are not.
fn is_unsigned_decimal(s: &str) -> bool {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(plan: &str, budget: f64) -> Result<Vec<Allocation>, TransactionError> {
        AllocationParser::default().parse(plan, budget)
    }

    #[test]
    fn single_token_is_a_plan_of_one() {
        let plan = parse("aapl:100%", 1000.0).unwrap();
        assert_eq!(
            plan,
            vec![Allocation {
                symbol: "AAPL".into(),
                percent: 100.0,
                cash: 1000.0
            }]
        );
    }

    #[test]
    fn splits_budget_in_request_order() {
        let plan = parse("AAPL:60%, MSFT:40%", 1000.0).unwrap();
        let symbols: Vec<_> = plan.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT"]);
        assert_eq!(plan[0].cash, 600.0);
        assert_eq!(plan[1].cash, 400.0);
    }

    #[test]
    fn accepts_dotted_tickers_and_fractions() {
        let plan = parse("BRK.B:12.5%,GOOG:87.5%", 200.0).unwrap();
        assert_eq!(plan[0].symbol, "BRK.B");
        assert_eq!(plan[0].cash, 25.0);
        assert_eq!(plan[1].cash, 175.0);
    }

    #[test]
    fn rejects_malformed_tokens() {
        for plan in [
            "",
            "AAPL",
            "AAPL:100",
            "AAPL100%",
            ":100%",
            "AAPL:-100%",
            "AAPL:.5%,MSFT:99.5%",
            "AA PL:100%",
            "AAPL:1e2%",
            "AAPL:100%,",
            "AAPL:50%,,MSFT:50%",
        ] {
            let err = parse(plan, 100.0).unwrap_err();
            assert!(
                matches!(err, TransactionError::InvalidFormat(_)),
                "{plan:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn format_errors_win_over_sum_errors() {
        let err = parse("AAPL:10%,bad", 100.0).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidFormat(_)));
    }

    #[test]
    fn rejects_sums_other_than_100() {
        assert_eq!(
            parse("AAPL:90%", 1000.0).unwrap_err(),
            TransactionError::PercentageMismatch(90.0)
        );
        assert_eq!(
            parse("AAPL:60%,MSFT:60%", 1000.0).unwrap_err(),
            TransactionError::PercentageMismatch(120.0)
        );
    }

    #[test]
    fn epsilon_tolerates_rounded_thirds() {
        let strict = AllocationParser::default();
        let lenient = AllocationParser::new(0.5);
        let plan = "A:33.3%,B:33.3%,C:33.3%";
        assert!(matches!(
            strict.parse(plan, 100.0),
            Err(TransactionError::PercentageMismatch(_))
        ));
        assert_eq!(lenient.parse(plan, 100.0).unwrap().len(), 3);
    }

    #[test]
    fn rejects_non_positive_budget() {
        for budget in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                parse("AAPL:100%", budget),
                Err(TransactionError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn zero_percent_entries_are_kept() {
        let plan = parse("AAPL:100%,X:0%", 1000.0).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].cash, 0.0);
    }
}
