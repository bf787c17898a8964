//! Payloads exchanged by the `Transaction.Buy` and `Transaction.Check` calls.
//!
//! Field names are PascalCase on the wire. Every response payload is a
//! [`Reply`]: serde encodes it as `{"Ok": ...}` or `{"Err": {"Kind": ..., "Message": ...}}`,
//! so a business failure never has to be smuggled through a success field.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Request to split `budget` across the allocation plan in `stock_symbol_and_percentage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuyRequest {
    /// Comma-separated `SYMBOL:PERCENT%` tokens, e.g. `AAPL:60%,MSFT:40%`.
    pub stock_symbol_and_percentage: String,
    /// Cash to invest.
    pub budget: f64,
}

/// Successful outcome of a Buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuyResponse {
    /// Identifier under which the trade was recorded.
    #[serde(rename = "TradeID")]
    pub trade_id: u64,
    /// Comma-joined `SYMBOL:SHARES:$COSTBASIS` entries.
    pub stocks: String,
    /// Cash left over after integer-share rounding.
    pub unvested_amount: f64,
}

/// Request to value a previously recorded trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Identifier returned by an earlier Buy.
    #[serde(rename = "TradeID")]
    pub trade_id: u64,
}

/// Successful outcome of a Check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckResponse {
    /// Comma-joined `SYMBOL:SHARES:{+|-}$PRICE` entries. `PRICE` is the
    /// current price of one share, not the value of the holding; the sign
    /// compares it with the purchase price and is empty when unchanged.
    pub stocks: String,
    /// Sum of current price times shares over all holdings.
    pub current_market_value: f64,
    /// Unvested cash stored with the trade, not revalued.
    pub unvested_amount: f64,
}

/// Category of a business failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum ErrorKind {
    /// A token of the allocation plan, or the budget, is malformed.
    InvalidFormat,
    /// Allocation percentages do not add up to 100.
    PercentageMismatch,
    /// A symbol is unknown to the quote provider or has no usable price.
    QuoteUnavailable,
    /// No trade exists under the requested identifier.
    TradeNotFound,
}

/// A business failure as sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Failure {
    /// Machine-readable category.
    pub kind: ErrorKind,
    /// Human-readable explanation.
    pub message: String,
}

impl Failure {
    /// Build a failure of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Tagged response payload: success XOR failure.
pub type Reply<T> = std::result::Result<T, Failure>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn buy_request_uses_pascal_case_fields() {
        let req: BuyRequest = serde_json::from_value(json!({
            "StockSymbolAndPercentage": "AAPL:100%",
            "Budget": 1000.0
        }))
        .unwrap();
        assert_eq!(req.stock_symbol_and_percentage, "AAPL:100%");
        assert_eq!(req.budget, 1000.0);
    }

    #[test]
    fn trade_id_keeps_legacy_capitalisation() {
        let value = serde_json::to_value(CheckRequest { trade_id: 7 }).unwrap();
        assert_eq!(value, json!({ "TradeID": 7 }));

        let resp = BuyResponse {
            trade_id: 1,
            stocks: "AAPL:6:$150".into(),
            unvested_amount: 100.0,
        };
        let value = serde_json::to_value(resp).unwrap();
        assert_eq!(value["TradeID"], json!(1));
        assert_eq!(value["UnvestedAmount"], json!(100.0));
    }

    #[test]
    fn reply_is_externally_tagged() {
        let ok: Reply<CheckResponse> = Ok(CheckResponse::default());
        let value = serde_json::to_value(&ok).unwrap();
        assert!(value.get("Ok").is_some());

        let err: Reply<CheckResponse> =
            Err(Failure::new(ErrorKind::TradeNotFound, "trade 9 not found"));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["Err"]["Kind"], json!("TradeNotFound"));
        assert_eq!(value["Err"]["Message"], json!("trade 9 not found"));
    }

    #[test]
    fn error_kind_round_trips_through_strum() {
        let kind: ErrorKind = "PercentageMismatch".parse().unwrap();
        assert_eq!(kind, ErrorKind::PercentageMismatch);
        assert_eq!(ErrorKind::QuoteUnavailable.to_string(), "QuoteUnavailable");
    }
}
