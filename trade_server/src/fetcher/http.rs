//! Live quotes over HTTP/JSON.
//!
//! One GET per fetch. The provider answers with
//! `{"query":{"count":n,"results":{"quote":...}}}` where `quote` is a list when
//! several symbols were requested, a single object when exactly one was, and
//! `null` when nothing matched. All three shapes are normalized here into a
//! [`QuoteBook`]; prices come as strings and empty or unparsable ones are
//! dropped.
//!
//! The blocking client carries a total request timeout, so a stalled provider
//! surfaces as [`FetchError::Timeout`] instead of pinning a connection thread.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::fetcher::QuoteFetcher;
use crate::model::{Quote, QuoteBook};

/// Default provider endpoint.
pub const DEFAULT_QUOTE_URL: &str = "https://query.yahooapis.com/v1/public/yql";
/// Default bound on a provider round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the YQL-style quote endpoint.
pub struct HttpQuoteFetcher {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpQuoteFetcher {
    /// Client for `endpoint` whose requests give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Provider query selecting the last trade price of `symbols`.
pub fn build_query(symbols: &[String]) -> String {
    let list = symbols
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "select LastTradePriceOnly,Symbol from yahoo.finance.quote where symbol in ({})",
        list
    )
}

impl QuoteFetcher for HttpQuoteFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch(&self, symbols: &[String]) -> Result<QuoteBook, FetchError> {
        if symbols.is_empty() {
            return Ok(QuoteBook::default());
        }
        let query = build_query(symbols);
        debug!("GET {} q={}", self.endpoint, query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("env", "store://datatables.org/alltableswithkeys"),
            ])
            .send()
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Quote provider answered {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: ProviderEnvelope = response.json().map_err(|e| self.map_error(e))?;
        Ok(envelope.into_book())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderEnvelope {
    query: ProviderQuery,
}

#[derive(Debug, Deserialize)]
struct ProviderQuery {
    #[serde(default)]
    count: usize,
    #[serde(default)]
    results: Option<ProviderResults>,
}

#[derive(Debug, Deserialize)]
struct ProviderResults {
    #[serde(default)]
    quote: Option<OneOrMany<ProviderQuote>>,
}

/// List for multi-symbol requests, bare object for a single symbol.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderQuote {
    #[serde(alias = "Symbol")]
    symbol: String,
    #[serde(rename = "LastTradePriceOnly", default)]
    last_trade_price: Option<String>,
}

impl ProviderEnvelope {
    fn into_book(self) -> QuoteBook {
        let quotes = self
            .query
            .results
            .and_then(|results| results.quote)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();
        debug!("Provider reported {} quote(s), {} entries", self.query.count, quotes.len());

        let mut book = QuoteBook::default();
        for raw in quotes {
            let price = raw
                .last_trade_price
                .as_deref()
                .and_then(|p| p.trim().parse::<f64>().ok());
            let kept = price.is_some_and(|p| book.insert(Quote::new(&raw.symbol, p)));
            if !kept {
                debug!("No usable price for {}", raw.symbol);
            }
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn decode(body: serde_json::Value) -> QuoteBook {
        serde_json::from_value::<ProviderEnvelope>(body)
            .unwrap()
            .into_book()
    }

    #[test]
    fn query_lists_quoted_symbols() {
        assert_eq!(
            build_query(&symbols(&["AAPL", "MSFT"])),
            r#"select LastTradePriceOnly,Symbol from yahoo.finance.quote where symbol in ("AAPL","MSFT")"#
        );
    }

    #[test]
    fn list_shape_is_normalized() {
        let book = decode(json!({
            "query": {"count": 2, "results": {"quote": [
                {"symbol": "AAPL", "LastTradePriceOnly": "150.00"},
                {"symbol": "MSFT", "LastTradePriceOnly": "250.5"}
            ]}}
        }));
        assert_eq!(book.price("AAPL"), Some(150.0));
        assert_eq!(book.price("MSFT"), Some(250.5));
    }

    #[test]
    fn single_object_shape_is_normalized() {
        let book = decode(json!({
            "query": {"count": 1, "results": {"quote":
                {"symbol": "AAPL", "LastTradePriceOnly": "150"}
            }}
        }));
        assert_eq!(book.len(), 1);
        assert_eq!(book.price("AAPL"), Some(150.0));
    }

    #[test]
    fn empty_null_and_zero_prices_are_dropped() {
        let book = decode(json!({
            "query": {"count": 4, "results": {"quote": [
                {"symbol": "AAPL", "LastTradePriceOnly": ""},
                {"symbol": "MSFT", "LastTradePriceOnly": null},
                {"symbol": "ZERO", "LastTradePriceOnly": "0.00"},
                {"symbol": "TSLA", "LastTradePriceOnly": "n/a"}
            ]}}
        }));
        assert!(book.is_empty());

        let book = decode(json!({"query": {"count": 0, "results": null}}));
        assert!(book.is_empty());
    }

    #[test]
    fn fetches_from_provider() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/public/yql")
                .query_param("format", "json")
                .query_param_exists("q");
            then.status(200).json_body(json!({
                "query": {"count": 2, "results": {"quote": [
                    {"symbol": "AAPL", "LastTradePriceOnly": "150"},
                    {"symbol": "MSFT", "LastTradePriceOnly": "250"}
                ]}}
            }));
        });

        let fetcher =
            HttpQuoteFetcher::new(server.url("/v1/public/yql"), Duration::from_secs(2)).unwrap();
        let book = fetcher.fetch(&symbols(&["AAPL", "MSFT"])).unwrap();
        mock.assert();
        assert_eq!(book.price("AAPL"), Some(150.0));
        assert_eq!(book.price("MSFT"), Some(250.0));
    }

    #[test]
    fn http_error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/yql");
            then.status(503);
        });
        let fetcher = HttpQuoteFetcher::new(server.url("/yql"), Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch(&symbols(&["AAPL"])).unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[test]
    fn slow_provider_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/yql");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({"query": {"count": 0, "results": null}}));
        });
        let fetcher =
            HttpQuoteFetcher::new(server.url("/yql"), Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch(&symbols(&["AAPL"])).unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)), "{err:?}");
    }

    #[test]
    fn no_symbols_needs_no_request() {
        let fetcher = HttpQuoteFetcher::new("http://127.0.0.1:9/never", DEFAULT_TIMEOUT).unwrap();
        assert!(fetcher.fetch(&[]).unwrap().is_empty());
    }
}
