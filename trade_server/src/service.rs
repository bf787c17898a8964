//! The `Transaction` service: Buy and Check.
//!
//! Buy runs parse → fetch quotes → allocate → record. Every fallible step
//! happens before the single `Ledger::put`, so a failed or abandoned Buy never
//! leaves a partial trade behind. Check runs look up → fetch quotes → value.
//!
//! Both calls return a tagged [`Reply`]; business failures are logged and
//! handed to the client as a [`trade_common::Failure`], never as a transport error.

use std::sync::Arc;

use log::{debug, info, warn};
use trade_common::Reply;
use trade_common::message::{BuyRequest, BuyResponse, CheckRequest, CheckResponse};

use crate::allocator::allocate;
use crate::error::TransactionError;
use crate::fetcher::QuoteFetcher;
use crate::ledger::Ledger;
use crate::model::trade::join_rendered;
use crate::model::{AllocationParser, QuoteBook};
use crate::valuation::value;

/// Knobs of the service, usually filled from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServiceConfig {
    /// Allowed deviation of the percentage sum from 100.
    pub percent_epsilon: f64,
    /// Answer a Check for an unknown trade with an empty, all-zero response
    /// instead of `TradeNotFound`.
    pub empty_on_unknown_trade: bool,
}

/// Transaction engine shared by all connections.
pub struct TransactionService {
    fetcher: Arc<dyn QuoteFetcher>,
    ledger: Ledger,
    parser: AllocationParser,
    empty_on_unknown_trade: bool,
}

impl TransactionService {
    /// Service with an empty ledger.
    pub fn new(fetcher: Arc<dyn QuoteFetcher>, config: ServiceConfig) -> Self {
        Self {
            fetcher,
            ledger: Ledger::new(),
            parser: AllocationParser::new(config.percent_epsilon),
            empty_on_unknown_trade: config.empty_on_unknown_trade,
        }
    }

    /// Read access to the trade store.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// `Transaction.Buy`.
    pub fn buy(&self, request: &BuyRequest) -> Reply<BuyResponse> {
        info!("BuyRequest: {:?}", request);
        let reply: Reply<BuyResponse> = self.try_buy(request).map_err(|e| {
            warn!("Buy rejected: {}", e);
            e.into()
        });
        info!("BuyResponse: {:?}", reply);
        reply
    }

    /// `Transaction.Check`.
    pub fn check(&self, request: &CheckRequest) -> Reply<CheckResponse> {
        info!("CheckRequest: {:?}", request);
        let reply: Reply<CheckResponse> = match self.try_check(request) {
            Err(TransactionError::TradeNotFound(id)) if self.empty_on_unknown_trade => {
                info!("Trade {} not found, answering with an empty position", id);
                Ok(CheckResponse::default())
            }
            other => other.map_err(|e| {
                warn!("Check rejected: {}", e);
                e.into()
            }),
        };
        info!("CheckResponse: {:?}", reply);
        reply
    }

    fn try_buy(&self, request: &BuyRequest) -> Result<BuyResponse, TransactionError> {
        let allocations = self
            .parser
            .parse(&request.stock_symbol_and_percentage, request.budget)?;

        let mut symbols: Vec<String> = Vec::with_capacity(allocations.len());
        for allocation in &allocations {
            debug!("{} gets {}% = {}", allocation.symbol, allocation.percent, allocation.cash);
            if !symbols.contains(&allocation.symbol) {
                symbols.push(allocation.symbol.clone());
            }
        }
        let quotes = self.quotes(&symbols)?;

        let (holdings, unvested) = allocate(&allocations, &quotes)?.into_parts();
        let invested: f64 = holdings.iter().map(|h| h.cost()).sum();
        debug!("Invested {} of {}, {} unvested", invested, request.budget, unvested);
        let stocks = join_rendered(&holdings);
        let trade_id = self.ledger.put(holdings, unvested);

        Ok(BuyResponse {
            trade_id,
            stocks,
            unvested_amount: unvested,
        })
    }

    fn try_check(&self, request: &CheckRequest) -> Result<CheckResponse, TransactionError> {
        let trade = self.ledger.get(request.trade_id)?;
        debug!("Valuing trade {} recorded at {}", trade.id, trade.created_at.to_rfc3339());
        let quotes = self.quotes(&trade.symbols())?;
        let valuation = value(&trade, &quotes)?;

        Ok(CheckResponse {
            stocks: join_rendered(&valuation.holdings),
            current_market_value: valuation.market_value,
            unvested_amount: valuation.unvested,
        })
    }

    fn quotes(&self, symbols: &[String]) -> Result<QuoteBook, TransactionError> {
        let book = self.fetcher.fetch(symbols).map_err(|e| {
            warn!("{} quote fetch failed: {}", self.fetcher.name(), e);
            TransactionError::from(e)
        })?;
        Ok(book)
    }
}
