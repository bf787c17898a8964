//! In-memory, append-only store of trades.
//!
//! The ledger owns every `Trade`. Identifier assignment and insertion happen
//! under one write lock, so identifiers are unique and strictly increasing in
//! assignment order, and a `get` issued after `put` returned always sees the
//! trade. Readers share the `RwLock` and receive `Arc<Trade>` handles.
//!
//! A panic while holding the lock cannot leave a half-written entry (the map
//! insert is the last step), so a poisoned lock is recovered rather than
//! propagated.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use log::debug;

use crate::error::TransactionError;
use crate::model::{Holding, Trade, TradeId};

struct LedgerState {
    last_id: TradeId,
    trades: HashMap<TradeId, Arc<Trade>>,
}

/// Concurrency-safe trade store.
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Empty ledger; the first trade gets id 1.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState {
                last_id: 0,
                trades: HashMap::new(),
            }),
        }
    }

    /// Record a trade and return its identifier.
    pub fn put(&self, holdings: Vec<Holding>, unvested: f64) -> TradeId {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = state.last_id + 1;
        let trade = Trade {
            id,
            holdings,
            unvested,
            created_at: Utc::now(),
        };
        debug!("Recorded trade {} at {}", id, trade.created_at.to_rfc3339());
        state.trades.insert(id, Arc::new(trade));
        state.last_id = id;
        id
    }

    /// Look up a trade.
    pub fn get(&self, id: TradeId) -> Result<Arc<Trade>, TransactionError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .trades
            .get(&id)
            .cloned()
            .ok_or(TransactionError::TradeNotFound(id))
    }

    /// Number of recorded trades.
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .trades
            .len()
    }

    /// `true` before the first trade is recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
