//! Transaction RPC server.
//!
//! Listens on TCP (port 1234 by default) and serves two calls,
//! `Transaction.Buy` and `Transaction.Check`, over a line-framed JSON-RPC
//! envelope. Wiring:
//!
//! - `TransactionService` — built once here and shared by `Arc` with every
//!   connection thread; it owns the ledger of recorded trades.
//! - `QuoteFetcher` — the live HTTP provider (bounded by `--quote-timeout-ms`)
//!   or, with `--simulated-quotes`, an offline random walk.
//! - `server::serve` — accept loop; Ctrl+C sends on the shutdown channel.
#![warn(missing_docs)]
mod args;

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use crossbeam_channel::bounded;
use log::info;
use trade_server::fetcher::{HttpQuoteFetcher, QuoteFetcher, SimulatedQuoteFetcher};
use trade_server::server::{ConnectionReceiver, serve};
use trade_server::TransactionService;

use crate::args::Args;

fn main() -> Result<(), Box<dyn Error>> {
    init_logger();
    let args = Args::parse();

    let fetcher: Arc<dyn QuoteFetcher> = if args.simulated_quotes {
        Arc::new(SimulatedQuoteFetcher::new())
    } else {
        Arc::new(HttpQuoteFetcher::new(
            args.quote_url.clone(),
            args.quote_timeout(),
        )?)
    };
    info!("Using {} quotes", fetcher.name());

    let service = Arc::new(TransactionService::new(fetcher, args.service_config()));

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down server...");
        let _ = shutdown_tx.try_send(());
    })?;

    let receiver = ConnectionReceiver::bind(&args.bind_address())?;
    serve(receiver, service, shutdown_rx)?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
