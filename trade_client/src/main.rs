//! Trade Client — command-line front end of the transaction server.
//!
//! Usage example (CLI):
//! ```bash
//! trade_client buy "AAPL:60%,MSFT:40%" 1000
//! trade_client --server 192.168.0.10:1234 check 1
//! ```
//!
//! A successful call prints the response payload as JSON. A business failure
//! (bad plan, unknown symbol, unknown trade) prints `KIND: message` and exits
//! with a failure status, as does any transport error.
#![warn(missing_docs)]
mod args;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use serde::Serialize;
use trade_common::message::{BuyRequest, CheckRequest};
use trade_common::rpc::RpcClient;
use trade_common::{Reply, Result};

use crate::args::{Args, Command};

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("Call to {} failed: {}", args.server, e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    info!("Connecting to transaction server at {}", args.server);
    let mut client = RpcClient::connect(&args.server)?;
    client.set_timeout(Some(Duration::from_secs(args.timeout_secs)))?;

    match &args.command {
        Command::Buy { allocation, budget } => {
            let reply = client.buy(&BuyRequest {
                stock_symbol_and_percentage: allocation.clone(),
                budget: *budget,
            })?;
            print_reply(reply)
        }
        Command::Check { trade_id } => {
            let reply = client.check(&CheckRequest {
                trade_id: *trade_id,
            })?;
            print_reply(reply)
        }
    }
}

fn print_reply<T: Serialize>(reply: Reply<T>) -> Result<ExitCode> {
    match reply {
        Ok(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("{}: {}", failure.kind, failure.message);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}
