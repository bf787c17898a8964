//! Command-line configuration of the transaction server.
//!
//! Every flag can also be set through the environment variable shown in `--help`.
use std::time::Duration;

use clap::Parser;
use trade_common::net::{RPC_PORT, addr};
use trade_server::ServiceConfig;
use trade_server::fetcher::http::DEFAULT_QUOTE_URL;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Interface to listen on.
    #[clap(long, env = "TRADE_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// TCP port for the RPC endpoint.
    #[clap(long, env = "TRADE_PORT", default_value_t = RPC_PORT)]
    pub port: u16,

    /// Quote provider endpoint.
    #[clap(long, env = "TRADE_QUOTE_URL", default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// Give up on a quote request after this many milliseconds.
    #[clap(long, env = "TRADE_QUOTE_TIMEOUT_MS", default_value_t = 5000)]
    pub quote_timeout_ms: u64,

    /// Accepted deviation of the percentage sum from 100.
    #[clap(long, env = "TRADE_PERCENT_EPSILON", default_value_t = 0.0)]
    pub percent_epsilon: f64,

    /// Use offline random-walk prices instead of the quote provider.
    #[clap(long, env = "TRADE_SIMULATED_QUOTES")]
    pub simulated_quotes: bool,

    /// Answer Check for an unknown trade with an empty response instead of an error.
    #[clap(long, env = "TRADE_EMPTY_ON_UNKNOWN_TRADE")]
    pub empty_on_unknown_trade: bool,
}

impl Args {
    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        addr(&self.bind, self.port)
    }

    /// Quote request timeout.
    pub fn quote_timeout(&self) -> Duration {
        Duration::from_millis(self.quote_timeout_ms)
    }

    /// Service settings derived from the flags.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            percent_epsilon: self.percent_epsilon,
            empty_on_unknown_trade: self.empty_on_unknown_trade,
        }
    }
}
