//! Command-line arguments for the trade client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Transaction server address as `host:port`.
    #[clap(long, env = "TRADE_SERVER", default_value_t = trade_common::net::addr(
        trade_common::net::DEFAULT_HOST,
        trade_common::net::RPC_PORT
    ))]
    pub server: String,

    /// Seconds to wait for the server's reply.
    #[clap(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Calls the client can make.
#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Spend a budget on a percentage plan, e.g. `buy "AAPL:60%,MSFT:40%" 1000`.
    #[command(aliases = ["Buy", "BUY"])]
    Buy {
        /// Comma-separated `SYMBOL:PERCENT%` tokens.
        allocation: String,
        /// Cash to invest.
        budget: f64,
    },
    /// Show the current value of a recorded trade.
    #[command(aliases = ["Check", "CHECK"])]
    Check {
        /// Identifier returned by `buy`.
        trade_id: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buy() {
        let args = Args::try_parse_from(["trade_client", "buy", "AAPL:100%", "1000.5"]).unwrap();
        assert_eq!(args.server, "127.0.0.1:1234");
        assert_eq!(
            args.command,
            Command::Buy {
                allocation: "AAPL:100%".into(),
                budget: 1000.5
            }
        );
    }

    #[test]
    fn parses_check_with_server() {
        let args =
            Args::try_parse_from(["trade_client", "--server", "10.0.0.2:4000", "check", "7"]).unwrap();
        assert_eq!(args.server, "10.0.0.2:4000");
        assert_eq!(args.command, Command::Check { trade_id: 7 });
    }

    #[test]
    fn commands_accept_capitalized_names() {
        let args = Args::try_parse_from(["trade_client", "BUY", "AAPL:100%", "10"]).unwrap();
        assert!(matches!(args.command, Command::Buy { .. }));
        let args = Args::try_parse_from(["trade_client", "Check", "3"]).unwrap();
        assert_eq!(args.command, Command::Check { trade_id: 3 });
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::try_parse_from(["trade_client", "sell", "AAPL:100%"]).is_err());
        assert!(Args::try_parse_from(["trade_client", "buy", "AAPL:100%", "lots"]).is_err());
        assert!(Args::try_parse_from(["trade_client", "check", "-1"]).is_err());
    }
}
