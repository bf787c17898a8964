//!
//! Common types and utilities shared by the transaction server and client.
//!
//! This crate aggregates:
//! - `error` — transport error type `RpcError` used across the workspace.
//! - `result` — handy `Result<T, RpcError>` alias.
//! - `message` — Buy/Check payloads and the tagged `Reply` they travel in.
//! - `rpc` — the line-framed JSON-RPC envelope, framing helpers and client.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod message;
pub mod net;
pub mod result;
pub mod rpc;

pub use error::RpcError;
pub use message::{ErrorKind, Failure, Reply};
pub use result::Result;
