//! Result type alias shared across the workspace.
//!
//! Defaults the error type to the common `RpcError`, so transport functions can
//! simply return `Result<T>`.
use crate::error::RpcError;

/// Workspace-wide `Result` alias with `RpcError` as the default error.
pub type Result<T, E = RpcError> = std::result::Result<T, E>;
