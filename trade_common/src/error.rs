//! Error types shared between client and server.
//!
//! `RpcError` covers everything that can go wrong below the business layer:
//! socket I/O, JSON encoding of envelopes and payloads, and violations of the
//! framing or call/reply protocol. Business failures (bad allocation syntax,
//! missing quotes, unknown trades) never use this type; they travel inside the
//! payload as a tagged [`crate::message::Failure`].
use std::io;

use thiserror::Error;

/// Unified transport error type shared by client and server.
#[derive(Error, Debug)]
pub enum RpcError {
    /// I/O error originating from the standard library or sockets.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A frame exceeded the maximum accepted size.
    #[error("Frame too large: more than {0} bytes")]
    FrameTooLarge(usize),

    /// The peer sent something that is valid JSON but not a valid call or reply.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The requested method is not served.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// The server answered the call with an envelope-level error.
    #[error("Remote error: {0}")]
    Remote(String),
}
