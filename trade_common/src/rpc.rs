//! Line-framed JSON-RPC envelope used between client and server.
//!
//! Each frame is a single JSON object terminated by `\n`. A call looks like
//! `{"method":"Transaction.Buy","params":["<payload json>"],"id":1}` and a
//! reply like `{"id":1,"result":"<payload json>","error":null}`. The payload is
//! carried as an opaque string so the envelope never needs to know the
//! message types.
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::RpcError;
use crate::message::{BuyRequest, BuyResponse, CheckRequest, CheckResponse, Reply};
use crate::net::MAX_FRAME_BYTES;
use crate::result::Result;

/// Methods served by the transaction server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Method {
    /// Convert an allocation plan and budget into a recorded trade.
    #[strum(serialize = "Transaction.Buy")]
    Buy,
    /// Value a recorded trade at current prices.
    #[strum(serialize = "Transaction.Check")]
    Check,
}

/// Call envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Fully qualified method name, see [`Method`].
    pub method: String,
    /// Exactly one element: the JSON-encoded payload.
    pub params: Vec<String>,
    /// Caller-chosen correlation id echoed in the reply.
    pub id: u64,
}

impl RpcRequest {
    /// Wrap `payload` into a call of `method`.
    pub fn new<T: Serialize>(method: Method, payload: &T, id: u64) -> Result<Self> {
        Ok(Self {
            method: method.to_string(),
            params: vec![serde_json::to_string(payload)?],
            id,
        })
    }

    /// Resolve the method name.
    pub fn method(&self) -> Result<Method> {
        self.method
            .parse()
            .map_err(|_| RpcError::UnknownMethod(self.method.clone()))
    }

    /// Decode the single payload parameter.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T> {
        match self.params.as_slice() {
            [raw] => Ok(serde_json::from_str(raw)?),
            other => Err(RpcError::Protocol(format!(
                "expected exactly one parameter, got {}",
                other.len()
            ))),
        }
    }
}

/// Reply envelope. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Id of the call this answers.
    pub id: u64,
    /// JSON-encoded payload on success.
    pub result: Option<String>,
    /// Transport or dispatch failure.
    pub error: Option<String>,
}

impl RpcResponse {
    /// Successful reply carrying `payload`.
    pub fn ok<T: Serialize>(id: u64, payload: &T) -> Result<Self> {
        Ok(Self {
            id,
            result: Some(serde_json::to_string(payload)?),
            error: None,
        })
    }

    /// Envelope-level failure.
    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(message.into()),
        }
    }

    /// Decode the payload, turning an envelope-level error into `RpcError::Remote`.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T> {
        match (self.result, self.error) {
            (_, Some(message)) => Err(RpcError::Remote(message)),
            (Some(raw), None) => Ok(serde_json::from_str(&raw)?),
            (None, None) => Err(RpcError::Protocol(
                "reply carries neither result nor error".to_string(),
            )),
        }
    }
}

/// Serialize `value` as one frame.
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    let mut line = serde_json::to_vec(value)?;
    if line.len() > MAX_FRAME_BYTES {
        return Err(RpcError::FrameTooLarge(MAX_FRAME_BYTES));
    }
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.flush()?;
    Ok(())
}

/// Read one frame. Returns `Ok(None)` on a clean end of stream.
pub fn read_frame<R: BufRead, T: DeserializeOwned>(reader: &mut R) -> Result<Option<T>> {
    let mut line = String::new();
    let size = reader
        .by_ref()
        .take(MAX_FRAME_BYTES as u64 + 1)
        .read_line(&mut line)?;
    if size == 0 {
        return Ok(None);
    }
    if size > MAX_FRAME_BYTES {
        return Err(RpcError::FrameTooLarge(MAX_FRAME_BYTES));
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(RpcError::Protocol("empty frame".to_string()));
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Blocking client for the transaction server.
pub struct RpcClient {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    next_id: u64,
}

impl RpcClient {
    /// Dial `address` (e.g. `127.0.0.1:1234`).
    pub fn connect(address: &str) -> Result<Self> {
        let stream = TcpStream::connect(address)?;
        Self::from_stream(stream)
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            reader,
            writer: stream,
            next_id: 0,
        })
    }

    /// Bound how long a single call may wait for its reply.
    pub fn set_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.writer.set_read_timeout(timeout)?;
        Ok(())
    }

    /// Issue a call and wait for the matching reply.
    pub fn call<Req, Resp>(&mut self, method: Method, payload: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let id = self.next_id;
        self.next_id += 1;

        let request = RpcRequest::new(method, payload, id)?;
        debug!("-> {} id={}", method, id);
        write_frame(&mut self.writer, &request)?;

        let response: RpcResponse = read_frame(&mut self.reader)?
            .ok_or_else(|| RpcError::Protocol("connection closed before reply".to_string()))?;
        if response.id != id {
            return Err(RpcError::Protocol(format!(
                "reply id {} does not match call id {}",
                response.id, id
            )));
        }
        debug!("<- {} id={}", method, id);
        response.into_payload()
    }

    /// `Transaction.Buy`.
    pub fn buy(&mut self, request: &BuyRequest) -> Result<Reply<BuyResponse>> {
        self.call(Method::Buy, request)
    }

    /// `Transaction.Check`.
    pub fn check(&mut self, request: &CheckRequest) -> Result<Reply<CheckResponse>> {
        self.call(Method::Check, request)
    }
}
