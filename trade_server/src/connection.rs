//! Per-connection call loop.
//!
//! A connection carries any number of calls, one frame each, answered in
//! order. Envelope problems (unknown method, undecodable payload) are answered
//! with an envelope-level error and the connection stays open. I/O failures and
//! unparsable frames end the connection; the caller logs them.

use std::io::BufReader;
use std::net::{SocketAddr, TcpStream};

use log::{debug, info, warn};
use trade_common::Result;
use trade_common::rpc::{Method, RpcRequest, RpcResponse, read_frame, write_frame};

use crate::service::TransactionService;

/// Serve calls from `stream` until the peer hangs up.
pub fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    service: &TransactionService,
) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    while let Some(request) = read_frame::<_, RpcRequest>(&mut reader)? {
        debug!("{} -> {} id={}", peer, request.method, request.id);
        let response = dispatch(service, &request);
        write_frame(&mut writer, &response)?;
    }
    info!("Connection {} closed", peer);
    Ok(())
}

/// Route one call to the service.
pub fn dispatch(service: &TransactionService, request: &RpcRequest) -> RpcResponse {
    match call(service, request) {
        Ok(response) => response,
        Err(e) => {
            warn!("Call id={} failed: {}", request.id, e);
            RpcResponse::error(request.id, e.to_string())
        }
    }
}

fn call(service: &TransactionService, request: &RpcRequest) -> Result<RpcResponse> {
    match request.method()? {
        Method::Buy => RpcResponse::ok(request.id, &service.buy(&request.payload()?)),
        Method::Check => RpcResponse::ok(request.id, &service.check(&request.payload()?)),
    }
}
