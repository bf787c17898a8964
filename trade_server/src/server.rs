//! Accept loop.
//!
//! Wiring, in the same shape as the rest of the workspace's servers:
//!
//! - `ConnectionReceiver` owns the listening socket and runs on its own thread,
//!   forwarding every accepted `TcpStream` into a `crossbeam_channel`.
//! - `serve` `select!`s between new connections and the shutdown channel and
//!   spawns one thread per connection.
//!
//! A failed `accept` or a broken client connection is logged and only affects
//! that client.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender, select, unbounded};
use log::{error, info};
use trade_common::Result;

use crate::connection::handle_connection;
use crate::service::TransactionService;

/// Listening socket that hands accepted connections to a channel.
pub struct ConnectionReceiver {
    listener: TcpListener,
}

impl ConnectionReceiver {
    /// Bind to `bind_addr` (e.g., `0.0.0.0:1234`).
    pub fn bind(bind_addr: &str) -> Result<Self> {
        Ok(Self {
            listener: TcpListener::bind(bind_addr)?,
        })
    }

    /// Wrap an already bound listener.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { listener }
    }

    /// Address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Blocking loop forwarding connections to `tx`. Returns once nobody
    /// listens on the channel any more.
    pub fn accept_loop(self, tx: Sender<(TcpStream, SocketAddr)>) {
        for stream in self.listener.incoming() {
            match stream.and_then(|s| s.peer_addr().map(|addr| (s, addr))) {
                Ok(conn) => {
                    if tx.send(conn).is_err() {
                        break;
                    }
                }
                Err(e) => error!("TCP accept error: {}", e),
            }
        }
    }
}

/// Serve until a message arrives on `shutdown_rx` (or its sender is dropped).
pub fn serve(
    receiver: ConnectionReceiver,
    service: Arc<TransactionService>,
    shutdown_rx: Receiver<()>,
) -> Result<()> {
    info!("Transaction server listening on {}", receiver.local_addr()?);

    let (conn_tx, conn_rx) = unbounded::<(TcpStream, SocketAddr)>();
    thread::spawn(move || receiver.accept_loop(conn_tx));

    loop {
        select! {
            recv(conn_rx) -> msg => match msg {
                Ok((stream, peer)) => {
                    info!("New connection established: {}", peer);
                    let service = Arc::clone(&service);
                    thread::spawn(move || {
                        if let Err(e) = handle_connection(stream, peer, &service) {
                            error!("Connection {} failed: {}", peer, e);
                        }
                    });
                }
                Err(_) => {
                    error!("Accept loop stopped");
                    break;
                }
            },
            recv(shutdown_rx) -> _ => {
                info!("Shutting down, {} trade(s) recorded", service.ledger().len());
                break;
            }
        }
    }
    Ok(())
}
