//! Shared networking constants and helpers used by client and server.

/// TCP port the transaction server listens on.
pub const RPC_PORT: u16 = 1234;
/// Host the client dials when no server address is given.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Upper bound for a single request or response frame.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_joins_host_and_port() {
        assert_eq!(addr(DEFAULT_HOST, RPC_PORT), "127.0.0.1:1234");
    }
}
