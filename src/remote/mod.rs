pub mod listener;
pub mod sender;

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

/// Resolve a textual host/port pair to the first candidate endpoint.
/// Port parse failures and empty resolutions both surface as errors so the
/// caller sees a single failure signal per setup step.
pub fn resolve_endpoint(address: &str, port: &str) -> io::Result<SocketAddr> {
    let port: u16 = port.trim().parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid port '{}'", port.trim()),
        )
    })?;
    (address.trim(), port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("no address found for '{}'", address.trim()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_numeric_host_and_port() {
        let addr = resolve_endpoint("127.0.0.1", "9000").unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn trims_prompt_whitespace() {
        let addr = resolve_endpoint(" 127.0.0.1 ", " 9000\n").unwrap();
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn rejects_unparsable_port() {
        let err = resolve_endpoint("127.0.0.1", "port_nine_thousand").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
