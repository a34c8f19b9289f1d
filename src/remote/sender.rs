use std::io;
use std::net::{Shutdown, TcpStream};

/// Establish the outbound connection the forwarder will write frames to.
/// Resolution, socket creation and connect failures all come back as one
/// `io::Error`; the driver logs it and keeps starting up.
pub fn connect_send_socket(address: &str, port: &str) -> io::Result<TcpStream> {
    let endpoint = super::resolve_endpoint(address, port)?;
    println!("Creating socket");
    println!("Connecting on socket");
    let stream = TcpStream::connect(endpoint)?;
    // Frames are 4 bytes each; don't let Nagle batch them.
    stream.set_nodelay(true).ok();
    Ok(stream)
}

/// Shut the outbound stream down on both directions. Called by the
/// forwarder thread once its channel disconnects.
pub fn close_connection(stream: &TcpStream) {
    let _ = stream.shutdown(Shutdown::Both);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn connects_to_live_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        let stream = connect_send_socket("127.0.0.1", &port).unwrap();
        let (_accepted, peer) = listener.accept().unwrap();
        assert_eq!(peer, stream.local_addr().unwrap());
    }

    #[test]
    fn dead_port_fails_without_panic() {
        // Bind then drop to get a port with nothing listening on it.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        drop(listener);
        assert!(connect_send_socket("127.0.0.1", &port).is_err());
    }

    #[test]
    fn unparsable_port_is_a_resolution_failure() {
        let err = connect_send_socket("127.0.0.1", "nope").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn close_connection_is_idempotent_enough() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        let stream = connect_send_socket("127.0.0.1", &port).unwrap();
        let _accepted = listener.accept().unwrap();
        close_connection(&stream);
        close_connection(&stream);
    }
}
