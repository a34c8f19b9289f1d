use std::io::{self, Read};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use crate::general::check;
use crate::general::frame::{MidiEvent, FRAME_LEN};

/// Resolve a local endpoint and bind the listening socket. A bind failure
/// additionally reports the raw OS error code.
pub fn bind_receive_socket(address: &str, port: &str) -> io::Result<TcpListener> {
    let endpoint = super::resolve_endpoint(address, port)?;
    println!("Creating socket");
    match TcpListener::bind(endpoint) {
        Ok(listener) => Ok(listener),
        Err(err) => {
            eprintln!("bind failed with error: {}", err.raw_os_error().unwrap_or(-1));
            Err(err)
        }
    }
}

/// Block until exactly one client connects.
pub fn accept_client(listener: &TcpListener) -> io::Result<TcpStream> {
    let (client, peer) = listener.accept()?;
    println!("Accepted connection from {}", peer);
    Ok(client)
}

/// Spawn the receive thread for the accepted client. Reads fixed-size
/// 4-byte frames, echoing each decoded event. A short read timeout lets
/// the loop poll `crate::EXIT_FLAG`; partial reads are accumulated so a
/// timeout mid-frame never desyncs the stream.
pub fn spawn_receiver(client: TcpStream) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        check::RECEIVER_RUNNING.store(true, Ordering::SeqCst);
        let mut client = client;
        client.set_read_timeout(Some(Duration::from_millis(200))).ok();

        let mut frame = [0u8; FRAME_LEN];
        let mut filled = 0;
        loop {
            if crate::EXIT_FLAG.load(Ordering::SeqCst) {
                break;
            }
            match client.read(&mut frame[filled..]) {
                Ok(0) => {
                    println!("[RECV] Peer disconnected");
                    break;
                }
                Ok(n) => {
                    filled += n;
                    if filled == FRAME_LEN {
                        filled = 0;
                        match MidiEvent::from_frame(&frame) {
                            Some(event) => println!(
                                "[RECV] {:02X} {:02X} {:02X}",
                                event.status, event.data1, event.data2
                            ),
                            None => eprintln!(
                                "[RECV] Frame without terminator: {:02X?}",
                                frame
                            ),
                        }
                    }
                }
                Err(ref err)
                    if err.kind() == io::ErrorKind::WouldBlock
                        || err.kind() == io::ErrorKind::TimedOut =>
                {
                    continue;
                }
                Err(err) => {
                    eprintln!("[RECV] Read error: {}", err);
                    break;
                }
            }
        }
        if crate::is_debug_enabled() {
            println!("[RECV] Receiver thread exiting");
        }
        check::RECEIVER_RUNNING.store(false, Ordering::SeqCst);
    })
}
