use std::io::Write;
use std::net::TcpStream;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Receiver;
use std::thread;

use crate::general::check;
use crate::general::frame::MidiEvent;
use crate::remote::sender;

/// Spawn the forwarding thread. It owns the outbound stream (`None` when
/// socket setup was bypassed or failed) and drains `rx`, which the MIDI
/// input callback feeds. One blocking write per event, no buffering, no
/// reconnect: a failed send is logged and the next event is processed as
/// usual. The thread exits when the channel disconnects and closes the
/// stream on its way out.
pub fn spawn_forwarder(
    stream: Option<TcpStream>,
    rx: Receiver<MidiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = stream;
        for event in rx {
            let frame = event.to_frame();
            let outcome = match stream.as_mut() {
                Some(s) => s.write_all(&frame).map_err(|err| err.to_string()),
                None => Err("no send socket".to_string()),
            };
            match outcome {
                Ok(()) => println!(
                    "{:02X} {:02X} {:02X}\tSend successful",
                    frame[0], frame[1], frame[2]
                ),
                Err(err) => {
                    // Keep the 'status' command honest once the peer is gone
                    check::SENDER_CONNECTED.store(false, Ordering::SeqCst);
                    eprintln!(
                        "{:02X} {:02X} {:02X}\tSend failed: {}",
                        frame[0], frame[1], frame[2], err
                    );
                }
            }
        }
        // Receiver closed -> capture has stopped, release the socket
        if let Some(s) = stream {
            sender::close_connection(&s);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::sync::mpsc::channel;

    #[test]
    fn events_arrive_as_ordered_back_to_back_frames() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let stream = TcpStream::connect(addr).unwrap();
        let (mut accepted, _) = listener.accept().unwrap();

        let (tx, rx) = channel();
        let handle = spawn_forwarder(Some(stream), rx);

        tx.send(MidiEvent { status: 0x90, data1: 0x3C, data2: 0x40 }).unwrap();
        tx.send(MidiEvent { status: 0x80, data1: 0x3C, data2: 0x00 }).unwrap();
        drop(tx);
        handle.join().unwrap();

        let mut received = Vec::new();
        accepted.read_to_end(&mut received).unwrap();
        assert_eq!(
            received,
            vec![0x90, 0x3C, 0x40, 0x0A, 0x80, 0x3C, 0x00, 0x0A]
        );
    }

    #[test]
    fn missing_socket_logs_failures_but_never_panics() {
        let (tx, rx) = channel();
        let handle = spawn_forwarder(None, rx);
        for _ in 0..8 {
            tx.send(MidiEvent { status: 0x90, data1: 0x3C, data2: 0x40 }).unwrap();
        }
        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn broken_pipe_does_not_stop_the_loop() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let stream = TcpStream::connect(addr).unwrap();
        let (accepted, _) = listener.accept().unwrap();
        drop(accepted); // peer goes away immediately

        let (tx, rx) = channel();
        let handle = spawn_forwarder(Some(stream), rx);
        // The first writes may still land in the socket buffer, later ones
        // fail; either way the thread must drain the channel and finish.
        for _ in 0..32 {
            tx.send(MidiEvent { status: 0xB0, data1: 0x07, data2: 0x7F }).unwrap();
        }
        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn send_failure_clears_connected_flag() {
        use std::net::Shutdown;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let stream = TcpStream::connect(addr).unwrap();
        let _accepted = listener.accept().unwrap();

        check::SENDER_CONNECTED.store(true, Ordering::SeqCst);
        // Closing our write side makes every subsequent send fail
        stream.shutdown(Shutdown::Write).unwrap();

        let (tx, rx) = channel();
        let handle = spawn_forwarder(Some(stream), rx);
        tx.send(MidiEvent { status: 0x90, data1: 0x3C, data2: 0x40 }).unwrap();
        drop(tx);
        handle.join().unwrap();

        assert!(!check::SENDER_CONNECTED.load(Ordering::SeqCst));
    }
}
