use std::env;
use std::error::Error;
use std::io::{stdin, stdout, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use midir::{Ignore, MidiInput};

mod config;
mod general;
mod io;
mod remote;

use config::{Config, EndpointConfig};
use general::check;
use general::frame::MidiEvent;

// Global exit signal, set by the stdin handler
pub static EXIT_FLAG: AtomicBool = AtomicBool::new(false);
pub static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

fn main() {
    match run() {
        Ok(_) => (),
        Err(err) => {
            println!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // 'midiTest' as the first argument bypasses all socket setup
    let bypass = env::args().nth(1).as_deref() == Some("midiTest");
    let config = get_config();
    if config.debug {
        DEBUG_ENABLED.store(true, Ordering::SeqCst);
    }

    let mut send_stream: Option<TcpStream> = None;
    let mut receiver_handle: Option<thread::JoinHandle<()>> = None;

    if bypass {
        println!("midiTest: skipping socket setup");
    } else {
        // Outbound connection first; the forwarder depends on it and a
        // failure here only degrades forwarding to per-event log lines.
        let (host, port) = prompt_endpoint("send", &config.send)?;
        println!("Connecting to socket on {}:{}...", host, port);
        match remote::sender::connect_send_socket(&host, &port) {
            Ok(stream) => {
                println!("Successful");
                check::SENDER_CONNECTED.store(true, Ordering::SeqCst);
                send_stream = Some(stream);
            }
            Err(err) => println!("Failed: {}", err),
        }

        let (host, port) = prompt_endpoint("receive", &config.receive)?;
        println!("Listening on {}:{}...", host, port);
        match remote::listener::bind_receive_socket(&host, &port) {
            Ok(listener) => match remote::listener::accept_client(&listener) {
                Ok(client) => {
                    println!("Successful");
                    receiver_handle = Some(remote::listener::spawn_receiver(client));
                }
                Err(err) => println!("Failed: {}", err),
            },
            Err(err) => println!("Failed: {}", err),
        }
    }

    let mut midi_in = MidiInput::new("midi socket bridge")?;
    midi_in.ignore(Ignore::None);
    let in_ports = midi_in.ports();
    println!("Number of midi devices: {}", in_ports.len());

    let port_idx = io::input::choose_input_port(&midi_in, &config.midi.port_match)?;
    let in_port = &in_ports[port_idx];
    let in_port_name = midi_in.port_name(in_port)?;

    // Channel from the OS-owned callback thread to the forwarder, which
    // owns the outbound socket. The callback only converts bytes and
    // hands them off.
    let (tx, rx) = channel::<MidiEvent>();

    let _conn_in = midi_in.connect(
        in_port,
        "bridge-read-input",
        move |_stamp, message, _| {
            if let Some(event) = MidiEvent::from_raw(message) {
                let _ = tx.send(event);
            }
        },
        (),
    )?;
    println!("Midi input was started on '{}'", in_port_name);

    let forward_handle = general::forwarder::spawn_forwarder(send_stream, rx);
    let stdin_handle = general::stdin_handler::spawn_stdin_handler();
    if bypass {
        check::print_quick_help();
    } else {
        thread::spawn(check::print_final_status_after_startup);
    }

    // Wait for exit signal from stdin thread
    while !EXIT_FLAG.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    println!("Closing connections and exiting...");
    // Dropping the input connection stops the callback, which disconnects
    // the channel and ends the forwarder; the forwarder closes the socket.
    drop(_conn_in);
    let _ = forward_handle.join();
    if let Some(handle) = receiver_handle {
        let _ = handle.join();
    }
    let _ = stdin_handle.join();

    Ok(())
}

/// Prompt for an address/port pair. Empty input takes the configured
/// default shown in the prompt.
fn prompt_endpoint(
    label: &str,
    default: &EndpointConfig,
) -> Result<(String, String), Box<dyn Error>> {
    let mut input = String::new();

    print!("Enter IP address (for {}) [{}]: ", label, default.host);
    stdout().flush()?;
    stdin().read_line(&mut input)?;
    let host = match input.trim() {
        "" => default.host.clone(),
        other => other.to_string(),
    };

    input.clear();
    print!("Enter port (for {}) [{}]: ", label, default.port);
    stdout().flush()?;
    stdin().read_line(&mut input)?;
    let port = match input.trim() {
        "" => default.port.to_string(),
        other => other.to_string(),
    };

    Ok((host, port))
}
