use std::io::stdin;
use std::sync::atomic::Ordering;
use std::thread;

use crate::general::check;

/// Spawn a thread that reads lines from stdin. Empty line, EOF or 'exit'
/// sets the global `EXIT_FLAG`; everything else is a small command set for
/// inspecting the bridge while it runs.
pub fn spawn_stdin_handler() -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    // EOF counts as operator termination
                    crate::EXIT_FLAG.store(true, Ordering::SeqCst);
                    break;
                }
                Ok(_) => {}
            }
            let cmd = line.trim();
            if cmd.is_empty() {
                crate::EXIT_FLAG.store(true, Ordering::SeqCst);
                break;
            }
            if cmd.eq_ignore_ascii_case("exit")
                || cmd.eq_ignore_ascii_case("quit")
                || cmd.eq_ignore_ascii_case("q")
            {
                crate::EXIT_FLAG.store(true, Ordering::SeqCst);
                break;
            }

            if cmd.eq_ignore_ascii_case("debug on") || cmd.eq_ignore_ascii_case("debug enable") {
                crate::DEBUG_ENABLED.store(true, Ordering::SeqCst);
                println!("Debug output enabled");
                continue;
            }
            if cmd.eq_ignore_ascii_case("debug off") || cmd.eq_ignore_ascii_case("debug disable") {
                crate::DEBUG_ENABLED.store(false, Ordering::SeqCst);
                println!("Debug output disabled");
                continue;
            }
            if cmd.eq_ignore_ascii_case("status") {
                let sender = check::SENDER_CONNECTED.load(Ordering::SeqCst);
                let receiver = check::RECEIVER_RUNNING.load(Ordering::SeqCst);
                println!(
                    "Send socket: {} | Receive client: {}",
                    if sender { "connected" } else { "not connected" },
                    if receiver { "accepted" } else { "none" }
                );
                continue;
            }
            if cmd.eq_ignore_ascii_case("help") || cmd.eq_ignore_ascii_case("h") {
                println!("Commands:");
                println!("  status           - Show socket status");
                println!("  debug on/off     - Toggle debug output");
                println!("  help/h           - Show this help");
                println!("  exit/quit/q      - Exit program (empty line also exits)");
                continue;
            }

            println!("Unrecognized command: '{}'. Type 'help' for available commands.", cmd);
        }
    })
}
