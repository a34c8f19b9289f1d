use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// Connection status flags
pub static SENDER_CONNECTED: AtomicBool = AtomicBool::new(false);
pub static RECEIVER_RUNNING: AtomicBool = AtomicBool::new(false);
static BANNER_PRINTED: AtomicBool = AtomicBool::new(false);

// Print the quick help line in blue (works on Windows CMD via termcolor)
pub fn print_quick_help() {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_intense(true));
    let _ = writeln!(&mut stdout, "Type 'help' for commands, 'exit' to quit");
    let _ = stdout.reset();
}

pub fn print_connections_active() {
    // Ensure we only print one banner overall
    if BANNER_PRINTED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }
    let mut stdout = StandardStream::stdout(ColorChoice::Always);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_intense(true));
    let _ = writeln!(&mut stdout, "Connections active | Bridge started");
    let _ = stdout.reset();
    print_quick_help();
}

pub fn print_connections_broken() {
    if BANNER_PRINTED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }
    let mut stdout = StandardStream::stdout(ColorChoice::Always);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true));
    let _ = writeln!(&mut stdout, "Connections broken | Forwarding will log send failures");
    let _ = stdout.reset();
    print_quick_help();
}

/// Call once after startup to print a single final status line after other
/// setup logs.
pub fn print_final_status_after_startup() {
    // Small delay so the socket and MIDI setup can print their logs first
    std::thread::sleep(std::time::Duration::from_millis(300));

    let sender = SENDER_CONNECTED.load(Ordering::SeqCst);
    let receiver = RECEIVER_RUNNING.load(Ordering::SeqCst);

    if sender && receiver {
        print_connections_active();
    } else {
        print_connections_broken();
    }
}
