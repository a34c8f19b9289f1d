use std::error::Error;

/// Select a MIDI input port. First tries to find a port whose name contains
/// `port_name_substr` (when non-empty); otherwise the first available port
/// is used.
pub fn choose_input_port(
    midi_in: &midir::MidiInput,
    port_name_substr: &str,
) -> Result<usize, Box<dyn Error>> {
    let ports = midi_in.ports();
    if ports.is_empty() {
        return Err("no input port found".into());
    }

    // Try substring match first
    if !port_name_substr.is_empty() {
        for (i, p) in ports.iter().enumerate() {
            if let Ok(name) = midi_in.port_name(p) {
                if name.contains(port_name_substr) {
                    println!("Choosing input port matching '{}': {}", port_name_substr, name);
                    return Ok(i);
                }
            }
        }
        println!("No input port matches '{}', falling back to the first one", port_name_substr);
    }

    println!("Choosing the first available input port: {}", midi_in.port_name(&ports[0])?);
    Ok(0)
}
