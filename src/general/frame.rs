/// Wire encoding shared by the forwarder and the receiver.
///
/// One MIDI event becomes exactly 4 bytes: status, data1, data2 and a
/// trailing `\n`. The terminator is an ordinary payload byte, so framing
/// is strictly by fixed size, never by scanning for it.
pub const FRAME_LEN: usize = 4;
pub const FRAME_TERMINATOR: u8 = b'\n';

/// A single MIDI message as a status/data byte triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiEvent {
    /// Build an event from the raw bytes a MIDI input callback delivers.
    /// Messages shorter than 3 bytes pad the missing data bytes with 0;
    /// empty messages yield no event.
    pub fn from_raw(raw: &[u8]) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(MidiEvent {
            status: raw[0],
            data1: raw.get(1).copied().unwrap_or(0),
            data2: raw.get(2).copied().unwrap_or(0),
        })
    }

    pub fn to_frame(&self) -> [u8; FRAME_LEN] {
        [self.status, self.data1, self.data2, FRAME_TERMINATOR]
    }

    /// Decode a received frame. Returns `None` when the terminator byte is
    /// missing, which on a fixed-size stream means the peer desynced.
    pub fn from_frame(frame: &[u8; FRAME_LEN]) -> Option<Self> {
        if frame[3] != FRAME_TERMINATOR {
            return None;
        }
        Some(MidiEvent {
            status: frame[0],
            data1: frame[1],
            data2: frame[2],
        })
    }
}
