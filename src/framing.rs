//! Serial-line framing for J1708 wire messages
//!
//! Hardware adapters carry one complete J1708 message per frame as printable
//! hex between a `$` start marker and a `*` end marker. Bytes outside a frame
//! are line noise and are discarded; a start marker inside a frame resyncs,
//! dropping the partial frame that preceded it.

use tracing::{trace, warn};

use crate::protocol::{Error, MAX_MESSAGE_SIZE, Result};

/// Start-of-message marker
pub const FRAME_START: u8 = b'$';

/// End-of-message marker
pub const FRAME_END: u8 = b'*';

// No valid frame can carry more hex digits than a maximum-size message.
const MAX_FRAME_HEX: usize = MAX_MESSAGE_SIZE * 2;

/// Wrap raw wire bytes in a hex frame for transmission
#[must_use]
pub fn frame(message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() * 2 + 2);
    out.push(FRAME_START);
    out.extend_from_slice(encode_hex(message).as_bytes());
    out.push(FRAME_END);
    out
}

/// Raw bytes to a lowercase hex string
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Printable hex to raw bytes
///
/// Accepts both digit cases; rejects odd-length input and anything that is
/// not a hex digit.
pub(crate) fn decode_hex(text: &[u8]) -> Result<Vec<u8>> {
    if text.len() % 2 != 0 {
        return Err(Error::OddHexLength { len: text.len() });
    }

    let nibble = |byte: u8, offset: usize| -> Result<u8> {
        match byte {
            b'0'..=b'9' => Ok(byte - b'0'),
            b'a'..=b'f' => Ok(byte - b'a' + 10),
            b'A'..=b'F' => Ok(byte - b'A' + 10),
            _ => Err(Error::InvalidHex { byte, offset }),
        }
    };

    let mut out = Vec::with_capacity(text.len() / 2);
    for (index, pair) in text.chunks_exact(2).enumerate() {
        let high = nibble(pair[0], index * 2)?;
        let low = nibble(pair[1], index * 2 + 1)?;
        out.push((high << 4) | low);
    }
    Ok(out)
}

/// Incremental frame extractor for a byte stream
///
/// Feed arbitrarily chunked input with [`Deframer::push`]; complete frames
/// come back de-hexed, in arrival order. State between calls is only the
/// current partial frame, so one instance per stream.
#[derive(Debug, Default)]
pub struct Deframer {
    buffer: Vec<u8>,
    in_frame: bool,
}

impl Deframer {
    /// Create a deframer waiting for a start marker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk of stream bytes, returning any frames it completed
    ///
    /// A frame that fails hex decoding yields its error in sequence; the
    /// deframer itself stays usable.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<Vec<u8>>> {
        let mut frames = Vec::new();

        for &byte in chunk {
            match byte {
                FRAME_START => {
                    if self.in_frame && !self.buffer.is_empty() {
                        warn!(dropped = self.buffer.len(), "resync inside a frame");
                    }
                    self.buffer.clear();
                    self.in_frame = true;
                }
                FRAME_END if self.in_frame => {
                    let result = decode_hex(&self.buffer);
                    if let Ok(message) = &result {
                        trace!(bytes = message.len(), "deframed message");
                    }
                    frames.push(result);
                    self.buffer.clear();
                    self.in_frame = false;
                }
                _ if self.in_frame => {
                    // Bound the partial frame: an unterminated start marker
                    // on garbage input must not accumulate forever.
                    if self.buffer.len() == MAX_FRAME_HEX {
                        warn!(dropped = self.buffer.len() + 1, "oversized frame, resyncing");
                        self.buffer.clear();
                        self.in_frame = false;
                    } else {
                        self.buffer.push(byte);
                    }
                }
                // Noise between frames
                _ => {}
            }
        }

        frames
    }

    /// True while a partial frame is buffered
    #[must_use]
    pub fn mid_frame(&self) -> bool {
        self.in_frame
    }
}
