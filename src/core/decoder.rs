/// Incremental UTF-8 decoder fed one byte at a time.
///
/// Complete characters come out as soon as their last byte arrives. Bytes that
/// can never form a valid character are dropped and counted rather than
/// replaced with U+FFFD, so the capture only ever contains text the remote end
/// actually sent.
///
/// Unlike decoding every byte on its own, which would discard each byte of a
/// multi-byte character, split characters are reassembled across pushes, so
/// `é` sent as `0xC3 0xA9` is written to the capture.
#[derive(Debug, Default)]
pub struct LossyDecoder {
    pending: [u8; 4],
    len: usize,
    needed: usize,
    dropped: usize,
}

fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

impl LossyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8) -> Option<char> {
        if self.len > 0 {
            if is_continuation(byte) {
                self.pending[self.len] = byte;
                self.len += 1;
                if self.len < self.needed {
                    return None;
                }

                // 過長編碼與代理區在這裡被 from_utf8 擋下
                let decoded = std::str::from_utf8(&self.pending[..self.len])
                    .ok()
                    .and_then(|s| s.chars().next());
                if decoded.is_none() {
                    self.dropped += self.len;
                }
                self.reset();
                return decoded;
            }

            // Interrupted sequence: discard it and treat this byte as a fresh start.
            self.dropped += self.len;
            self.reset();
        }

        match sequence_len(byte) {
            1 => Some(char::from(byte)),
            0 => {
                self.dropped += 1;
                None
            }
            needed => {
                self.pending[0] = byte;
                self.len = 1;
                self.needed = needed;
                None
            }
        }
    }

    /// Ends the stream. A trailing incomplete sequence is dropped. Returns the
    /// total number of bytes dropped.
    pub fn finish(&mut self) -> usize {
        self.dropped += self.len;
        self.reset();
        self.dropped
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn reset(&mut self) {
        self.len = 0;
        self.needed = 0;
    }
}
