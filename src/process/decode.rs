//! UTF-8 decoding of raw pipe chunks

/// Decodes a byte stream chunk by chunk
///
/// A multi-byte character split across two reads is held back until the
/// rest of it arrives. Invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub(crate) struct ChunkDecoder {
    pending: Vec<u8>,
}

impl ChunkDecoder {
    /// Decode as much of `bytes` (plus any held-back bytes) as possible
    pub(crate) fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut text = String::with_capacity(self.pending.len());

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    text.push_str(valid);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.pending[..valid_up_to]));
                    match e.error_len() {
                        Some(invalid) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + invalid);
                        }
                        None => {
                            // Incomplete sequence at the end, wait for more bytes
                            self.pending.drain(..valid_up_to);
                            break;
                        }
                    }
                }
            }
        }
        text
    }

    /// Flush whatever is still held back once the stream has ended
    pub(crate) fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}
