//! Line splitting with carry-over across chunks

/// Splits chunks into complete lines, keeping the unterminated tail
///
/// `\n` and `\r\n` both end a line; terminators are not part of the
/// returned lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    carry: String,
}

impl LineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend the carried-over text to `chunk` and return the complete lines
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        let mut data = std::mem::take(&mut self.carry);
        data.push_str(chunk);

        let mut lines: Vec<String> = data.split('\n').map(str::to_string).collect();
        // split always yields at least one element: the unterminated tail
        self.carry = lines.pop().unwrap_or_default();

        for line in &mut lines {
            if line.ends_with('\r') {
                line.pop();
            }
        }
        lines
    }

    /// Text received after the last line terminator
    pub fn pending(&self) -> &str {
        &self.carry
    }

    /// Take the carried-over text once no more chunks will arrive
    pub fn take_remainder(&mut self) -> Option<String> {
        let mut rest = std::mem::take(&mut self.carry);
        if rest.ends_with('\r') {
            rest.pop();
        }
        (!rest.is_empty()).then_some(rest)
    }
}
