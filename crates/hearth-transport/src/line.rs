//! Line framing and command splitting.
//!
//! Bytes arrive in arbitrary chunks. [`LineBuffer`] accumulates them and
//! hands out complete lines (terminated by `\n`, with an optional `\r`).
//! Each non-blank line becomes a [`CommandLine`]: the first
//! whitespace-delimited token is the verb, the trimmed remainder is the
//! argument.

use crate::TransportError;

/// Default cap on a single line, in bytes.
pub const DEFAULT_MAX_LINE_LEN: usize = 4 * 1024;

/// One line of player input, split into verb and argument.
///
/// The verb keeps the case the player typed; case folding (where it
/// applies) is the game's decision, not the transport's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    raw: String,
    verb_end: usize,
    arg_start: usize,
}

impl CommandLine {
    /// Splits a line into verb and argument.
    ///
    /// Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let raw = line.trim();
        if raw.is_empty() {
            return None;
        }

        let verb_end = raw.find(char::is_whitespace).unwrap_or(raw.len());
        let rest = &raw[verb_end..];
        let arg_start = raw.len() - rest.trim_start().len();

        Some(Self {
            raw: raw.to_string(),
            verb_end,
            arg_start,
        })
    }

    /// The first whitespace-delimited token, as typed.
    pub fn verb(&self) -> &str {
        &self.raw[..self.verb_end]
    }

    /// Everything after the verb, trimmed. May be empty.
    pub fn argument(&self) -> &str {
        &self.raw[self.arg_start..]
    }

    /// The whole trimmed line.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Accumulates raw bytes and yields complete lines.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Vec<u8>,
    max_line_len: usize,
}

impl LineBuffer {
    pub fn new(max_line_len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(256),
            max_line_len: max_line_len.max(1),
        }
    }

    /// Appends freshly received bytes.
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Pops the next complete line, stripping `\n` and an optional `\r`.
    ///
    /// Returns `Ok(None)` when no full line is buffered yet, and
    /// [`TransportError::LineTooLong`] once an unterminated line grows
    /// past the limit.
    pub fn next_line(&mut self) -> Result<Option<String>, TransportError> {
        let Some(i) = self.buf.iter().position(|b| *b == b'\n') else {
            if self.buf.len() > self.max_line_len {
                return Err(TransportError::LineTooLong(self.max_line_len));
            }
            return Ok(None);
        };

        let mut line: Vec<u8> = self.buf.drain(..=i).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.len() > self.max_line_len {
            return Err(TransportError::LineTooLong(self.max_line_len));
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LEN)
    }
}
