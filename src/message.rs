//! Message validation and round buffers.
//!
//! A [`Message`] carries the text being worked on across transposition
//! rounds: the validated source, the current round's input (`working`), the
//! round's accumulated result (`output`), and a read cursor advanced by the
//! diamond fill. Validation and case normalization happen once, at
//! construction, so the rest of the pipeline only ever sees uppercase ASCII
//! letters and the stop marker.

use thiserror::Error;

use crate::STOP_MARKER;

/// Errors that can occur while validating user text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("message is empty after removing whitespace")]
    Empty,

    #[error("invalid character '{0}': only letters are allowed")]
    InvalidCharacter(char),

    #[error("the stop marker '.' may only appear once, at the end of the message")]
    MisplacedStopMarker,
}

/// Text being processed across transposition rounds.
#[derive(Debug, Clone)]
pub struct Message {
    source: String,
    working: String,
    output: String,
    cursor: usize,
}

impl Message {
    /// Validates text for encoding.
    ///
    /// Whitespace is stripped and the remainder must be ASCII letters,
    /// optionally followed by a single trailing stop marker. The result is
    /// normalized to uppercase.
    pub fn from_plaintext(raw: &str) -> Result<Self, MessageError> {
        let cleaned = normalize(raw)?;
        if let Some(pos) = cleaned.find(STOP_MARKER) {
            if pos != cleaned.len() - 1 {
                return Err(MessageError::MisplacedStopMarker);
            }
        }
        Ok(Self::new(cleaned))
    }

    /// Validates text for decoding.
    ///
    /// Same rules as [`Message::from_plaintext`], except stop markers may
    /// appear anywhere: the ciphertext of a sentinel-terminated message
    /// carries the marker at whatever position the transposition left it.
    pub fn from_cipher(raw: &str) -> Result<Self, MessageError> {
        let cleaned = normalize(raw)?;
        Ok(Self::new(cleaned))
    }

    fn new(source: String) -> Self {
        let working = source.clone();
        Self {
            source,
            working,
            output: String::new(),
            cursor: 0,
        }
    }

    /// The validated, normalized source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The current round's input buffer.
    pub fn working(&self) -> &str {
        &self.working
    }

    /// Length of the current round's input.
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// True if the working buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// The round result accumulated so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Next unread character of the working buffer, advancing the cursor.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.working.as_bytes().get(self.cursor).copied()?;
        self.cursor += 1;
        Some(ch as char)
    }

    /// Resets the read cursor for a new pass.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Appends a fragment to the round result.
    pub fn push_output(&mut self, fragment: &str) {
        self.output.push_str(fragment);
    }

    /// Clears the round result.
    pub fn reset_output(&mut self) {
        self.output.clear();
    }

    /// Finishes a round: the result becomes the next round's input.
    pub fn commit_round(&mut self) {
        self.working = std::mem::take(&mut self.output);
        self.cursor = 0;
    }

    /// Truncates the working buffer to `len` characters.
    pub fn truncate_working(&mut self, len: usize) {
        self.working.truncate(len);
    }
}

/// Strips whitespace, uppercases, and rejects anything that is not a letter
/// or the stop marker.
fn normalize(raw: &str) -> Result<String, MessageError> {
    let mut cleaned = String::with_capacity(raw.len());

    for ch in raw.chars() {
        if ch.is_whitespace() {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            cleaned.push(ch.to_ascii_uppercase());
        } else if ch == STOP_MARKER {
            cleaned.push(ch);
        } else {
            return Err(MessageError::InvalidCharacter(ch));
        }
    }

    if cleaned.is_empty() {
        return Err(MessageError::Empty);
    }

    Ok(cleaned)
}
