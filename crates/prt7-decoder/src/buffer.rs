//! Append-only buffer of decoded characters.

use std::fmt;

/// Decoded characters in arrival order.
///
/// Grows by exactly one character per processed Load frame. Map frames never
/// touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBuffer {
    chars: Vec<char>,
}

impl MessageBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decoded character.
    pub fn append(&mut self, c: char) {
        self.chars.push(c);
    }

    /// The message assembled so far.
    pub fn assembled_message(&self) -> String {
        self.chars.iter().collect()
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Iterate over the characters in insertion order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl fmt::Display for MessageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl Extend<char> for MessageBuffer {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.chars.extend(iter);
    }
}

impl FromIterator<char> for MessageBuffer {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        MessageBuffer {
            chars: iter.into_iter().collect(),
        }
    }
}
