//! The rotor: a rotating substitution disk over A-Z.

use std::fmt;

/// Number of symbols on the rotor.
pub const ALPHABET_LEN: usize = 26;

/// The rotor alphabet in its initial order.
pub const ALPHABET: [char; ALPHABET_LEN] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// A cipher disk holding the 26 uppercase letters in cyclic order.
///
/// The zero-offset selects which stored symbol stands at logical position 0.
/// Rotating only moves the offset; the symbols themselves never change.
///
/// Before any rotation [`map_char`](Rotor::map_char) is the identity on A-Z.
/// After a net rotation of `n`, it maps each letter to the letter `n`
/// positions ahead of it, wrapping around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    symbols: [char; ALPHABET_LEN],
    offset: usize,
}

impl Default for Rotor {
    fn default() -> Self {
        Self::new()
    }
}

impl Rotor {
    /// Create a rotor with the alphabet A-Z and the zero-offset at `A`.
    pub fn new() -> Self {
        Rotor {
            symbols: ALPHABET,
            offset: 0,
        }
    }

    /// Rotate the zero-offset by `n` positions and return the new offset.
    ///
    /// Positive values rotate forward, negative values backward. Any integer
    /// is accepted; multiples of 26 leave the mapping unchanged.
    pub fn rotate(&mut self, n: i32) -> usize {
        let shift = n.rem_euclid(ALPHABET_LEN as i32) as usize;
        self.offset = (self.offset + shift) % ALPHABET_LEN;
        tracing::trace!(
            delta = n,
            offset = self.offset,
            zero = %self.zero_symbol(),
            "rotor rotated"
        );
        self.offset
    }

    /// Map one input character through the rotor.
    ///
    /// Only `'A'..='Z'` take part in the cipher. Every other character,
    /// lowercase letters included, passes through unchanged.
    pub fn map_char(&self, input: char) -> char {
        if !input.is_ascii_uppercase() {
            return input;
        }
        let position = (input as u8 - b'A') as usize;
        self.symbols[(self.offset + position) % ALPHABET_LEN]
    }

    /// Current zero-offset, in `[0, 26)`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The symbol currently at logical position 0.
    pub fn zero_symbol(&self) -> char {
        self.symbols[self.offset]
    }

    /// The full current substitution, indexed by input letter.
    pub fn mapping(&self) -> [char; ALPHABET_LEN] {
        ALPHABET.map(|c| self.map_char(c))
    }
}

impl fmt::Display for Rotor {
    /// Renders the symbols starting at the zero position, which is starred.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotor (zero='{}'):", self.zero_symbol())?;
        for i in 0..ALPHABET_LEN {
            let symbol = self.symbols[(self.offset + i) % ALPHABET_LEN];
            if i == 0 {
                write!(f, " {}*", symbol)?;
            } else {
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}
