//! In-game text encoding.
//!
//! The game does not use ASCII. Names are stored in a single-byte
//! character map and terminated with [`TEXT_TERMINATOR`]. Only the
//! printable subset that can appear in trainer names and nicknames is
//! supported here:
//!
//! ```text
//! 0x50         terminator
//! 0x7F         ' '
//! 0x80..=0x99  'A'..='Z'
//! 0x9A..=0x9F  ( ) : ; [ ]
//! 0xA0..=0xB9  'a'..='z'
//! 0xE3         '-'
//! 0xE6..=0xE8  ? ! .
//! 0xF6..=0xFF  '0'..='9'
//! ```

use std::fmt;

use crate::error::TextError;

/// Byte that ends a string in the game's character map.
pub const TEXT_TERMINATOR: u8 = 0x50;

/// Width of a name slot in the trade block, terminator included.
pub const NAME_LEN: usize = 11;

/// Decode a single character-map byte.
pub fn decode_char(b: u8) -> Option<char> {
    let c = match b {
        0x7F => ' ',
        0x80..=0x99 => (b'A' + (b - 0x80)) as char,
        0x9A => '(',
        0x9B => ')',
        0x9C => ':',
        0x9D => ';',
        0x9E => '[',
        0x9F => ']',
        0xA0..=0xB9 => (b'a' + (b - 0xA0)) as char,
        0xE3 => '-',
        0xE6 => '?',
        0xE7 => '!',
        0xE8 => '.',
        0xF6..=0xFF => (b'0' + (b - 0xF6)) as char,
        _ => return None,
    };

    Some(c)
}

/// Encode a single character into the character map.
pub fn encode_char(c: char) -> Option<u8> {
    let b = match c {
        ' ' => 0x7F,
        'A'..='Z' => 0x80 + (c as u8 - b'A'),
        '(' => 0x9A,
        ')' => 0x9B,
        ':' => 0x9C,
        ';' => 0x9D,
        '[' => 0x9E,
        ']' => 0x9F,
        'a'..='z' => 0xA0 + (c as u8 - b'a'),
        '-' => 0xE3,
        '?' => 0xE6,
        '!' => 0xE7,
        '.' => 0xE8,
        '0'..='9' => 0xF6 + (c as u8 - b'0'),
        _ => return None,
    };

    Some(b)
}

/// A fixed-width, terminator-padded name (trainer name, OT name, nickname).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub [u8; NAME_LEN]);

impl Name {
    /// A name slot holding no characters.
    pub const EMPTY: Name = Name([TEXT_TERMINATOR; NAME_LEN]);

    /// Encode `text`, padding the rest of the slot with terminators.
    pub fn from_text(text: &str) -> Result<Self, TextError> {
        let len = text.chars().count();
        if len > NAME_LEN - 1 {
            return Err(TextError::TooLong {
                len,
                max: NAME_LEN - 1,
            });
        }

        let mut bytes = [TEXT_TERMINATOR; NAME_LEN];
        for (slot, c) in bytes.iter_mut().zip(text.chars()) {
            *slot = encode_char(c).ok_or(TextError::Unmapped(c))?;
        }

        Ok(Name(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.0
    }
}

impl Default for Name {
    fn default() -> Self {
        Name::EMPTY
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.0.iter().take_while(|&&b| b != TEXT_TERMINATOR) {
            write!(f, "{}", decode_char(b).unwrap_or('?'))?;
        }
        Ok(())
    }
}
