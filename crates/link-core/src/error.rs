//! Error types for the core data model.
//!
//! The data model itself is plain values; the only fallible operation is
//! turning Rust text into the game's character map.

use thiserror::Error;

/// Failure to encode text into an in-game [`Name`](crate::Name).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// The text does not fit the name slot (the last byte is reserved
    /// for the terminator).
    #[error("name is {len} characters long, at most {max} fit")]
    TooLong { len: usize, max: usize },

    /// The character has no in-game glyph.
    #[error("character {0:?} has no in-game encoding")]
    Unmapped(char),
}
