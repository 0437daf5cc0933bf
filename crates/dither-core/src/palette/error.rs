//! Error types for palette operations
//!
//! Parsing is the only fallible part of the core: hex color literals and the
//! free-text palette format. Everything downstream degrades instead of
//! failing (an empty palette quantizes as a pass-through).

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 digits after stripping '#')
    #[error("invalid hex color length {0} (expected 3 or 6 digits)")]
    InvalidLength(usize),

    /// Something other than hexadecimal digits after the optional '#'
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// Error type for palette text parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// The text contained no colors at all
    #[error("palette is empty")]
    EmptyPalette,

    /// A token on the given (1-based) line is not a hex color
    #[error("line {line}: '{token}' is not a color: {source}")]
    InvalidToken {
        line: usize,
        token: String,
        #[source]
        source: ParseColorError,
    },

    #[error("palette tokenizer: {0}")]
    Tokenizer(#[from] regex::Error),
}
