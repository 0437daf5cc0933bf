//! Free-text palette definitions
//!
//! ```text
//! // warm ramp
//! #000 #332211 #664422
//! -----
//! #ffeecc, fff
//! ```
//!
//! Tokens are hex literals separated by whitespace, commas or semicolons.
//! `//` starts a comment running to the end of the line. A line of five or
//! more dashes closes the current row. Rows only matter for display; the
//! flattened color order is the palette order.

use regex::Regex;

use super::error::PaletteError;
use crate::color::Rgb8;

const TOKEN_PATTERN: &str = r"[^\s,;]+";
const SEPARATOR_PATTERN: &str = r"^-{5,}$";

/// Result of parsing palette text.
///
/// Malformed tokens do not abort the parse; they are collected in `errors`
/// and the remaining colors are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteText {
    pub rows: Vec<Vec<Rgb8>>,
    pub errors: Vec<PaletteError>,
}

impl PaletteText {
    /// All colors in textual order.
    pub fn colors(&self) -> Vec<Rgb8> {
        self.rows.iter().flatten().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Colors in textual order, failing on the first malformed token or when
    /// nothing was parsed.
    pub fn into_colors(self) -> Result<Vec<Rgb8>, PaletteError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        let colors: Vec<Rgb8> = self.rows.into_iter().flatten().collect();
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(colors)
    }
}

/// Tokenize palette text into rows of colors.
pub fn parse_palette_text(text: &str) -> Result<PaletteText, PaletteError> {
    let token = Regex::new(TOKEN_PATTERN)?;
    let separator = Regex::new(SEPARATOR_PATTERN)?;

    let mut parsed = PaletteText::default();
    let mut row = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = match raw_line.find("//") {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        }
        .trim();

        if separator.is_match(line) {
            if !row.is_empty() {
                parsed.rows.push(std::mem::take(&mut row));
            }
            continue;
        }

        for m in token.find_iter(line) {
            match m.as_str().parse::<Rgb8>() {
                Ok(color) => row.push(color),
                Err(source) => parsed.errors.push(PaletteError::InvalidToken {
                    line: index + 1,
                    token: m.as_str().to_string(),
                    source,
                }),
            }
        }
    }
    if !row.is_empty() {
        parsed.rows.push(row);
    }

    tracing::debug!(
        rows = parsed.rows.len(),
        colors = parsed.rows.iter().map(Vec::len).sum::<usize>(),
        errors = parsed.errors.len(),
        "Parsed palette text"
    );
    Ok(parsed)
}
