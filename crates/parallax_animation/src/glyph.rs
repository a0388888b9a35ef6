//! Glyph formatting for per-letter reveals
//!
//! Splits a headline into glyph tokens, one animation target each. Word boundaries
//! become a run of fixed-width separators so the stagger pauses between words.

use std::fmt;

/// Non-breaking space used for word separators
const NBSP: char = '\u{00A0}';

/// One token of a formatted headline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Letter(char),
    /// One slot of a word separator
    Separator,
    /// Plain space between letters in letter-gap mode
    Gap,
}

impl Glyph {
    /// Rendered character
    pub fn as_char(&self) -> char {
        match self {
            Glyph::Letter(c) => *c,
            Glyph::Separator => NBSP,
            Glyph::Gap => ' ',
        }
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Glyph::Letter(_))
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Turns display text into glyph tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphFormatter {
    uppercase: bool,
    separator_width: usize,
    letter_gap: bool,
}

impl Default for GlyphFormatter {
    fn default() -> Self {
        Self {
            uppercase: true,
            separator_width: 2,
            letter_gap: false,
        }
    }
}

impl GlyphFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Number of separator slots emitted for each space
    pub fn separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// Put a plain space between every emitted token
    pub fn letter_gap(mut self, letter_gap: bool) -> Self {
        self.letter_gap = letter_gap;
        self
    }

    /// Split `text` into glyphs
    pub fn format(&self, text: &str) -> Vec<Glyph> {
        let mut tokens = Vec::with_capacity(text.len());
        for ch in text.chars() {
            if ch == ' ' {
                tokens.extend(std::iter::repeat(Glyph::Separator).take(self.separator_width));
            } else if self.uppercase {
                tokens.extend(ch.to_uppercase().map(Glyph::Letter));
            } else {
                tokens.push(Glyph::Letter(ch));
            }
        }

        if !self.letter_gap || tokens.len() < 2 {
            return tokens;
        }
        let mut spaced = Vec::with_capacity(tokens.len() * 2 - 1);
        for (i, glyph) in tokens.into_iter().enumerate() {
            if i > 0 {
                spaced.push(Glyph::Gap);
            }
            spaced.push(glyph);
        }
        spaced
    }

    /// Formatted text as a string
    pub fn render(&self, text: &str) -> String {
        self.format(text).iter().map(Glyph::as_char).collect()
    }
}
