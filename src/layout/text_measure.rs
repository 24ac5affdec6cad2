//! Text Measurement
//!
//! Display width of tag text, and a default [`TextMeasure`] for hosts that
//! draw with a monospace font (terminals included).
//!
//! Widths are counted in cells:
//! - ASCII printable: 1 cell
//! - East Asian wide characters: 2 cells
//! - Emoji sequences (ZWJ, skin tone, flags): 2 cells
//! - Control characters and combining marks: 0 cells

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::host::TextMeasure;
use crate::types::{Font, Size};

/// Display width of a single codepoint in cells.
#[inline]
pub fn char_width(c: char) -> usize {
    match c as u32 {
        // Misc symbols and dingbats (✨ ⚡)
        0x2600..=0x27BF => 2,
        // Pictographs, emoticons, transport, supplemental symbols
        0x1F300..=0x1F64F | 0x1F680..=0x1F6FF | 0x1F900..=0x1F9FF | 0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of one grapheme cluster in cells.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    // Regional indicator pair (flag)
    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    for c in chars {
        match c as u32 {
            0x200D | 0xFE0F | 0x1F3FB..=0x1F3FF | 0x20E3 => return 2,
            _ => {}
        }
    }

    first.width().unwrap_or(0)
}

/// Display width of a string in cells.
pub fn string_width(s: &str) -> usize {
    if s.is_empty() {
        return 0;
    }

    // Fast path: ASCII, count printable bytes.
    if s.is_ascii() {
        return s.bytes().filter(|&b| (0x20..0x7F).contains(&b)).count();
    }

    s.graphemes(true).map(grapheme_width).sum()
}

// =============================================================================
// MONOSPACE MEASURE
// =============================================================================

/// Measures text as a single line of fixed-advance cells.
///
/// Width is `cells × font.size × advance`, height is `font.size ×
/// line_height`. With `advance = 1.0`, `line_height = 1.0` and a font size
/// of 1 the result is in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceMeasure {
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    /// One unit per cell, one unit per line.
    pub const fn cells() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(0.6, 1.2)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font: &Font) -> Result<Size> {
        let cells = string_width(text) as f32;
        Ok(Size::new(
            cells * font.size * self.advance,
            font.size * self.line_height,
        ))
    }
}
