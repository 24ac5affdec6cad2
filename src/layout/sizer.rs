//! Tag Sizer - Prefix policy and box sizing.
//!
//! Glyph metrics belong to the host ([`TextMeasure`]). The sizer owns what
//! wraps them:
//! - prefix normalization (`"hello"` → `"#hello"`, `""` stays empty)
//! - character limits, counted in grapheme clusters with the prefix included
//! - inner-margin padding around the measured text
//! - a fallback size when measurement fails or returns nonsense

use log::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::TagError;
use crate::host::TextMeasure;
use crate::types::{Font, Size};

/// Text size used when the host cannot measure. With the default inner
/// margin this yields a 60 × 30 box.
pub const FALLBACK_TEXT_SIZE: Size = Size::new(55.0, 25.0);

// =============================================================================
// TEXT POLICY
// =============================================================================

/// Prepend `prefix` unless `raw` already starts with it. Empty text stays
/// empty so an emptied field can still be detected and removed.
pub fn normalize(raw: &str, prefix: &str) -> String {
    if raw.is_empty() || raw.starts_with(prefix) {
        raw.to_string()
    } else {
        format!("{prefix}{raw}")
    }
}

/// Remove one leading `prefix` when present.
pub fn strip_prefix<'a>(text: &'a str, prefix: &str) -> &'a str {
    text.strip_prefix(prefix).unwrap_or(text)
}

/// True when `text` carries nothing beyond the prefix.
pub fn is_blank(text: &str, prefix: &str) -> bool {
    text.is_empty() || text == prefix
}

/// Number of user-perceived characters.
pub fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Keep at most `max_chars` grapheme clusters.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.grapheme_indices(true).nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Normalize, then truncate. The prefix is part of the counted text.
pub fn settle(raw: &str, prefix: &str, max_chars: usize) -> String {
    truncate(&normalize(raw, prefix), max_chars)
}

// =============================================================================
// SIZER
// =============================================================================

/// Measures tag boxes through a host [`TextMeasure`].
pub struct TagSizer {
    measure: Box<dyn TextMeasure>,
}

impl TagSizer {
    pub fn new(measure: impl TextMeasure + 'static) -> Self {
        Self {
            measure: Box::new(measure),
        }
    }

    /// Natural text size, no padding. Never fails: unusable results fall
    /// back to [`FALLBACK_TEXT_SIZE`].
    pub fn measure(&self, text: &str, font: &Font) -> Size {
        match self.measure.measure(text, font) {
            Ok(size) if size.is_usable() => size,
            Ok(size) => {
                let err = TagError::MeasurementUnavailable {
                    text: text.to_string(),
                };
                warn!("{err}: degenerate size {size:?}, using fallback");
                FALLBACK_TEXT_SIZE
            }
            Err(err) => {
                warn!("{err}, using fallback");
                FALLBACK_TEXT_SIZE
            }
        }
    }

    /// Measured size grown by `inner_margin` on every side.
    pub fn box_for(&self, text: &str, font: &Font, inner_margin: f32) -> Size {
        self.measure(text, font).inflate(inner_margin)
    }
}

impl std::fmt::Debug for TagSizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagSizer").finish_non_exhaustive()
    }
}
