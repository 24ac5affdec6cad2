//! View configuration.
//!
//! A [`TagView`](crate::TagView) is configured once, at construction, from a
//! list of [`TagViewOption`]s folded over [`TagViewConfig::default`]. Later
//! options win. After folding, the config is sanitized so the layout and
//! editing code never sees negative margins or a character limit that cannot
//! hold the prefix.
//!
//! # Example
//!
//! ```
//! use spark_tags::config::{TagViewConfig, TagViewOption};
//!
//! let config = TagViewConfig::from_options(&[
//!     TagViewOption::TagPrefix("@".into()),
//!     TagViewOption::TagMaxCharacters(12),
//! ]);
//! assert_eq!(config.tag_prefix, "@");
//! assert_eq!(config.outer_margin, 5.0);
//! ```

use log::warn;

use crate::layout::sizer::char_count;
use crate::types::{Font, Rgba, Size};

// =============================================================================
// DEFAULTS
// =============================================================================

pub const DEFAULT_OUTER_MARGIN: f32 = 5.0;
pub const DEFAULT_INNER_MARGIN: f32 = 2.5;
pub const DEFAULT_TAG_PREFIX: &str = "#";
pub const DEFAULT_MAX_CHARACTERS: usize = 30;
pub const DEFAULT_MAX_TAG_COUNT: usize = 1000;
pub const DEFAULT_ADD_BUTTON_SIZE: Size = Size::new(30.0, 30.0);

// =============================================================================
// OPTIONS
// =============================================================================

/// A single named construction option.
#[derive(Debug, Clone, PartialEq)]
pub enum TagViewOption {
    OuterMargin(f32),
    InnerMargin(f32),
    BackgroundColor(Rgba),
    AutoGrowHeight(bool),
    Font(Font),
    TagBackgroundColor(Rgba),
    TagSelectedColor(Rgba),
    TagTextColor(Rgba),
    TagPrefix(String),
    TagMaxCharacters(usize),
    AddButtonBackgroundColor(Rgba),
    AddButtonTextColor(Rgba),
    AddButtonSize(Size),
    EnableEdit(bool),
    MaxTagCount(usize),
    /// Recolor a tapped tag briefly before notifying. Off gives the plain
    /// notify-on-tap behavior.
    SelectionPulse(bool),
    /// Show the `count / max` indicator under the focused tag.
    CharCountIndicator(bool),
}

// =============================================================================
// CONFIG
// =============================================================================

/// Resolved view configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TagViewConfig {
    pub outer_margin: f32,
    pub inner_margin: f32,
    pub background_color: Rgba,
    pub auto_grow_height: bool,
    pub font: Font,
    pub tag_background_color: Rgba,
    pub tag_selected_color: Rgba,
    pub tag_text_color: Rgba,
    pub tag_prefix: String,
    pub tag_max_characters: usize,
    pub add_button_background_color: Rgba,
    pub add_button_text_color: Rgba,
    pub add_button_size: Size,
    pub enable_edit: bool,
    pub max_tag_count: usize,
    pub selection_pulse: bool,
    pub char_count_indicator: bool,
}

impl Default for TagViewConfig {
    fn default() -> Self {
        Self {
            outer_margin: DEFAULT_OUTER_MARGIN,
            inner_margin: DEFAULT_INNER_MARGIN,
            background_color: Rgba::HOST_DEFAULT,
            auto_grow_height: true,
            font: Font::default(),
            tag_background_color: Rgba::WHITE,
            tag_selected_color: Rgba::WHITE,
            tag_text_color: Rgba::BLACK,
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            tag_max_characters: DEFAULT_MAX_CHARACTERS,
            add_button_background_color: Rgba::WHITE,
            add_button_text_color: Rgba::BLACK,
            add_button_size: DEFAULT_ADD_BUTTON_SIZE,
            enable_edit: true,
            max_tag_count: DEFAULT_MAX_TAG_COUNT,
            selection_pulse: true,
            char_count_indicator: true,
        }
    }
}

impl TagViewConfig {
    /// Fold options over the defaults, then sanitize.
    pub fn from_options(options: &[TagViewOption]) -> Self {
        let mut config = Self::default();
        for option in options {
            config.apply(option.clone());
        }
        config.sanitized()
    }

    /// Apply one option in place.
    pub fn apply(&mut self, option: TagViewOption) {
        match option {
            TagViewOption::OuterMargin(v) => self.outer_margin = v,
            TagViewOption::InnerMargin(v) => self.inner_margin = v,
            TagViewOption::BackgroundColor(v) => self.background_color = v,
            TagViewOption::AutoGrowHeight(v) => self.auto_grow_height = v,
            TagViewOption::Font(v) => self.font = v,
            TagViewOption::TagBackgroundColor(v) => self.tag_background_color = v,
            TagViewOption::TagSelectedColor(v) => self.tag_selected_color = v,
            TagViewOption::TagTextColor(v) => self.tag_text_color = v,
            TagViewOption::TagPrefix(v) => self.tag_prefix = v,
            TagViewOption::TagMaxCharacters(v) => self.tag_max_characters = v,
            TagViewOption::AddButtonBackgroundColor(v) => self.add_button_background_color = v,
            TagViewOption::AddButtonTextColor(v) => self.add_button_text_color = v,
            TagViewOption::AddButtonSize(v) => self.add_button_size = v,
            TagViewOption::EnableEdit(v) => self.enable_edit = v,
            TagViewOption::MaxTagCount(v) => self.max_tag_count = v,
            TagViewOption::SelectionPulse(v) => self.selection_pulse = v,
            TagViewOption::CharCountIndicator(v) => self.char_count_indicator = v,
        }
    }

    /// Clamp values the engine cannot work with.
    pub fn sanitized(mut self) -> Self {
        if !(self.outer_margin >= 0.0) {
            warn!("outer margin {} is invalid, using 0", self.outer_margin);
            self.outer_margin = 0.0;
        }
        if !(self.inner_margin >= 0.0) {
            warn!("inner margin {} is invalid, using 0", self.inner_margin);
            self.inner_margin = 0.0;
        }
        if !self.add_button_size.is_usable() {
            warn!(
                "add button size {:?} is invalid, using default",
                self.add_button_size
            );
            self.add_button_size = DEFAULT_ADD_BUTTON_SIZE;
        }

        // The prefix counts toward the limit, so leave room for one more char.
        let floor = char_count(&self.tag_prefix) + 1;
        if self.tag_max_characters < floor {
            warn!(
                "max characters {} cannot hold prefix {:?}, raising to {}",
                self.tag_max_characters, self.tag_prefix, floor
            );
            self.tag_max_characters = floor;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TagViewConfig::default();
        assert_eq!(config.outer_margin, 5.0);
        assert_eq!(config.inner_margin, 2.5);
        assert!(config.auto_grow_height);
        assert_eq!(config.tag_prefix, "#");
        assert_eq!(config.tag_max_characters, 30);
        assert!(config.enable_edit);
        assert_eq!(config.max_tag_count, 1000);
    }

    #[test]
    fn test_later_options_win() {
        let config = TagViewConfig::from_options(&[
            TagViewOption::OuterMargin(8.0),
            TagViewOption::OuterMargin(3.0),
            TagViewOption::EnableEdit(false),
        ]);
        assert_eq!(config.outer_margin, 3.0);
        assert!(!config.enable_edit);
    }

    #[test]
    fn test_sanitize_margins() {
        let config = TagViewConfig::from_options(&[
            TagViewOption::OuterMargin(-4.0),
            TagViewOption::InnerMargin(f32::NAN),
        ]);
        assert_eq!(config.outer_margin, 0.0);
        assert_eq!(config.inner_margin, 0.0);
    }

    #[test]
    fn test_sanitize_max_characters_holds_prefix() {
        let config = TagViewConfig::from_options(&[
            TagViewOption::TagPrefix("##".into()),
            TagViewOption::TagMaxCharacters(1),
        ]);
        assert_eq!(config.tag_max_characters, 3);
    }

    #[test]
    fn test_sanitize_add_button_size() {
        let config =
            TagViewConfig::from_options(&[TagViewOption::AddButtonSize(Size::new(10.0, 0.0))]);
        assert_eq!(config.add_button_size, DEFAULT_ADD_BUTTON_SIZE);
    }
}
