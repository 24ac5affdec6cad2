//! Host collaborators.
//!
//! The engine never draws, measures glyphs or owns keyboard focus. It talks
//! to the host through these traits:
//!
//! - [`TextMeasure`] - natural size of a string in a font (required)
//! - [`FocusControl`] - give or take input focus from a tag field
//! - [`PlacementSink`] - receives frames, colors and the counter to display
//! - [`TagViewDelegate`] - fire-and-forget notifications
//!
//! Everything except `TextMeasure` has no-op defaults, and `()` implements
//! each of them, so a host only overrides what it cares about.

use crate::error::Result;
use crate::primitives::CharCounter;
use crate::types::{Font, Rect, Rgba, Size, TagId};

/// Text measurement service. Must be synchronous and pure.
pub trait TextMeasure {
    /// Natural size of `text` set in `font`, without padding.
    fn measure(&self, text: &str, font: &Font) -> Result<Size>;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, &Font) -> Result<Size>,
{
    fn measure(&self, text: &str, font: &Font) -> Result<Size> {
        self(text, font)
    }
}

/// Input focus control for tag fields.
pub trait FocusControl {
    fn request_focus(&mut self, _id: TagId) {}
    fn release_focus(&mut self, _id: TagId) {}
}

impl FocusControl for () {}

/// Receives geometry and visual state to apply on screen.
pub trait PlacementSink {
    fn place_tag(&mut self, _id: TagId, _frame: Rect) {}
    /// Removed tags are reported so the host can drop their element.
    fn remove_tag(&mut self, _id: TagId) {}
    /// `None` hides the add control.
    fn place_add_button(&mut self, _frame: Option<Rect>) {}
    fn resize_container(&mut self, _frame: Rect, _content: Size) {}
    fn set_tag_color(&mut self, _id: TagId, _color: Rgba) {}
    /// The engine settled a tag's text (prefix restored, limit applied);
    /// the host field should show `text`.
    fn set_tag_text(&mut self, _id: TagId, _text: &str) {}
    /// `None` hides the indicator.
    fn show_char_counter(&mut self, _counter: Option<&CharCounter>) {}
}

impl PlacementSink for () {}

/// Notifications to the host. No return values are expected.
pub trait TagViewDelegate<D> {
    fn on_layout_changed(&mut self) {}
    fn on_edit_session_ended(&mut self) {}
    fn on_tag_tapped(&mut self, _text: &str, _user_data: Option<&D>) {}
}

impl<D> TagViewDelegate<D> for () {}
