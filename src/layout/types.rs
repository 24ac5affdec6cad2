//! Layout Types
//!
//! Input and output of a flow layout pass.

use crate::types::{Rect, Size};

/// Everything one layout pass depends on.
#[derive(Debug, Clone, Copy)]
pub struct FlowInput<'a> {
    /// Box sizes of the tags, in ascending id order.
    pub items: &'a [Size],
    /// Base frame of the container (position and size at construction).
    pub container: Rect,
    pub outer_margin: f32,
    /// Add control size, `None` while it is hidden.
    pub add_button: Option<Size>,
    pub auto_grow: bool,
}

/// Computed layout result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedFlow {
    /// Frame of each tag, parallel to [`FlowInput::items`].
    pub frames: Vec<Rect>,

    /// Frame of the add control when it is shown.
    pub add_button: Option<Rect>,

    /// Scrollable content size: container width by required height.
    pub content_size: Size,

    /// Container frame after auto-grow (the base frame when disabled).
    pub container: Rect,
}

impl ComputedFlow {
    /// Height the content needs, outer margins included.
    pub fn required_height(&self) -> f32 {
        self.content_size.height
    }

    /// True when content is taller than the container and the host must scroll.
    pub fn needs_scroll(&self) -> bool {
        self.content_size.height > self.container.height
    }
}
