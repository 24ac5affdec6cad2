//! Primitive Types - Values the tag view hands to the host.

use spark_signals::{signal, Signal};

use crate::types::{Rect, Size, TagId};

// =============================================================================
// CHARACTER COUNTER
// =============================================================================

/// Size of the character-count indicator.
pub const COUNTER_SIZE: Size = Size::new(51.0, 20.0);

/// Gap between the focused tag's bottom edge and the indicator's center.
pub const COUNTER_OFFSET: f32 = 5.0;

/// The `count / max` indicator shown under the focused tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CharCounter {
    pub tag: TagId,
    /// Grapheme clusters in the tag text, prefix included.
    pub count: usize,
    pub max: usize,
    pub frame: Rect,
}

impl CharCounter {
    /// Counter for a tag at `tag_frame`: right-aligned with the tag, centered
    /// just below it.
    pub fn below(tag: TagId, tag_frame: Rect, count: usize, max: usize) -> Self {
        let center_y = tag_frame.bottom() + COUNTER_OFFSET;
        Self {
            tag,
            count,
            max,
            frame: Rect::new(
                tag_frame.right() - COUNTER_SIZE.width,
                center_y - COUNTER_SIZE.height / 2.0,
                COUNTER_SIZE.width,
                COUNTER_SIZE.height,
            ),
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {}", self.count, self.max)
    }
}

// =============================================================================
// SIGNALS
// =============================================================================

/// Reactive view state, updated at the end of every layout pass.
///
/// Signals are cheap handles; clone them into derived values or effects.
#[derive(Clone)]
pub struct TagViewSignals {
    /// Current container frame (grows with auto-grow).
    pub container: Signal<Rect>,
    pub tag_count: Signal<usize>,
    /// Incremented once per layout pass.
    pub layout_pass: Signal<u64>,
}

impl TagViewSignals {
    pub fn new(container: Rect) -> Self {
        Self {
            container: signal(container),
            tag_count: signal(0),
            layout_pass: signal(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_placement() {
        let counter = CharCounter::below(TagId(0), Rect::new(10.0, 5.0, 60.0, 30.0), 4, 30);
        assert_eq!(counter.frame, Rect::new(19.0, 30.0, 51.0, 20.0));
        assert_eq!(counter.label(), "4 / 30");
    }

    #[test]
    fn test_signals_start_empty() {
        let signals = TagViewSignals::new(Rect::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(signals.tag_count.get(), 0);
        assert_eq!(signals.layout_pass.get(), 0);
        assert_eq!(signals.container.get().width, 100.0);
    }
}
