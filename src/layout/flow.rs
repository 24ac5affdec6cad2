//! Flow Layout Engine
//!
//! Row-packing placement of tag boxes, left to right and top to bottom, in a
//! single pass over the tags in ascending id order.
//!
//! # Algorithm
//!
//! With outer margin `m` and container width `W`:
//!
//! 1. The cursor starts at `(0, m)`: empty row, first row top at `m`.
//! 2. Each tag goes at `(cursor_x + m, row_top)`, then:
//!    - **Oversized** (wider than `W - 2m`): starts a new row at `x = m`
//!      unless the row is still empty. It is never split or shrunk, so it
//!      is the one case allowed past the right margin.
//!    - **Overflow** (right edge `> W - m`): wraps to `x = m`,
//!      `y = max_bottom + m`. An edge exactly at `W - m` stays.
//! 3. The add control follows the last tag, vertically centered on its row,
//!    and wraps below everything when it would overflow. With no tags it
//!    sits at `(m, m)`.
//! 4. Content height is `max_bottom + m`.
//! 5. With auto-grow the container height becomes
//!    `max(base_height, content_height)`; width and origin stay put.
//!
//! The pass is a pure function of its input. Nothing is carried between
//! passes.

use super::types::{ComputedFlow, FlowInput};
use crate::types::{Rect, Size};

// =============================================================================
// LAYOUT STATE
// =============================================================================

/// Working state for one pass.
#[derive(Debug, Clone, Copy)]
struct LayoutState {
    /// Right edge of the last placed box, 0 while the row is empty.
    cursor_x: f32,
    row_top: f32,
    row_bottom: f32,
    max_bottom: f32,
    row_is_empty: bool,
}

impl LayoutState {
    fn new(margin: f32) -> Self {
        Self {
            cursor_x: 0.0,
            row_top: margin,
            row_bottom: margin,
            max_bottom: 0.0,
            row_is_empty: true,
        }
    }

    /// Start a fresh row under everything placed so far.
    fn wrap(&mut self, margin: f32) {
        self.cursor_x = 0.0;
        self.row_top = self.max_bottom + margin;
        self.row_bottom = self.row_top;
        self.row_is_empty = true;
    }

    fn commit(&mut self, frame: Rect) {
        self.cursor_x = frame.right();
        self.row_top = frame.y;
        self.row_bottom = self.row_bottom.max(frame.bottom());
        self.max_bottom = self.max_bottom.max(frame.bottom());
        self.row_is_empty = false;
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute positions for every tag and the add control.
pub fn compute_flow(input: &FlowInput<'_>) -> ComputedFlow {
    let m = input.outer_margin;
    let width = input.container.width;
    let right_limit = width - m;
    let usable_width = width - m * 2.0;

    let mut state = LayoutState::new(m);
    let mut frames = Vec::with_capacity(input.items.len());

    for size in input.items {
        let oversized = size.width > usable_width;
        let right = state.cursor_x + m + size.width;

        if (oversized && !state.row_is_empty) || (!oversized && right > right_limit) {
            state.wrap(m);
        }

        let frame = Rect::new(state.cursor_x + m, state.row_top, size.width, size.height);
        state.commit(frame);
        frames.push(frame);
    }

    let add_button = input
        .add_button
        .map(|button| place_add_button(&mut state, button, m, right_limit, frames.is_empty()));

    let content_size = Size::new(width, state.max_bottom + m);

    let container = if input.auto_grow {
        Rect::new(
            input.container.x,
            input.container.y,
            width,
            input.container.height.max(content_size.height),
        )
    } else {
        input.container
    };

    ComputedFlow {
        frames,
        add_button,
        content_size,
        container,
    }
}

/// Place the add control after the last tag, wrapping it when needed.
fn place_add_button(
    state: &mut LayoutState,
    button: Size,
    m: f32,
    right_limit: f32,
    no_tags: bool,
) -> Rect {
    if no_tags {
        let frame = Rect::new(m, m, button.width, button.height);
        state.max_bottom = state.max_bottom.max(frame.bottom());
        return frame;
    }

    let row_mid = state.row_top + (state.row_bottom - state.row_top) / 2.0;
    let frame = Rect::new(
        state.cursor_x + m,
        row_mid - button.height / 2.0,
        button.width,
        button.height,
    );
    if frame.right() <= right_limit {
        return frame;
    }

    let wrapped = Rect::new(m, state.max_bottom + m, button.width, button.height);
    state.max_bottom = state.max_bottom.max(wrapped.bottom());
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(items: &'a [Size], width: f32) -> FlowInput<'a> {
        FlowInput {
            items,
            container: Rect::new(0.0, 0.0, width, 40.0),
            outer_margin: 5.0,
            add_button: None,
            auto_grow: true,
        }
    }

    #[test]
    fn test_empty_without_button() {
        let flow = compute_flow(&input(&[], 100.0));
        assert!(flow.frames.is_empty());
        assert!(flow.add_button.is_none());
        assert_eq!(flow.content_size.height, 5.0);
        assert_eq!(flow.container.height, 40.0);
    }

    #[test]
    fn test_single_row() {
        let items = [Size::new(20.0, 10.0), Size::new(30.0, 10.0)];
        let flow = compute_flow(&input(&items, 100.0));

        assert_eq!(flow.frames[0], Rect::new(5.0, 5.0, 20.0, 10.0));
        assert_eq!(flow.frames[1], Rect::new(30.0, 5.0, 30.0, 10.0));
        assert_eq!(flow.content_size.height, 20.0);
    }

    #[test]
    fn test_wrap_uses_max_row_bottom() {
        // Second tag taller than the first; third wraps below the taller one.
        let items = [
            Size::new(40.0, 10.0),
            Size::new(40.0, 20.0),
            Size::new(40.0, 10.0),
        ];
        let flow = compute_flow(&input(&items, 100.0));

        assert_eq!(flow.frames[1], Rect::new(50.0, 5.0, 40.0, 20.0));
        assert_eq!(flow.frames[2], Rect::new(5.0, 30.0, 40.0, 10.0));
        assert_eq!(flow.content_size.height, 45.0);
        assert_eq!(flow.container.height, 45.0);
    }

    #[test]
    fn test_exact_boundary_does_not_wrap() {
        // Second tag's right edge lands exactly on 100 - 5.
        let items = [Size::new(40.0, 10.0), Size::new(45.0, 10.0)];
        let flow = compute_flow(&input(&items, 100.0));
        assert_eq!(flow.frames[1].right(), 95.0);
        assert_eq!(flow.frames[1].y, 5.0);

        let items = [Size::new(40.0, 10.0), Size::new(45.5, 10.0)];
        let flow = compute_flow(&input(&items, 100.0));
        assert_eq!(flow.frames[1].x, 5.0);
        assert_eq!(flow.frames[1].y, 20.0);
    }

    #[test]
    fn test_oversized_tag_gets_own_row() {
        let items = [
            Size::new(20.0, 10.0),
            Size::new(150.0, 10.0),
            Size::new(20.0, 10.0),
        ];
        let flow = compute_flow(&input(&items, 100.0));

        assert_eq!(flow.frames[1], Rect::new(5.0, 20.0, 150.0, 10.0));
        assert_eq!(flow.frames[2], Rect::new(5.0, 35.0, 20.0, 10.0));
    }

    #[test]
    fn test_oversized_first_tag_stays_on_first_row() {
        let items = [Size::new(150.0, 10.0)];
        let flow = compute_flow(&input(&items, 100.0));
        assert_eq!(flow.frames[0], Rect::new(5.0, 5.0, 150.0, 10.0));
    }

    #[test]
    fn test_add_button_alone() {
        let mut flow_input = input(&[], 100.0);
        flow_input.add_button = Some(Size::new(30.0, 30.0));
        let flow = compute_flow(&flow_input);

        assert_eq!(flow.add_button, Some(Rect::new(5.0, 5.0, 30.0, 30.0)));
        assert_eq!(flow.content_size.height, 40.0);
    }

    #[test]
    fn test_add_button_centered_on_row() {
        let items = [Size::new(20.0, 20.0)];
        let mut flow_input = input(&items, 100.0);
        flow_input.add_button = Some(Size::new(10.0, 10.0));
        let flow = compute_flow(&flow_input);

        // Row spans 5..25, middle 15.
        assert_eq!(flow.add_button, Some(Rect::new(30.0, 10.0, 10.0, 10.0)));
        assert_eq!(flow.content_size.height, 30.0);
    }

    #[test]
    fn test_add_button_wraps() {
        let items = [Size::new(80.0, 10.0)];
        let mut flow_input = input(&items, 100.0);
        flow_input.add_button = Some(Size::new(30.0, 30.0));
        let flow = compute_flow(&flow_input);

        assert_eq!(flow.add_button, Some(Rect::new(5.0, 20.0, 30.0, 30.0)));
        assert_eq!(flow.content_size.height, 55.0);
        assert_eq!(flow.container.height, 55.0);
    }

    #[test]
    fn test_fixed_height_without_auto_grow() {
        let items = [Size::new(80.0, 10.0), Size::new(80.0, 10.0), Size::new(80.0, 10.0)];
        let mut flow_input = input(&items, 100.0);
        flow_input.auto_grow = false;
        let flow = compute_flow(&flow_input);

        assert_eq!(flow.content_size.height, 50.0);
        assert_eq!(flow.container, Rect::new(0.0, 0.0, 100.0, 40.0));
    }

    #[test]
    fn test_auto_grow_keeps_base_when_content_smaller() {
        let items = [Size::new(10.0, 10.0)];
        let mut flow_input = input(&items, 100.0);
        flow_input.container = Rect::new(12.0, 7.0, 100.0, 200.0);
        let flow = compute_flow(&flow_input);
        assert_eq!(flow.container, Rect::new(12.0, 7.0, 100.0, 200.0));
    }

    #[test]
    fn test_deterministic() {
        let items: Vec<Size> = (0..25)
            .map(|i| Size::new(10.0 + (i * 7 % 40) as f32, 10.0 + (i % 3) as f32 * 4.0))
            .collect();
        let mut flow_input = input(&items, 120.0);
        flow_input.add_button = Some(Size::new(30.0, 30.0));

        assert_eq!(compute_flow(&flow_input), compute_flow(&flow_input));
    }

    #[test]
    fn test_no_overflow_and_ascending_rows() {
        let items: Vec<Size> = (0..40)
            .map(|i| Size::new(8.0 + (i * 13 % 70) as f32, 9.0 + (i % 4) as f32 * 3.0))
            .collect();
        let flow = compute_flow(&input(&items, 150.0));
        let m = 5.0;

        for (frame, size) in flow.frames.iter().zip(&items) {
            if size.width <= 150.0 - 2.0 * m {
                assert!(frame.right() <= 150.0 - m, "{frame:?} overflows");
            }
        }

        for pair in flow.frames.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let same_row = a.y == b.y;
            assert!(
                (same_row && b.x >= a.x) || b.y >= a.bottom(),
                "{a:?} then {b:?}"
            );
        }
    }
}
