//! Input Module - Terminal event bridge
//!
//! Converts crossterm events into tag view gestures and routes them.
//!
//! # API
//!
//! - `convert_key_event` - crossterm KeyEvent to a [`TagInput`]
//! - `convert_mouse_event` - crossterm MouseEvent to a [`TagInput`]
//! - `convert_event` - any crossterm Event
//! - `poll_event` - Non-blocking event check with timeout
//! - `route_input` - Apply a [`TagInput`] to a [`TagView`]
//!
//! # Example
//!
//! ```ignore
//! use spark_tags::state::input::{poll_event, route_input};
//! use std::time::{Duration, Instant};
//!
//! loop {
//!     let timeout = view.next_deadline(Instant::now()).unwrap_or(Duration::from_millis(16));
//!     if let Ok(Some(input)) = poll_event(timeout, cell) {
//!         route_input(&mut view, input, Instant::now());
//!     }
//!     view.tick(Instant::now());
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent,
    MouseEventKind,
    poll, read,
};
use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;

use crate::primitives::TagView;
use crate::types::{Point, Size};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// A gesture the tag view understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TagInput {
    /// Type a character into the focused field.
    Insert(char),
    /// Delete the last character of the focused field.
    Backspace,
    /// Return: commit the focused field.
    Commit,
    /// Escape: cancel the focused field.
    Cancel,
    /// Primary click at a container-local point.
    Tap(Point),
    /// Anything the tag view does not handle.
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm KeyEvent. Releases and control chords are ignored.
pub fn convert_key_event(event: CrosstermKeyEvent) -> TagInput {
    if event.kind == KeyEventKind::Release {
        return TagInput::None;
    }
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return TagInput::None;
    }

    match event.code {
        KeyCode::Char(c) => TagInput::Insert(c),
        KeyCode::Backspace => TagInput::Backspace,
        KeyCode::Enter => TagInput::Commit,
        KeyCode::Esc => TagInput::Cancel,
        _ => TagInput::None,
    }
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert a crossterm MouseEvent. Only a left button press is a tap; the
/// cell is mapped to the center of its box, `cell` being one cell's size in
/// container units.
pub fn convert_mouse_event(event: CrosstermMouseEvent, cell: Size) -> TagInput {
    match event.kind {
        MouseEventKind::Down(CrosstermMouseButton::Left) => TagInput::Tap(Point::new(
            (event.column as f32 + 0.5) * cell.width,
            (event.row as f32 + 0.5) * cell.height,
        )),
        _ => TagInput::None,
    }
}

/// Convert any crossterm Event.
pub fn convert_event(event: CrosstermEvent, cell: Size) -> TagInput {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse, cell),
        _ => TagInput::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration, cell: Size) -> std::io::Result<Option<TagInput>> {
    if poll(timeout)? {
        Ok(Some(convert_event(read()?, cell)))
    } else {
        Ok(None)
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Apply `input` to `view`. Returns true if the view handled it.
///
/// Typing edits the focused tag's text and goes through
/// [`TagView::text_changed`], so keystrokes are debounced like any other
/// host edit.
pub fn route_input<D: 'static>(view: &mut TagView<D>, input: TagInput, now: Instant) -> bool {
    match input {
        TagInput::Insert(c) => edit_focused(view, now, |text| text.push(c)),
        TagInput::Backspace => edit_focused(view, now, |text| {
            if let Some((cut, _)) = text.grapheme_indices(true).next_back() {
                text.truncate(cut);
            }
        }),
        TagInput::Commit => view.return_pressed(),
        TagInput::Cancel => view.cancel_editing(),
        TagInput::Tap(point) => view.tap(point, now),
        TagInput::None => false,
    }
}

fn edit_focused<D: 'static>(
    view: &mut TagView<D>,
    now: Instant,
    edit: impl FnOnce(&mut String),
) -> bool {
    let Some(id) = view.focused_tag() else {
        return false;
    };
    let Some(mut text) = view.tag(id).map(|tag| tag.text.clone()) else {
        return false;
    };
    edit(&mut text);
    view.text_changed(id, &text, now)
}
