//! Tag View - The tag editor component.
//!
//! Owns the tag store and wires host gestures to editing, sizing and flow
//! layout. Every mutation ends in a total layout pass whose result goes to
//! the host's [`PlacementSink`] and the view's [`TagViewSignals`].
//!
//! # Gestures
//!
//! - `tap_add_button` - create a tag holding the bare prefix and focus it
//! - `focus_tag` / `text_changed` / `focus_lost` - edit a tag field
//! - `return_pressed` / `cancel_editing` - end the edit from the keyboard
//! - `tap` - hit-test a point: add control, or a tag (selection pulse)
//! - `tick` - fire due timers (refit debounce, pulse revert)
//!
//! # Example
//!
//! ```
//! use spark_tags::{MonospaceMeasure, Point, Size, TagView};
//! use std::time::{Duration, Instant};
//!
//! let mut view: TagView = TagView::new(
//!     Point::new(0.0, 0.0),
//!     Size::new(200.0, 40.0),
//!     &[],
//!     MonospaceMeasure::default(),
//! );
//! view.add_tag("rust", None);
//!
//! let t0 = Instant::now();
//! assert!(view.tap_add_button());
//! let id = view.focused_tag().unwrap();
//! view.text_changed(id, "#tags", t0);
//! view.tick(t0 + Duration::from_millis(50));
//! view.return_pressed();
//!
//! assert_eq!(view.get_tags(false), vec!["rust", "tags"]);
//! ```

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::debug;

use super::types::{CharCounter, TagViewSignals};
use crate::config::{TagViewConfig, TagViewOption};
use crate::engine::{Tag, TagStore};
use crate::host::{FocusControl, PlacementSink, TagViewDelegate, TextMeasure};
use crate::layout::sizer::{char_count, is_blank, normalize, settle, strip_prefix};
use crate::layout::{compute_flow, FlowInput, TagSizer};
use crate::state::{
    Changes, EditOutcome, EditPhase, EditingController, FocusState, TimerHandle, TimerKind,
    Timers, TAP_PULSE,
};
use crate::types::{Point, Rect, Size, TagId};

/// Tag editor component.
pub struct TagView<D = ()> {
    config: TagViewConfig,
    /// Position and size given by the host. Auto-grow never shrinks below it.
    base_frame: Rect,
    frame: Rect,
    content_size: Size,
    add_button: Option<Rect>,

    store: TagStore<D>,
    sizer: TagSizer,
    editor: EditingController,
    focus: FocusState,
    timers: Timers,
    /// Pending pulse revert per selected tag.
    pulses: BTreeMap<TagId, TimerHandle>,
    counter: Option<CharCounter>,

    delegate: Box<dyn TagViewDelegate<D>>,
    focus_control: Box<dyn FocusControl>,
    sink: Box<dyn PlacementSink>,
    signals: TagViewSignals,
}

impl<D: 'static> TagView<D> {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Create a view at `position` with base `size`. Options are applied once,
    /// in order.
    pub fn new(
        position: Point,
        size: Size,
        options: &[TagViewOption],
        measure: impl TextMeasure + 'static,
    ) -> Self {
        let config = TagViewConfig::from_options(options);
        let base_frame = Rect::from_parts(position, size);

        let mut view = Self {
            store: TagStore::new(config.max_tag_count),
            config,
            base_frame,
            frame: base_frame,
            content_size: Size::ZERO,
            add_button: None,
            sizer: TagSizer::new(measure),
            editor: EditingController::new(),
            focus: FocusState::new(),
            timers: Timers::new(),
            pulses: BTreeMap::new(),
            counter: None,
            delegate: Box::new(()),
            focus_control: Box::new(()),
            sink: Box::new(()),
            signals: TagViewSignals::new(base_frame),
        };
        view.layout();
        view
    }

    pub fn with_delegate(mut self, delegate: impl TagViewDelegate<D> + 'static) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    pub fn with_focus_control(mut self, focus_control: impl FocusControl + 'static) -> Self {
        self.focus_control = Box::new(focus_control);
        self
    }

    /// Attach a placement sink and replay the current layout into it.
    pub fn with_sink(mut self, sink: impl PlacementSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self.layout();
        self
    }

    // =========================================================================
    // TAGS
    // =========================================================================

    /// Add a tag. The text is normalized and truncated; the tag is not
    /// focused. Returns `None` at capacity or for blank text.
    pub fn add_tag(&mut self, text: &str, user_data: Option<D>) -> Option<TagId> {
        let text = settle(text, &self.config.tag_prefix, self.config.tag_max_characters);
        if is_blank(&text, &self.config.tag_prefix) {
            debug!("add_tag: blank text ignored");
            return None;
        }

        match self.store.add(text, user_data) {
            Ok(id) => {
                self.refit(id);
                self.hide_counter();
                self.layout();
                Some(id)
            }
            Err(err) => {
                debug!("add_tag: {err}");
                None
            }
        }
    }

    /// Remove a tag. Unknown ids are ignored.
    pub fn remove_tag(&mut self, id: TagId) -> bool {
        if !self.store.contains(id) {
            debug!("remove_tag: {id} not found");
            return false;
        }
        if self.editor.is_editing(id) {
            self.editor.abandon(&mut self.timers);
            self.focus.blur(self.focus_control.as_mut());
            self.hide_counter();
        }
        self.timers.cancel_for(id);
        self.pulses.remove(&id);
        self.store.remove(id);
        self.sink.remove_tag(id);
        self.layout();
        true
    }

    pub fn remove_all_tags(&mut self) {
        self.editor.abandon(&mut self.timers);
        self.focus.blur(self.focus_control.as_mut());
        self.hide_counter();
        self.timers.clear();
        self.pulses.clear();

        for id in self.store.ids() {
            self.sink.remove_tag(id);
        }
        self.store.clear();
        self.layout();
    }

    /// Tag texts in ascending id order, with the prefix ensured or stripped.
    pub fn get_tags(&self, with_prefix: bool) -> Vec<String> {
        let prefix = &self.config.tag_prefix;
        self.store
            .iter()
            .map(|tag| {
                if with_prefix {
                    normalize(&tag.text, prefix)
                } else {
                    strip_prefix(&tag.text, prefix).to_string()
                }
            })
            .collect()
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    pub fn enable_edit(&self) -> bool {
        self.config.enable_edit
    }

    /// Toggle the add control and whether fields accept input. Disabling
    /// commits an edit in progress the way return does; no other tag is
    /// touched.
    pub fn set_enable_edit(&mut self, enabled: bool) {
        if self.config.enable_edit == enabled {
            return;
        }
        self.config.enable_edit = enabled;
        if !enabled && self.editor.session().is_some() {
            self.end_session(false);
        }
        self.layout();
    }

    pub fn max_tag_count(&self) -> usize {
        self.store.max_count()
    }

    /// Change the ceiling. Tags above a lowered ceiling are kept; only new
    /// adds are refused.
    pub fn set_max_tag_count(&mut self, max: usize) {
        self.config.max_tag_count = max;
        self.store.set_max_count(max);
        self.layout();
    }

    /// Move or resize the base container and lay out again.
    pub fn set_frame(&mut self, frame: Rect) {
        self.base_frame = frame;
        self.layout();
    }

    // =========================================================================
    // GESTURES
    // =========================================================================

    /// Hit-test a container-local point. The add control wins over tags;
    /// a tag hit starts its selection pulse.
    pub fn tap(&mut self, point: Point, now: Instant) -> bool {
        if self.add_button.is_some_and(|frame| frame.contains(point)) {
            return self.tap_add_button();
        }
        let hit = self
            .store
            .iter()
            .find(|tag| tag.frame.contains(point))
            .map(|tag| tag.id);
        match hit {
            Some(id) => {
                self.select(id, now);
                true
            }
            None => false,
        }
    }

    /// Create a new tag holding the bare prefix and focus it. An edit in
    /// progress is committed first.
    pub fn tap_add_button(&mut self) -> bool {
        if !self.config.enable_edit || !self.store.has_capacity() {
            return false;
        }
        if self.editor.session().is_some() {
            self.end_session(false);
        }

        let id = match self.editor.begin_create(&mut self.store, &self.config.tag_prefix) {
            Ok(id) => id,
            Err(err) => {
                debug!("tap_add_button: {err}");
                return false;
            }
        };
        self.refit(id);
        self.focus.focus(self.focus_control.as_mut(), id);
        self.layout();
        self.show_counter(id);
        true
    }

    /// A tag field gained focus.
    pub fn focus_tag(&mut self, id: TagId) -> bool {
        if !self.config.enable_edit || !self.store.contains(id) {
            return false;
        }
        if self.editor.is_editing(id) {
            return true;
        }
        if self.editor.session().is_some() {
            self.finish_edit(false);
        }
        if let Err(err) = self.editor.begin_edit(&self.store, id) {
            debug!("focus_tag: {err}");
            return false;
        }
        // The host already moved its focus here; only mirror it.
        self.focus.gained(id);
        self.show_counter(id);
        true
    }

    /// The host field for `id` now holds `text`. Settling and layout follow
    /// after the refit debounce.
    pub fn text_changed(&mut self, id: TagId, text: &str, now: Instant) -> bool {
        if !self.editor.is_editing(id) && !self.focus_tag(id) {
            return false;
        }
        match self
            .editor
            .text_changed(
                &mut self.store,
                &mut self.timers,
                id,
                text,
                &self.config.tag_prefix,
                now,
            )
        {
            Ok(()) => true,
            Err(err) => {
                debug!("text_changed: {err}");
                false
            }
        }
    }

    /// The host field for `id` lost focus: commit, or remove when blank.
    pub fn focus_lost(&mut self, id: TagId) -> bool {
        self.focus.lost(id);
        if !self.editor.is_editing(id) {
            return false;
        }
        self.finish_edit(false);
        true
    }

    /// Return key: commit, release focus and notify the host.
    pub fn return_pressed(&mut self) -> bool {
        if self.editor.session().is_none() {
            return false;
        }
        self.end_session(false);
        true
    }

    /// Escape: restore the text the edit started with, then end it.
    pub fn cancel_editing(&mut self) -> bool {
        if self.editor.session().is_none() {
            return false;
        }
        self.end_session(true);
        true
    }

    /// Fire every timer due at `now`. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.timers.take_due(now);
        let fired = due.len();
        for (handle, kind) in due {
            match kind {
                TimerKind::Refit(id) => {
                    let changes = self.editor.refit_due(
                        &mut self.store,
                        handle,
                        id,
                        &self.config.tag_prefix,
                        self.config.tag_max_characters,
                    );
                    self.apply_changes(id, changes);
                }
                TimerKind::PulseEnd(id) => self.end_pulse(handle, id),
            }
        }
        fired
    }

    /// Time until the next timer is due.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.timers.next_deadline(now)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn tags(&self) -> impl Iterator<Item = &Tag<D>> {
        self.store.iter()
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag<D>> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Container frame after the last layout pass.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// `None` while the add control is hidden.
    pub fn add_button_frame(&self) -> Option<Rect> {
        self.add_button
    }

    pub fn char_counter(&self) -> Option<&CharCounter> {
        self.counter.as_ref()
    }

    pub fn edit_phase(&self) -> EditPhase {
        self.editor.phase()
    }

    pub fn focused_tag(&self) -> Option<TagId> {
        self.focus.focused()
    }

    /// True while the tag's selection pulse is showing.
    pub fn is_selected(&self, id: TagId) -> bool {
        self.pulses.contains_key(&id)
    }

    pub fn config(&self) -> &TagViewConfig {
        &self.config
    }

    pub fn signals(&self) -> &TagViewSignals {
        &self.signals
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn add_button_visible(&self) -> bool {
        self.config.enable_edit && self.store.has_capacity()
    }

    /// Resize a tag's box to its current text, keeping its origin.
    fn refit(&mut self, id: TagId) {
        let Some(tag) = self.store.get_mut(id) else {
            return;
        };
        let size = self
            .sizer
            .box_for(&tag.text, &self.config.font, self.config.inner_margin);
        tag.frame = Rect::from_parts(tag.frame.origin(), size);
    }

    /// Full layout pass: place every tag and the add control, resize the
    /// container, publish signals.
    fn layout(&mut self) {
        let items: Vec<Size> = self.store.iter().map(|tag| tag.frame.size()).collect();
        let add_button = self
            .add_button_visible()
            .then_some(self.config.add_button_size);

        let flow = compute_flow(&FlowInput {
            items: &items,
            container: self.base_frame,
            outer_margin: self.config.outer_margin,
            add_button,
            auto_grow: self.config.auto_grow_height,
        });

        for (tag, frame) in self.store.iter_mut().zip(&flow.frames) {
            tag.frame = *frame;
            self.sink.place_tag(tag.id, *frame);
        }
        self.sink.place_add_button(flow.add_button);
        self.sink.resize_container(flow.container, flow.content_size);

        self.frame = flow.container;
        self.content_size = flow.content_size;
        self.add_button = flow.add_button;

        if let Some(id) = self.counter.as_ref().map(|c| c.tag) {
            self.show_counter(id);
        }

        self.signals.container.set(flow.container);
        self.signals.tag_count.set(self.store.len());
        self.signals
            .layout_pass
            .set(self.signals.layout_pass.get() + 1);

        if self.config.auto_grow_height {
            self.delegate.on_layout_changed();
        }
    }

    fn apply_changes(&mut self, id: TagId, changes: Changes) {
        if changes.contains(Changes::REFIT) {
            self.refit(id);
            if let Some(tag) = self.store.get(id) {
                self.sink.set_tag_text(id, &tag.text);
            }
        }
        if changes.contains(Changes::REMOVED) {
            self.pulses.remove(&id);
            self.sink.remove_tag(id);
        }
        if changes.contains(Changes::HIDE_COUNTER) {
            self.hide_counter();
        }
        if changes.contains(Changes::LAYOUT) {
            self.layout();
        }
        if changes.contains(Changes::SHOW_COUNTER) {
            self.show_counter(id);
        }
    }

    /// End the session without touching focus (focus already moved).
    fn finish_edit(&mut self, cancel: bool) -> EditOutcome {
        let prefix = &self.config.tag_prefix;
        let max = self.config.tag_max_characters;
        let outcome = if cancel {
            self.editor
                .cancel_edit(&mut self.store, &mut self.timers, prefix, max)
        } else {
            self.editor
                .end_edit(&mut self.store, &mut self.timers, prefix, max)
        };
        if let Some(id) = outcome.tag() {
            self.focus.lost(id);
            self.apply_changes(id, outcome.changes());
        }
        outcome
    }

    /// End the session from our side: release focus, finish, notify.
    fn end_session(&mut self, cancel: bool) {
        self.focus.blur(self.focus_control.as_mut());
        self.finish_edit(cancel);
        self.delegate.on_edit_session_ended();
    }

    fn show_counter(&mut self, id: TagId) {
        if !self.config.char_count_indicator {
            return;
        }
        let Some(tag) = self.store.get(id) else {
            self.hide_counter();
            return;
        };
        let counter = CharCounter::below(
            id,
            tag.frame,
            char_count(&tag.text),
            self.config.tag_max_characters,
        );
        self.sink.show_char_counter(Some(&counter));
        self.counter = Some(counter);
    }

    fn hide_counter(&mut self) {
        if self.counter.take().is_some() {
            self.sink.show_char_counter(None);
        }
    }

    /// Start (or restart) the selection pulse on `id`.
    fn select(&mut self, id: TagId, now: Instant) {
        if !self.config.selection_pulse {
            self.notify_tapped(id);
            return;
        }
        if let Some(previous) = self.pulses.remove(&id) {
            self.timers.cancel(previous);
        }
        self.sink.set_tag_color(id, self.config.tag_selected_color);
        let handle = self.timers.schedule(TimerKind::PulseEnd(id), now, TAP_PULSE);
        self.pulses.insert(id, handle);
    }

    fn end_pulse(&mut self, handle: TimerHandle, id: TagId) {
        if self.pulses.get(&id) != Some(&handle) {
            return;
        }
        self.pulses.remove(&id);
        if !self.store.contains(id) {
            debug!("pulse: {id} removed before revert");
            return;
        }
        self.sink.set_tag_color(id, self.config.tag_background_color);
        self.notify_tapped(id);
    }

    fn notify_tapped(&mut self, id: TagId) {
        if let Some(tag) = self.store.get(id) {
            self.delegate.on_tag_tapped(&tag.text, tag.user_data.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonospaceMeasure;
    use crate::types::Font;

    fn view() -> TagView {
        // 1 unit per cell, so "#ab" measures 3 × 1 and boxes to 8 × 6.
        TagView::new(
            Point::new(0.0, 0.0),
            Size::new(100.0, 20.0),
            &[TagViewOption::Font(Font::new("mono", 1.0))],
            MonospaceMeasure::cells(),
        )
    }

    #[test]
    fn test_empty_view_places_add_button() {
        let view = view();
        assert_eq!(view.add_button_frame(), Some(Rect::new(5.0, 5.0, 30.0, 30.0)));
        assert_eq!(view.frame().height, 40.0);
        assert_eq!(view.signals().layout_pass.get(), 1);
    }

    #[test]
    fn test_add_tag_refits_box() {
        let mut view = view();
        let id = view.add_tag("ab", None).unwrap();

        let tag = view.tag(id).unwrap();
        assert_eq!(tag.text, "#ab");
        assert_eq!(tag.frame, Rect::new(5.0, 5.0, 8.0, 6.0));
        assert_eq!(view.focused_tag(), None);
        assert_eq!(view.signals().tag_count.get(), 1);
    }

    #[test]
    fn test_blank_add_is_ignored() {
        let mut view = view();
        assert_eq!(view.add_tag("", None), None);
        assert_eq!(view.add_tag("#", None), None);
        assert!(view.is_empty());
    }

    #[test]
    fn test_tap_hits_add_button_before_tags() {
        let mut view = view();
        let now = Instant::now();

        assert!(view.tap(Point::new(6.0, 6.0), now));
        assert_eq!(view.edit_phase(), EditPhase::Creating);
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_tap_miss() {
        let mut view = view();
        view.set_enable_edit(false);
        assert!(!view.tap(Point::new(90.0, 90.0), Instant::now()));
    }

    #[test]
    fn test_counter_follows_focus() {
        let mut view = view();
        assert!(view.tap_add_button());
        let id = view.focused_tag().unwrap();

        let counter = view.char_counter().unwrap();
        assert_eq!(counter.tag, id);
        assert_eq!(counter.label(), "1 / 30");

        view.add_tag("other", None);
        assert!(view.char_counter().is_none());
    }

    #[test]
    fn test_counter_disabled() {
        let mut view: TagView = TagView::new(
            Point::new(0.0, 0.0),
            Size::new(100.0, 20.0),
            &[TagViewOption::CharCountIndicator(false)],
            MonospaceMeasure::cells(),
        );
        view.tap_add_button();
        assert!(view.char_counter().is_none());
    }
}
