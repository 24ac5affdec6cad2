//! Editing state machine for tag fields.
//!
//! ```text
//!            add requested                  text changed
//!   Idle ──────────────────▶ Creating ─────────────────────▶ Editing
//!    ▲                                                         │ ▲
//!    │        focus lost / return / escape                     │ │ text changed
//!    │   ┌─────────────────────────────────────────────────────┘ └─┘
//!    │   ▼
//!    │ Committing ── blank text ──▶ Removing ──┐
//!    │   │                                     │
//!    └───┴─────────────────────────────────────┘
//! ```
//!
//! The controller only touches tag text in the store and the refit timer.
//! Everything that needs the host (box refit, layout, focus, notifications,
//! the counter) is reported back as [`Changes`] for the view to carry out.

use std::time::Instant;

use log::debug;

use crate::engine::TagStore;
use crate::error::{Result, TagError};
use crate::layout::sizer::{is_blank, normalize, settle};
use crate::state::timers::{TimerHandle, TimerKind, Timers, REFIT_DEBOUNCE};
use crate::types::TagId;

// =============================================================================
// TYPES
// =============================================================================

bitflags::bitflags! {
    /// Follow-up work a transition asks the view to do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Changes: u8 {
        /// Re-measure the target tag's box.
        const REFIT = 1 << 0;
        /// Run a layout pass.
        const LAYOUT = 1 << 1;
        const SHOW_COUNTER = 1 << 2;
        const HIDE_COUNTER = 1 << 3;
        /// The target tag left the store.
        const REMOVED = 1 << 4;
    }
}

/// Phase of the editing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPhase {
    #[default]
    Idle,
    /// A tag was just added with the bare prefix and holds focus.
    Creating,
    /// The user is typing into a tag.
    Editing,
    /// End of edit: the final text is being evaluated.
    Committing,
    /// End of edit with blank text: the tag is being deleted.
    Removing,
}

/// The one active edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingSession {
    pub target: TagId,
    /// Text when the session began, restored on cancel.
    pub original_text: String,
}

/// How an edit session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text was settled and kept.
    Committed(TagId),
    /// Text was blank; the tag was deleted.
    Removed(TagId),
    /// The tag was already gone when the session ended.
    Vanished(TagId),
    /// There was no session to end.
    NoSession,
}

impl EditOutcome {
    pub fn tag(&self) -> Option<TagId> {
        match *self {
            Self::Committed(id) | Self::Removed(id) | Self::Vanished(id) => Some(id),
            Self::NoSession => None,
        }
    }

    /// Work the view must do after this outcome.
    pub fn changes(&self) -> Changes {
        match self {
            Self::Committed(_) => Changes::REFIT | Changes::LAYOUT | Changes::HIDE_COUNTER,
            Self::Removed(_) => Changes::REMOVED | Changes::LAYOUT | Changes::HIDE_COUNTER,
            Self::Vanished(_) => Changes::HIDE_COUNTER,
            Self::NoSession => Changes::empty(),
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Tracks the active tag field and drives its transitions.
#[derive(Debug, Default)]
pub struct EditingController {
    phase: EditPhase,
    session: Option<EditingSession>,
    refit_timer: Option<TimerHandle>,
}

impl EditingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&EditingSession> {
        self.session.as_ref()
    }

    pub fn target(&self) -> Option<TagId> {
        self.session.as_ref().map(|s| s.target)
    }

    pub fn is_editing(&self, id: TagId) -> bool {
        self.target() == Some(id)
    }

    /// `Idle → Creating`: add a tag holding only the prefix and open a
    /// session on it. Fails at capacity without touching the store.
    pub fn begin_create<D>(&mut self, store: &mut TagStore<D>, prefix: &str) -> Result<TagId> {
        let id = store.add(prefix, None)?;
        self.session = Some(EditingSession {
            target: id,
            original_text: prefix.to_string(),
        });
        self.phase = EditPhase::Creating;
        debug!("editing: creating {id}");
        Ok(id)
    }

    /// Open a session on an existing tag (its field gained focus). A session
    /// already on `id` is kept as is; one on another tag must be ended first.
    pub fn begin_edit<D>(&mut self, store: &TagStore<D>, id: TagId) -> Result<()> {
        if self.is_editing(id) {
            return Ok(());
        }
        if let Some(current) = self.target() {
            return Err(TagError::EditInProgress(current));
        }
        let tag = store.get(id).ok_or(TagError::InvalidReference(id))?;
        self.session = Some(EditingSession {
            target: id,
            original_text: tag.text.clone(),
        });
        self.phase = EditPhase::Editing;
        debug!("editing: begin {id}");
        Ok(())
    }

    /// `Creating/Editing → Editing`: store the prefixed text and restart the
    /// refit debounce. The pending refit, if any, is cancelled first. The
    /// character limit waits for the debounce.
    pub fn text_changed<D>(
        &mut self,
        store: &mut TagStore<D>,
        timers: &mut Timers,
        id: TagId,
        text: &str,
        prefix: &str,
        now: Instant,
    ) -> Result<()> {
        if !self.is_editing(id) {
            return Err(TagError::InvalidReference(id));
        }
        store.set_text(id, normalize(text, prefix))?;

        if let Some(stale) = self.refit_timer.take() {
            timers.cancel(stale);
        }
        self.refit_timer = Some(timers.schedule(TimerKind::Refit(id), now, REFIT_DEBOUNCE));
        self.phase = EditPhase::Editing;
        Ok(())
    }

    /// The refit debounce for `id` fired: settle the text (prefix, limit).
    pub fn refit_due<D>(
        &mut self,
        store: &mut TagStore<D>,
        handle: TimerHandle,
        id: TagId,
        prefix: &str,
        max_chars: usize,
    ) -> Changes {
        if self.refit_timer == Some(handle) {
            self.refit_timer = None;
        }
        let Some(tag) = store.get_mut(id) else {
            debug!("editing: refit for removed {id} ignored");
            return Changes::empty();
        };
        tag.text = settle(&tag.text, prefix, max_chars);

        let mut changes = Changes::REFIT | Changes::LAYOUT;
        if self.is_editing(id) {
            changes |= Changes::SHOW_COUNTER;
        }
        changes
    }

    /// `Editing → Committing → (Removing →) Idle`: evaluate the final text.
    pub fn end_edit<D>(
        &mut self,
        store: &mut TagStore<D>,
        timers: &mut Timers,
        prefix: &str,
        max_chars: usize,
    ) -> EditOutcome {
        let Some(session) = self.session.take() else {
            return EditOutcome::NoSession;
        };
        if let Some(pending) = self.refit_timer.take() {
            timers.cancel(pending);
        }

        let id = session.target;
        self.phase = EditPhase::Committing;

        let blank = store.get(id).map(|tag| is_blank(&tag.text, prefix));
        let outcome = match blank {
            None => EditOutcome::Vanished(id),
            Some(true) => {
                self.phase = EditPhase::Removing;
                store.remove(id);
                timers.cancel_for(id);
                EditOutcome::Removed(id)
            }
            Some(false) => {
                if let Some(tag) = store.get_mut(id) {
                    tag.text = settle(&tag.text, prefix, max_chars);
                }
                EditOutcome::Committed(id)
            }
        };

        self.phase = EditPhase::Idle;
        debug!("editing: ended with {outcome:?}");
        outcome
    }

    /// Escape: restore the text the session started with, then end it. A
    /// cancelled creation is therefore removed.
    pub fn cancel_edit<D>(
        &mut self,
        store: &mut TagStore<D>,
        timers: &mut Timers,
        prefix: &str,
        max_chars: usize,
    ) -> EditOutcome {
        if let Some(session) = &self.session {
            // The tag may already be gone; end_edit reports that.
            let _ = store.set_text(session.target, session.original_text.clone());
        }
        self.end_edit(store, timers, prefix, max_chars)
    }

    /// Drop the session without evaluating it (the tag was removed from
    /// outside, or everything was cleared).
    pub fn abandon(&mut self, timers: &mut Timers) {
        if let Some(pending) = self.refit_timer.take() {
            timers.cancel(pending);
        }
        self.session = None;
        self.phase = EditPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn setup() -> (EditingController, TagStore, Timers) {
        (EditingController::new(), TagStore::new(3), Timers::new())
    }

    #[test]
    fn test_create_opens_session() {
        let (mut editor, mut store, _) = setup();

        let id = editor.begin_create(&mut store, "#").unwrap();
        assert_eq!(editor.phase(), EditPhase::Creating);
        assert_eq!(editor.target(), Some(id));
        assert_eq!(store.get(id).unwrap().text, "#");
    }

    #[test]
    fn test_create_at_capacity() {
        let (mut editor, _, _) = setup();
        let mut store: TagStore = TagStore::new(0);

        let err = editor.begin_create(&mut store, "#").unwrap_err();
        assert_eq!(err, TagError::CapacityExceeded { max: 0 });
        assert_eq!(editor.phase(), EditPhase::Idle);
        assert!(editor.session().is_none());
    }

    #[test]
    fn test_keystrokes_debounce_to_one_timer() {
        let (mut editor, mut store, mut timers) = setup();
        let t0 = Instant::now();
        let id = editor.begin_create(&mut store, "#").unwrap();

        for (i, text) in ["#a", "#ab", "#abc"].iter().enumerate() {
            let now = t0 + Duration::from_millis(i as u64 * 10);
            editor
                .text_changed(&mut store, &mut timers, id, text, "#", now)
                .unwrap();
        }
        assert_eq!(timers.len(), 1);
        assert_eq!(editor.phase(), EditPhase::Editing);

        // Only the last keystroke's deadline counts.
        assert!(timers.take_due(t0 + Duration::from_millis(55)).is_empty());
        let fired = timers.take_due(t0 + Duration::from_millis(70));
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn test_refit_truncates_including_prefix() {
        let (mut editor, mut store, mut timers) = setup();
        let t0 = Instant::now();
        let id = editor.begin_create(&mut store, "#").unwrap();

        editor
            .text_changed(&mut store, &mut timers, id, "#abcdefgh", "#", t0)
            .unwrap();
        let (handle, kind) = timers.take_due(t0 + REFIT_DEBOUNCE)[0];
        assert_eq!(kind, TimerKind::Refit(id));

        let changes = editor.refit_due(&mut store, handle, id, "#", 5);
        assert_eq!(store.get(id).unwrap().text, "#abcd");
        assert!(changes.contains(Changes::REFIT | Changes::LAYOUT | Changes::SHOW_COUNTER));
    }

    #[test]
    fn test_refit_for_removed_tag_is_noop() {
        let (mut editor, mut store, mut timers) = setup();
        let t0 = Instant::now();
        let id = editor.begin_create(&mut store, "#").unwrap();
        editor.text_changed(&mut store, &mut timers, id, "#x", "#", t0).unwrap();
        let (handle, _) = timers.take_due(t0 + REFIT_DEBOUNCE)[0];

        store.remove(id);
        assert_eq!(editor.refit_due(&mut store, handle, id, "#", 30), Changes::empty());
    }

    #[test]
    fn test_text_changed_without_session() {
        let (mut editor, mut store, mut timers) = setup();
        let id = store.add("#a", None).unwrap();

        let result = editor.text_changed(&mut store, &mut timers, id, "#b", "#", Instant::now());
        assert_eq!(result, Err(TagError::InvalidReference(id)));
        assert_eq!(store.get(id).unwrap().text, "#a");
    }

    #[test]
    fn test_end_edit_commits_and_normalizes() {
        let (mut editor, mut store, mut timers) = setup();
        let id = store.add("#a", None).unwrap();
        editor.begin_edit(&store, id).unwrap();
        editor
            .text_changed(&mut store, &mut timers, id, "hello", "#", Instant::now())
            .unwrap();

        let outcome = editor.end_edit(&mut store, &mut timers, "#", 30);
        assert_eq!(outcome, EditOutcome::Committed(id));
        assert_eq!(store.get(id).unwrap().text, "#hello");
        assert_eq!(editor.phase(), EditPhase::Idle);
        // Pending refit cancelled
        assert!(timers.is_empty());
    }

    #[test]
    fn test_end_edit_removes_blank() {
        for blank in ["", "#"] {
            let (mut editor, mut store, mut timers) = setup();
            let id = store.add("#tag", None).unwrap();
            editor.begin_edit(&store, id).unwrap();
            editor
                .text_changed(&mut store, &mut timers, id, blank, "#", Instant::now())
                .unwrap();

            let outcome = editor.end_edit(&mut store, &mut timers, "#", 30);
            assert_eq!(outcome, EditOutcome::Removed(id));
            assert!(outcome.changes().contains(Changes::REMOVED));
            assert!(!store.contains(id));
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_cancel_creation_removes() {
        let (mut editor, mut store, mut timers) = setup();
        let t0 = Instant::now();
        let id = editor.begin_create(&mut store, "#").unwrap();
        editor.text_changed(&mut store, &mut timers, id, "#abc", "#", t0).unwrap();

        let outcome = editor.cancel_edit(&mut store, &mut timers, "#", 30);
        assert_eq!(outcome, EditOutcome::Removed(id));
    }

    #[test]
    fn test_cancel_edit_restores_text() {
        let (mut editor, mut store, mut timers) = setup();
        let id = store.add("#keep", None).unwrap();
        editor.begin_edit(&store, id).unwrap();
        editor
            .text_changed(&mut store, &mut timers, id, "", "#", Instant::now())
            .unwrap();

        let outcome = editor.cancel_edit(&mut store, &mut timers, "#", 30);
        assert_eq!(outcome, EditOutcome::Committed(id));
        assert_eq!(store.get(id).unwrap().text, "#keep");
    }

    #[test]
    fn test_end_without_session() {
        let (mut editor, mut store, mut timers) = setup();
        let outcome = editor.end_edit(&mut store, &mut timers, "#", 30);
        assert_eq!(outcome, EditOutcome::NoSession);
        assert!(outcome.changes().is_empty());
    }

    #[test]
    fn test_end_after_external_removal() {
        let (mut editor, mut store, mut timers) = setup();
        let id = editor.begin_create(&mut store, "#").unwrap();
        store.remove(id);

        let outcome = editor.end_edit(&mut store, &mut timers, "#", 30);
        assert_eq!(outcome, EditOutcome::Vanished(id));
    }

    #[test]
    fn test_abandon() {
        let (mut editor, mut store, mut timers) = setup();
        let id = editor.begin_create(&mut store, "#").unwrap();
        editor
            .text_changed(&mut store, &mut timers, id, "#a", "#", Instant::now())
            .unwrap();

        editor.abandon(&mut timers);
        assert!(editor.session().is_none());
        assert!(timers.is_empty());
        assert_eq!(editor.phase(), EditPhase::Idle);
    }

    #[test]
    fn test_keystroke_stores_prefixed_text() {
        let (mut editor, mut store, mut timers) = setup();
        let id = editor.begin_create(&mut store, "#").unwrap();

        editor
            .text_changed(&mut store, &mut timers, id, "hello", "#", Instant::now())
            .unwrap();
        assert_eq!(store.get(id).unwrap().text, "#hello");

        // Cleared field stays empty so it can be deleted on commit
        editor
            .text_changed(&mut store, &mut timers, id, "", "#", Instant::now())
            .unwrap();
        assert_eq!(store.get(id).unwrap().text, "");
    }

    #[test]
    fn test_begin_edit_while_other_session_open() {
        let (mut editor, mut store, _) = setup();
        let other = store.add("#other", None).unwrap();
        let id = editor.begin_create(&mut store, "#").unwrap();

        let err = editor.begin_edit(&store, other).unwrap_err();
        assert_eq!(err, TagError::EditInProgress(id));
        assert_eq!(editor.target(), Some(id));
        assert_eq!(editor.phase(), EditPhase::Creating);

        // Re-entering the open session is fine
        assert!(editor.begin_edit(&store, id).is_ok());
    }
}
