//! Focus tracking for tag fields.
//!
//! At most one tag field holds input focus. The engine records which one and
//! forwards every change to the host's [`FocusControl`], which does the
//! actual keyboard/responder work.

use log::trace;

use crate::host::FocusControl;
use crate::types::TagId;

/// Which tag field, if any, holds input focus.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<TagId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<TagId> {
        self.focused
    }

    pub fn is_focused(&self, id: TagId) -> bool {
        self.focused == Some(id)
    }

    /// Focus `id`, asking the host to move focus. Releases the previous field
    /// first.
    pub fn focus(&mut self, host: &mut dyn FocusControl, id: TagId) {
        if self.focused == Some(id) {
            return;
        }
        if let Some(prev) = self.focused.take() {
            host.release_focus(prev);
        }
        trace!("focus: {id}");
        self.focused = Some(id);
        host.request_focus(id);
    }

    /// Record that the host moved focus to `id` by itself.
    pub fn gained(&mut self, id: TagId) {
        self.focused = Some(id);
    }

    /// Release focus from whichever field holds it.
    pub fn blur(&mut self, host: &mut dyn FocusControl) {
        if let Some(prev) = self.focused.take() {
            trace!("focus: released {prev}");
            host.release_focus(prev);
        }
    }

    /// Forget focus without telling the host (the host reported the loss).
    pub fn lost(&mut self, id: TagId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }
}
