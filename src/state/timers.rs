//! Deferred work for the tag view.
//!
//! This is the only place where timing enters the widget. Timers are plain
//! deadlines; nothing runs on another thread. The host calls
//! [`TagView::tick`](crate::TagView::tick) with the current time and may
//! sleep until [`Timers::next_deadline`] in between.
//!
//! Every timer is fire-once and cancelable. Rescheduling a debounce always
//! cancels the previous handle first, so a stale refit can never land on a
//! field that has since been removed or reused.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::types::TagId;

/// Quiet period after a keystroke before the tag is refit and laid out.
pub const REFIT_DEBOUNCE: Duration = Duration::from_millis(50);

/// How long a tapped tag shows its selected color.
pub const TAP_PULSE: Duration = Duration::from_millis(50);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Settle and refit the edited tag, then lay out.
    Refit(TagId),
    /// Revert a tapped tag's color and notify the host.
    PulseEnd(TagId),
}

impl TimerKind {
    pub fn tag(&self) -> TagId {
        match *self {
            Self::Refit(id) | Self::PulseEnd(id) => id,
        }
    }
}

/// Handle to a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Instant,
    kind: TimerKind,
}

/// Pending fire-once timers.
#[derive(Debug, Default)]
pub struct Timers {
    next_handle: u64,
    pending: BTreeMap<TimerHandle, Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `delay` after `now`.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.insert(
            handle,
            Pending {
                deadline: now + delay,
                kind,
            },
        );
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Cancel every timer that targets `id`.
    pub fn cancel_for(&mut self, id: TagId) {
        self.pending.retain(|_, p| p.kind.tag() != id);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every timer due at `now`, earliest deadline first.
    /// Ties fire in scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerHandle, TimerKind)> {
        let mut due: Vec<(TimerHandle, Pending)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(&h, &p)| (h, p))
            .collect();
        due.sort_by_key(|(h, p)| (p.deadline, *h));

        for (handle, _) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(h, p)| (h, p.kind)).collect()
    }

    /// Time until the earliest pending deadline. `Some(ZERO)` if already due.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending
            .values()
            .map(|p| p.deadline.saturating_duration_since(now))
            .min()
    }
}
