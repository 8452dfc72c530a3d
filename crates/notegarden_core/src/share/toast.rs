//! Self-dismissing notifications.

use std::cell::Cell;
use std::rc::Rc;

/// Default visible lifetime of a notification.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 2_000;

/// Millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Hand-driven clock; clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// One visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at_ms: i64,
}

/// Holds the single visible notification and expires it.
#[derive(Debug, Clone)]
pub struct Toaster {
    duration_ms: u64,
    active: Option<Toast>,
    next_id: u64,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION_MS)
    }
}

impl Toaster {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            active: None,
            next_id: 1,
        }
    }

    /// Shows `message`, replacing any visible notification.
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>, now_ms: i64) -> &Toast {
        let duration = i64::try_from(self.duration_ms).unwrap_or(i64::MAX);
        let toast = Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            expires_at_ms: now_ms.saturating_add(duration),
        };
        self.next_id += 1;
        self.active.insert(toast)
    }

    pub fn active(&self) -> Option<&Toast> {
        self.active.as_ref()
    }

    /// Total notifications shown so far.
    pub fn shown_count(&self) -> u64 {
        self.next_id - 1
    }

    /// Dismisses the visible notification once it has expired.
    pub fn tick(&mut self, now_ms: i64) -> Option<Toast> {
        if self
            .active
            .as_ref()
            .is_some_and(|toast| now_ms >= toast.expires_at_ms)
        {
            return self.active.take();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, ToastKind, Toaster};

    #[test]
    fn toast_expires_after_duration() {
        let clock = ManualClock::new(1_000);
        let mut toaster = Toaster::new(500);
        toaster.show(ToastKind::Success, "done", clock.now_ms());

        clock.advance(499);
        assert!(toaster.tick(clock.now_ms()).is_none());
        clock.advance(1);
        let dismissed = toaster.tick(clock.now_ms()).expect("toast should expire");
        assert_eq!(dismissed.message, "done");
        assert!(toaster.active().is_none());
    }

    #[test]
    fn newer_toast_replaces_older() {
        let mut toaster = Toaster::default();
        toaster.show(ToastKind::Success, "first", 0);
        toaster.show(ToastKind::Failure, "second", 10);
        let active = toaster.active().expect("toast visible");
        assert_eq!(active.message, "second");
        assert_eq!(active.id, 2);
        assert_eq!(toaster.shown_count(), 2);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(0);
        let handle = clock.clone();
        handle.advance(25);
        assert_eq!(clock.now_ms(), 25);
    }
}
