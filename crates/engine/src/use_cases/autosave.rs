//! Debounced autosave as an explicit state machine.
//!
//! Holds no timers: the caller passes `now` in and polls [`Autosave::is_due`].

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    /// Nothing edited since the session started
    Idle,
    PendingWrite {
        due_at: DateTime<Utc>,
    },
    Writing,
    /// Last write succeeded and nothing changed since
    Settled,
}

/// What the sheet shows next to the save indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Failed,
}

#[derive(Debug, Clone)]
pub struct Autosave {
    window: Duration,
    state: AutosaveState,
    last_failed: bool,
    /// An edit landed while a write was in flight
    dirty_during_write: bool,
}

impl Autosave {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: AutosaveState::Idle,
            last_failed: false,
            dirty_during_write: false,
        }
    }

    pub fn state(&self) -> AutosaveState {
        self.state
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn status(&self) -> SaveStatus {
        match self.state {
            AutosaveState::Writing => SaveStatus::Saving,
            _ if self.last_failed => SaveStatus::Failed,
            AutosaveState::Settled => SaveStatus::Saved,
            AutosaveState::Idle | AutosaveState::PendingWrite { .. } => SaveStatus::Idle,
        }
    }

    /// Record an edit. Restarts the debounce window.
    pub fn note_edit(&mut self, now: DateTime<Utc>) {
        match self.state {
            AutosaveState::Writing => self.dirty_during_write = true,
            _ => {
                self.state = AutosaveState::PendingWrite {
                    due_at: self.due_after(now),
                }
            }
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        matches!(self.state, AutosaveState::PendingWrite { due_at } if now >= due_at)
    }

    /// Whether a write is waiting, due or not
    pub fn is_pending(&self) -> bool {
        matches!(self.state, AutosaveState::PendingWrite { .. })
    }

    /// Returns false (and changes nothing) unless a write was pending.
    pub fn begin_write(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = AutosaveState::Writing;
        self.dirty_during_write = false;
        true
    }

    pub fn finish_write(&mut self, ok: bool, now: DateTime<Utc>) {
        let rewrite = std::mem::take(&mut self.dirty_during_write);
        self.last_failed = !ok;
        self.state = if ok && !rewrite {
            AutosaveState::Settled
        } else {
            AutosaveState::PendingWrite {
                due_at: self.due_after(now),
            }
        };
    }

    /// Saturates at the latest representable instant
    fn due_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    #[test]
    fn starts_idle_and_not_due() {
        let autosave = Autosave::new(ms(1000));
        assert_eq!(autosave.state(), AutosaveState::Idle);
        assert_eq!(autosave.status(), SaveStatus::Idle);
        assert!(!autosave.is_due(t0() + ms(10_000)));
    }

    #[test]
    fn edit_becomes_due_after_window() {
        let mut autosave = Autosave::new(ms(1000));
        autosave.note_edit(t0());
        assert!(!autosave.is_due(t0() + ms(999)));
        assert!(autosave.is_due(t0() + ms(1000)));
    }

    #[test]
    fn later_edit_supersedes_schedule() {
        let mut autosave = Autosave::new(ms(1000));
        autosave.note_edit(t0());
        autosave.note_edit(t0() + ms(800));
        assert!(!autosave.is_due(t0() + ms(1000)));
        assert!(autosave.is_due(t0() + ms(1800)));
    }

    #[test]
    fn successful_write_settles() {
        let mut autosave = Autosave::new(ms(1000));
        autosave.note_edit(t0());
        assert!(autosave.begin_write());
        assert_eq!(autosave.status(), SaveStatus::Saving);
        autosave.finish_write(true, t0() + ms(1100));
        assert_eq!(autosave.state(), AutosaveState::Settled);
        assert_eq!(autosave.status(), SaveStatus::Saved);
    }

    #[test]
    fn begin_write_without_pending_edit_is_refused() {
        let mut autosave = Autosave::new(ms(1000));
        assert!(!autosave.begin_write());
        assert_eq!(autosave.state(), AutosaveState::Idle);
    }

    #[test]
    fn failed_write_retries_next_cycle() {
        let mut autosave = Autosave::new(ms(1000));
        autosave.note_edit(t0());
        autosave.begin_write();
        autosave.finish_write(false, t0() + ms(1000));

        assert_eq!(autosave.status(), SaveStatus::Failed);
        assert!(!autosave.is_due(t0() + ms(1500)));
        assert!(autosave.is_due(t0() + ms(2000)));

        autosave.begin_write();
        autosave.finish_write(true, t0() + ms(2000));
        assert_eq!(autosave.status(), SaveStatus::Saved);
    }

    #[test]
    fn edit_during_write_schedules_another() {
        let mut autosave = Autosave::new(ms(1000));
        autosave.note_edit(t0());
        autosave.begin_write();
        autosave.note_edit(t0() + ms(1050));
        assert_eq!(autosave.state(), AutosaveState::Writing);

        autosave.finish_write(true, t0() + ms(1100));
        assert_eq!(
            autosave.state(),
            AutosaveState::PendingWrite {
                due_at: t0() + ms(2100)
            }
        );
    }

    #[test]
    fn huge_window_saturates_instead_of_overflowing() {
        let mut autosave = Autosave::new(Duration::days(365 * 1_000_000));
        autosave.note_edit(t0());
        assert_eq!(
            autosave.state(),
            AutosaveState::PendingWrite {
                due_at: DateTime::<Utc>::MAX_UTC
            }
        );
        assert!(!autosave.is_due(t0() + ms(86_400_000)));

        autosave.begin_write();
        autosave.finish_write(false, t0());
        assert!(autosave.is_pending());
    }
}
