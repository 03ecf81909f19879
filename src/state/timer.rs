//! Fire-once timers owned by a screen.
//!
//! Screens schedule delayed actions (auto-advance after a win, showing the
//! congratulations). When a screen is torn down its timers are cancelled so
//! nothing fires against a screen that is no longer active.

use chrono::{DateTime, Duration, Utc};

use super::screen::ScreenState;

/// Timer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What to do when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Advance the sequencer past the owning screen
    Advance,
}

/// A pending timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub id: TimerId,
    pub owner: ScreenState,
    pub action: TimerAction,
    pub fires_at: DateTime<Utc>,
}

/// Pending timers.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<ScheduledTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay` after `now`.
    pub fn schedule(
        &mut self,
        owner: ScreenState,
        action: TimerAction,
        delay: Duration,
        now: DateTime<Utc>,
    ) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(ScheduledTimer {
            id,
            owner,
            action,
            fires_at: now + delay,
        });
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel every timer owned by `screen`. Returns how many were dropped.
    pub fn cancel_owned_by(&mut self, screen: ScreenState) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.owner != screen);
        before - self.pending.len()
    }

    /// Remove and return timers due at `now`, earliest first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<ScheduledTimer> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|t| t.fires_at <= now);
        self.pending = pending;
        due.sort_by_key(|t| (t.fires_at, t.id));
        due
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.iter().map(|t| t.fires_at).min()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fires_once_when_due() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(
            ScreenState::Wordle,
            TimerAction::Advance,
            Duration::milliseconds(2500),
            t0(),
        );

        assert!(timers.take_due(t0() + Duration::milliseconds(2499)).is_empty());

        let due = timers.take_due(t0() + Duration::milliseconds(2500));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, id);

        assert!(timers.take_due(t0() + Duration::seconds(10)).is_empty());
        assert!(!timers.cancel(id));
    }

    #[test]
    fn test_due_in_deadline_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(ScreenState::Rps, TimerAction::Advance, Duration::seconds(3), t0());
        let early = timers.schedule(ScreenState::Rps, TimerAction::Advance, Duration::seconds(1), t0());

        assert_eq!(timers.next_deadline(), Some(t0() + Duration::seconds(1)));
        let ids: Vec<TimerId> = timers
            .take_due(t0() + Duration::seconds(5))
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![early, late]);
    }

    #[test]
    fn test_cancel_owned_by_screen() {
        let mut timers = TimerQueue::new();
        timers.schedule(ScreenState::GuessNumber, TimerAction::Advance, Duration::seconds(1), t0());
        timers.schedule(ScreenState::GuessNumber, TimerAction::Advance, Duration::seconds(2), t0());
        let kept = timers.schedule(ScreenState::Password, TimerAction::Advance, Duration::seconds(1), t0());

        assert_eq!(timers.cancel_owned_by(ScreenState::GuessNumber), 2);
        assert_eq!(timers.len(), 1);
        assert!(timers.cancel(kept));
        assert!(timers.is_empty());
    }
}
