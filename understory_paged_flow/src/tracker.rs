// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current-page tracking on settle and the auto-advance timer.

use core::time::Duration;

use crate::window::floor_index;

/// Handle to a scheduled auto-advance.
///
/// Handles are generational: once a task is cancelled or replaced its handle
/// never compares equal to a later one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskId(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    id: TaskId,
    /// `None` until the next [`AdvanceTimer::poll`] anchors the task.
    due: Option<Duration>,
}

/// One-shot timer that owns at most one outstanding auto-advance task.
///
/// Time is supplied by the host as a monotonic [`Duration`] since an arbitrary
/// epoch. A task scheduled with a known time ([`AdvanceTimer::start_at`],
/// [`AdvanceTimer::schedule_at`]) is due one interval after it. A task
/// scheduled without one ([`AdvanceTimer::start`], [`AdvanceTimer::schedule`])
/// is armed, and becomes due one interval after the next
/// [`AdvanceTimer::poll`].
#[derive(Clone, Debug, Default)]
pub struct AdvanceTimer {
    interval: Duration,
    running: bool,
    now: Duration,
    pending: Option<Pending>,
    generation: u32,
}

impl AdvanceTimer {
    /// Creates a stopped timer with the given interval. [`Duration::ZERO`] disables it.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Delay between advances.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the interval. Setting [`Duration::ZERO`] stops the timer.
    ///
    /// An outstanding task keeps its due time; the new interval applies from
    /// the next reschedule.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        if interval.is_zero() {
            self.stop();
        }
    }

    /// Returns `true` while the advance loop is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Most recent time observed.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Starts the loop and arms the first advance, anchored at the next poll.
    ///
    /// Returns `None` and stays stopped if the interval is zero.
    pub fn start(&mut self) -> Option<TaskId> {
        if self.interval.is_zero() {
            return None;
        }
        self.running = true;
        self.schedule()
    }

    /// Starts the loop at `now`; the first advance is due one interval later.
    ///
    /// Returns `None` and stays stopped if the interval is zero.
    pub fn start_at(&mut self, now: Duration) -> Option<TaskId> {
        if self.interval.is_zero() {
            return None;
        }
        self.running = true;
        self.schedule_at(now)
    }

    /// Stops the loop and cancels any outstanding task.
    pub fn stop(&mut self) {
        self.running = false;
        self.cancel();
    }

    /// Arms an advance one interval after the next poll, replacing any
    /// outstanding one.
    ///
    /// Does nothing while the loop is stopped.
    pub fn schedule(&mut self) -> Option<TaskId> {
        self.replace_pending(None)
    }

    /// Schedules an advance one interval after `now`, replacing any
    /// outstanding one.
    ///
    /// Does nothing while the loop is stopped.
    pub fn schedule_at(&mut self, now: Duration) -> Option<TaskId> {
        self.observe(now);
        self.replace_pending(Some(self.now.saturating_add(self.interval)))
    }

    fn replace_pending(&mut self, due: Option<Duration>) -> Option<TaskId> {
        if !self.running || self.interval.is_zero() {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        let id = TaskId(self.generation);
        self.pending = Some(Pending { id, due });
        Some(id)
    }

    /// Cancels the outstanding task, returning its handle.
    ///
    /// Safe to call when nothing is scheduled or the task already fired.
    pub fn cancel(&mut self) -> Option<TaskId> {
        self.pending.take().map(|pending| pending.id)
    }

    /// Handle of the outstanding task, if any.
    #[must_use]
    pub fn pending(&self) -> Option<TaskId> {
        self.pending.map(|pending| pending.id)
    }

    /// Due time of the outstanding task.
    ///
    /// `None` if nothing is scheduled, or if the task is armed but not yet
    /// anchored by a poll.
    #[must_use]
    pub fn due(&self) -> Option<Duration> {
        self.pending.and_then(|pending| pending.due)
    }

    /// Advances the clock to `now` and takes the outstanding task if it is due.
    ///
    /// An armed task is anchored at `now` instead of firing. Time never moves
    /// backwards; an earlier `now` is ignored.
    pub fn poll(&mut self, now: Duration) -> Option<TaskId> {
        self.observe(now);
        let pending = self.pending.as_mut()?;
        match pending.due {
            None => {
                pending.due = Some(self.now.saturating_add(self.interval));
                None
            }
            Some(due) if due <= self.now => {
                let id = pending.id;
                self.pending = None;
                Some(id)
            }
            Some(_) => None,
        }
    }

    fn observe(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

/// Page index the scroll position rests on, given pages `page_extent` long.
///
/// Offsets before the first page map to `0`, and a degenerate extent (zero,
/// negative, or not finite) also yields `0`. The result is clamped to the last
/// of `count` pages.
#[must_use]
pub fn settled_index(offset: f64, page_extent: f64, count: usize) -> usize {
    if !(page_extent > 0.0 && page_extent.is_finite()) {
        return 0;
    }
    floor_index(offset.max(0.0) / page_extent).min(count.saturating_sub(1))
}

/// Tracks the page the flow is settled on and owns the auto-advance timer.
#[derive(Clone, Debug, Default)]
pub struct PageTracker {
    current: usize,
    timer: AdvanceTimer,
}

impl PageTracker {
    /// Creates a tracker settled on page `0`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            current: 0,
            timer: AdvanceTimer::new(interval),
        }
    }

    /// Page the flow is settled on.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Moves back to page `0` without notifying anyone.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// The auto-advance timer.
    #[must_use]
    pub const fn timer(&self) -> &AdvanceTimer {
        &self.timer
    }

    /// Mutable access to the auto-advance timer.
    pub fn timer_mut(&mut self) -> &mut AdvanceTimer {
        &mut self.timer
    }

    /// Settles on the page under `offset`.
    ///
    /// Returns the new index if it differs from the previous one. A change
    /// re-arms the auto-advance countdown while the loop is running, so manual
    /// navigation postpones the next advance by a full interval.
    pub fn settle(&mut self, offset: f64, page_extent: f64, count: usize) -> Option<usize> {
        let index = settled_index(offset, page_extent, count);
        if index == self.current {
            return None;
        }
        self.current = index;
        self.timer.schedule();
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{AdvanceTimer, PageTracker, settled_index};

    const SECS_3: Duration = Duration::from_secs(3);

    #[test]
    fn settled_index_floors_and_clamps() {
        assert_eq!(settled_index(250.0, 100.0, 8), 2);
        assert_eq!(settled_index(299.9, 100.0, 8), 2);
        assert_eq!(settled_index(300.0, 100.0, 8), 3);
        assert_eq!(settled_index(-40.0, 100.0, 8), 0);
        assert_eq!(settled_index(5_000.0, 100.0, 8), 7);
        assert_eq!(settled_index(120.0, 0.0, 8), 0);
        assert_eq!(settled_index(f64::NAN, 100.0, 8), 0);
        assert_eq!(settled_index(120.0, 100.0, 0), 0);
    }

    #[test]
    fn settle_reports_changes_only() {
        let mut tracker = PageTracker::new(Duration::ZERO);
        assert_eq!(tracker.settle(20.0, 100.0, 4), None);
        assert_eq!(tracker.settle(200.0, 100.0, 4), Some(2));
        assert_eq!(tracker.settle(210.0, 100.0, 4), None);
        assert_eq!(tracker.current(), 2);
        tracker.reset();
        assert_eq!(tracker.current(), 0);
    }

    #[test]
    fn timer_fires_once_when_due() {
        let mut timer = AdvanceTimer::new(SECS_3);
        let id = timer.start_at(Duration::from_secs(100)).unwrap();
        assert_eq!(timer.due(), Some(Duration::from_secs(103)));
        assert_eq!(timer.poll(Duration::from_secs(100)), None);
        assert_eq!(timer.poll(Duration::from_secs(102)), None);
        assert_eq!(timer.poll(Duration::from_secs(103)), Some(id));
        assert_eq!(timer.poll(Duration::from_secs(110)), None);
        assert!(timer.is_running());
    }

    #[test]
    fn armed_task_counts_from_the_next_poll() {
        let mut timer = AdvanceTimer::new(SECS_3);
        // The host clock is already well past zero.
        assert_eq!(timer.poll(Duration::from_secs(40)), None);
        let id = timer.start().unwrap();
        assert_eq!(timer.pending(), Some(id));
        assert_eq!(timer.due(), None);

        assert_eq!(timer.poll(Duration::from_secs(100)), None);
        assert_eq!(timer.due(), Some(Duration::from_secs(103)));
        assert_eq!(timer.poll(Duration::from_secs(102)), None);
        assert_eq!(timer.poll(Duration::from_secs(103)), Some(id));
    }

    #[test]
    fn cancel_is_idempotent_and_stale_handles_never_fire() {
        let mut timer = AdvanceTimer::new(SECS_3);
        assert_eq!(timer.cancel(), None);
        let first = timer.start_at(Duration::ZERO).unwrap();
        assert_eq!(timer.cancel(), Some(first));
        assert_eq!(timer.cancel(), None);
        assert_eq!(timer.poll(Duration::from_secs(60)), None);

        let second = timer.schedule().unwrap();
        assert_ne!(first, second);
        assert_eq!(timer.poll(Duration::from_secs(60)), None);
        assert_eq!(timer.due(), Some(Duration::from_secs(63)));
    }

    #[test]
    fn rescheduling_replaces_the_outstanding_task() {
        let mut timer = AdvanceTimer::new(SECS_3);
        timer.start_at(Duration::ZERO);
        let replacement = timer.schedule_at(Duration::from_secs(2)).unwrap();
        assert_eq!(timer.pending(), Some(replacement));
        assert_eq!(timer.poll(SECS_3), None);
        assert_eq!(timer.poll(Duration::from_secs(5)), Some(replacement));
    }

    #[test]
    fn zero_interval_never_schedules() {
        let mut timer = AdvanceTimer::new(Duration::ZERO);
        assert_eq!(timer.start(), None);
        assert_eq!(timer.start_at(Duration::from_secs(1)), None);
        assert!(!timer.is_running());

        let mut timer = AdvanceTimer::new(SECS_3);
        timer.start();
        timer.set_interval(Duration::ZERO);
        assert!(!timer.is_running());
        assert_eq!(timer.pending(), None);
    }

    #[test]
    fn settle_rearms_a_running_timer() {
        let mut tracker = PageTracker::new(SECS_3);
        tracker.timer_mut().start_at(Duration::ZERO);
        tracker.timer_mut().poll(Duration::from_secs(2));
        assert_eq!(tracker.settle(100.0, 100.0, 4), Some(1));
        assert!(tracker.timer().pending().is_some());
        tracker.timer_mut().poll(Duration::from_secs(2));
        assert_eq!(tracker.timer().due(), Some(Duration::from_secs(5)));
        // No change, no re-arm.
        tracker.timer_mut().poll(Duration::from_secs(4));
        assert_eq!(tracker.settle(100.0, 100.0, 4), None);
        assert_eq!(tracker.timer().due(), Some(Duration::from_secs(5)));
    }
}
