// SPDX-License-Identifier: MPL-2.0
//! Virtual-clock timer queue driving every delayed step of the curtain.
//!
//! The timeline never reads the wall clock. The host advances it (from a
//! periodic tick in the application, or directly in tests), and due timers are
//! handed back one at a time in firing order.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Shortest period a repeating timer may use.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<E> {
    event: E,
    period: Option<Duration>,
}

/// Ordered queue of pending timers keyed by `(due, id)`.
#[derive(Debug, Clone)]
pub struct Timeline<E> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), Entry<E>>,
    due_by_id: HashMap<TimerId, Duration>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }
}

impl<E: Clone> Timeline<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position of the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `event` to fire once, `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        self.insert(self.now + delay, event, None)
    }

    /// Schedules `event` to fire every `period`, starting one period from now.
    pub fn schedule_repeating(&mut self, period: Duration, event: E) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(self.now + period, event, Some(period))
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => self.queue.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    /// Returns whether the given timer is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_id.contains_key(&id)
    }

    /// Pops the earliest timer due at or before `until`.
    ///
    /// The clock is moved to the timer's due time before returning, so that
    /// anything scheduled while handling the event is relative to the instant
    /// it fired. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, E)> {
        let (&(due, id), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }

        let entry = self.queue.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);

        if let Some(period) = entry.period {
            let next = due + period;
            self.queue.insert(
                (next, id),
                Entry {
                    event: entry.event.clone(),
                    period: Some(period),
                },
            );
            self.due_by_id.insert(id, next);
        }

        Some((id, entry.event))
    }

    /// Moves the clock forward to `until` once every due timer was drained.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Due time of the next pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn insert(&mut self, due: Duration, event: E, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((due, id), Entry { event, period });
        self.due_by_id.insert(id, due);
        id
    }
}

/// Converts a signed millisecond setting into a timer delay.
///
/// Negative values fire immediately, like a zero delay.
#[must_use]
pub fn delay_from_millis(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}
