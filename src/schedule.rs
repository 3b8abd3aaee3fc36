//! Cancellable timers for a single control thread.
//!
//! Nothing here sleeps or spawns. Scheduling records a due time and returns
//! immediately; the owner polls [`Scheduler::pop_due`] with the current time
//! and handles whatever has expired, earliest first.

use tracing::trace;

/// Handle to a scheduled action. Handles are never reused within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    due_at: u64,
    repeat: Repeat,
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub due_at: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once, `after_ms` from `now`
    pub fn schedule_once(&mut self, now: u64, after_ms: u64) -> TimerId {
        self.insert(now.saturating_add(after_ms), Repeat::Once)
    }

    /// Fire every `period_ms` starting one period from `now`
    pub fn schedule_every(&mut self, now: u64, period_ms: u64) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(now.saturating_add(period_ms), Repeat::Every(period_ms))
    }

    fn insert(&mut self, due_at: u64, repeat: Repeat) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due_at, repeat });
        trace!(timer = id.0, due_at, ?repeat, "timer scheduled");
        id
    }

    /// Remove a pending timer. Returns false if it already fired (one-shot)
    /// or was cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            trace!(timer = id.0, "timer cancelled");
        }
        removed
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Earliest due time among pending timers
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_at).min()
    }

    /// Take the earliest timer due at or before `now`.
    ///
    /// Ties are broken by scheduling order. A repeating timer is re-armed one
    /// period after the occurrence just returned, so a caller that polls late
    /// still sees every missed occurrence in order.
    pub fn pop_due(&mut self, now: u64) -> Option<Fired> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_at <= now)
            .min_by_key(|(_, e)| (e.due_at, e.id))
            .map(|(i, _)| i)?;

        let Entry { id, due_at, repeat } = self.entries[idx].clone();
        let fired = Fired { id, due_at };

        match repeat {
            Repeat::Once => {
                self.entries.swap_remove(idx);
            }
            Repeat::Every(period) => {
                self.entries[idx].due_at = due_at.saturating_add(period);
            }
        }

        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_exactly_once() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(0, 100);

        assert_eq!(s.pop_due(99), None);
        assert_eq!(s.pop_due(100), Some(Fired { id, due_at: 100 }));
        assert_eq!(s.pop_due(1000), None);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn every_fires_each_period_in_order() {
        let mut s = Scheduler::new();
        let id = s.schedule_every(0, 1000);

        let mut fired = vec![];
        while let Some(f) = s.pop_due(3500) {
            fired.push(f.due_at);
            assert_eq!(f.id, id);
        }
        assert_eq!(fired, vec![1000, 2000, 3000]);
        assert_eq!(s.pending_count(), 1);
        assert_eq!(s.next_due(), Some(4000));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let once = s.schedule_once(0, 100);
        let every = s.schedule_every(0, 50);

        assert!(s.cancel(once));
        assert!(s.cancel(every));
        assert!(!s.cancel(once));
        assert_eq!(s.pop_due(10_000), None);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn ties_resolve_by_scheduling_order() {
        let mut s = Scheduler::new();
        let tick = s.schedule_every(0, 1000);
        let deadline = s.schedule_once(0, 1000);

        assert_eq!(s.pop_due(1000).map(|f| f.id), Some(tick));
        assert_eq!(s.pop_due(1000).map(|f| f.id), Some(deadline));
        assert_eq!(s.pop_due(1000), None);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut s = Scheduler::new();
        let a = s.schedule_once(0, 1);
        s.cancel(a);
        let b = s.schedule_once(0, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut s = Scheduler::new();
        s.schedule_once(0, 1);
        s.schedule_every(0, 1);
        assert_eq!(s.cancel_all(), 2);
        assert_eq!(s.next_due(), None);
    }
}
