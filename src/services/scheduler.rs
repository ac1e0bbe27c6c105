//! Millisecond clocks and a cancellable task queue.
//!
//! The queue never runs anything on its own: the owner asks for the tasks whose
//! deadline has passed and executes them on its own thread.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Source of the current time in milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Milliseconds elapsed since the clock was created.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Deadline-ordered queue of pending tasks.
pub struct Scheduler<T> {
    next_seq: u64,
    // (deadline, seq) keeps insertion order among equal deadlines.
    pending: BTreeMap<(u64, u64), T>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Queues `task` to become due at `deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((deadline_ms, seq), task);
        TaskHandle(seq)
    }

    /// Cancels a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let key = self.pending.keys().find(|(_, seq)| *seq == handle.0).copied();
        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.keys().any(|(_, seq)| *seq == handle.0)
    }

    /// Removes and returns every task due at or before `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(TaskHandle, T)> {
        let later = self.pending.split_off(&(now_ms.saturating_add(1), 0));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_iter()
            .map(|((_, seq), task)| (TaskHandle(seq), task))
            .collect()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
