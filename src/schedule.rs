//! One-shot delayed callbacks tagged with the run that scheduled them.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Counts animation runs. Each new run gets the next generation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Cancellation token carried by every delayed callback.
///
/// A token is valid only while its generation is the current one; once a new run
/// starts, callbacks holding an older token must not touch the new run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    generation: Generation,
}

impl Token {
    pub fn new(generation: Generation) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_current(&self, current: Generation) -> bool {
        self.generation == current
    }
}

struct Entry<T> {
    due: Duration,
    seq: u64,
    token: Token,
    task: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.seq)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A timer queue driven by the host clock.
///
/// Nothing fires on its own: the host calls [`pop_due`](Self::pop_due) with the
/// current time, typically once per frame. Callbacks due at the same instant fire in
/// the order they were scheduled.
pub struct Scheduler<T> {
    queue: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to fire at `due`.
    pub fn schedule(&mut self, due: Duration, token: Token, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            due,
            seq,
            token,
            task,
        }));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// When the earliest pending callback is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(e)| e.due)
    }

    /// Removes and returns the earliest callback due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Token, T)> {
        if self.next_due()? > now {
            return None;
        }
        self.queue.pop().map(|Reverse(e)| (e.token, e.task))
    }

    /// Removes every callback whose token matches `cancelled`, returning their tasks
    /// in firing order.
    pub fn cancel(&mut self, mut cancelled: impl FnMut(&Token) -> bool) -> Vec<T> {
        let mut entries: Vec<Entry<T>> =
            std::mem::take(&mut self.queue).into_iter().map(|Reverse(e)| e).collect();
        entries.sort();

        let mut removed = Vec::new();
        for entry in entries {
            if cancelled(&entry.token) {
                removed.push(entry.task);
            } else {
                self.queue.push(Reverse(entry));
            }
        }
        removed
    }
}
