/// Delayed-destruction schedule.
///
/// Min-heap of `(deadline, resource)` pairs with lazy deletion: removing or
/// rescheduling a resource only updates the membership map, and stale heap
/// entries are skipped when they surface.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use rustc_hash::FxHashMap;
use crate::resource::ResourceKey;

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: f64,
    sequence: u64,
    key: ResourceKey,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .total_cmp(&other.deadline)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Resources pending destruction, ordered by deadline
#[derive(Debug, Default)]
pub struct GarbageSchedule {
    heap: BinaryHeap<Reverse<Entry>>,
    members: FxHashMap<ResourceKey, u64>,
    next_sequence: u64,
}

impl GarbageSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or reschedule) a resource
    pub fn insert(&mut self, key: ResourceKey, deadline: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.members.insert(key, sequence);
        self.heap.push(Reverse(Entry { deadline, sequence, key }));
    }

    /// Un-schedule a resource; returns whether it was pending
    pub fn remove(&mut self, key: ResourceKey) -> bool {
        self.members.remove(&key).is_some()
    }

    pub fn contains(&self, key: ResourceKey) -> bool {
        self.members.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Pending resources, in no particular order
    pub fn keys(&self) -> Vec<ResourceKey> {
        self.members.keys().copied().collect()
    }

    /// Take the earliest resource whose deadline has strictly passed
    pub fn pop_due(&mut self, now: f64) -> Option<ResourceKey> {
        self.discard_stale();
        let due = self
            .heap
            .peek()
            .is_some_and(|Reverse(entry)| now > entry.deadline);
        if due {
            self.pop_front()
        } else {
            None
        }
    }

    /// Take the earliest resource regardless of its deadline
    pub fn pop_any(&mut self) -> Option<ResourceKey> {
        self.discard_stale();
        self.pop_front()
    }

    /// Remaining time is `deadline - now`; None when nothing is pending
    pub fn next_deadline(&mut self) -> Option<f64> {
        self.discard_stale();
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
    }

    fn pop_front(&mut self) -> Option<ResourceKey> {
        let Reverse(entry) = self.heap.pop()?;
        self.members.remove(&entry.key);
        Some(entry.key)
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse(entry)) = self.heap.peek() {
            if self.members.get(&entry.key) == Some(&entry.sequence) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
#[path = "garbage_tests.rs"]
mod tests;
