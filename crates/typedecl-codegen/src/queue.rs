//! FIFO work queue of class names with a permanent "seen" set.

use std::collections::{HashSet, VecDeque};

/// Pending classes in discovery order.
///
/// A name is accepted at most once for the lifetime of the queue, even
/// after it has been shifted out, so reference cycles terminate.
#[derive(Debug, Default)]
pub struct WorkQueue {
    pending: VecDeque<String>,
    seen: HashSet<String>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a queue with the given names, in order, skipping duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = Self::new();
        for name in names {
            queue.enqueue(name);
        }
        queue
    }

    /// Add a name unless it was ever seen. Returns whether it was added.
    pub fn enqueue(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        tracing::trace!(class = %name, "enqueued");
        self.seen.insert(name.clone());
        self.pending.push_back(name);
        true
    }

    /// Remove and return the oldest pending name.
    pub fn shift(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn has_seen(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
