//! Array-backed binary min-heap with stable tie-breaking.
//!
//! Entries are ordered by `(priority, sequence)` ascending. `sequence` is a
//! per-queue counter assigned at insertion, so equal priorities come out in
//! insertion order. Priorities compare with [`f64::total_cmp`], which gives
//! every `f64` (including NaN) a fixed place in the order.
//!
//! Not `std::collections::BinaryHeap`: the search needs the slot-level
//! restore step below, and FIFO ties without wrapping every task in
//! `Reverse`.

use std::cmp::Ordering;

/// A pending task with its ordering key.
#[derive(Debug, Clone)]
struct QueueEntry<T> {
    priority: f64,
    sequence: u64,
    task: T,
}

impl<T> QueueEntry<T> {
    /// Strict `(priority, sequence)` ordering.
    fn orders_before(&self, other: &Self) -> bool {
        match self.priority.total_cmp(&other.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.sequence < other.sequence,
        }
    }
}

/// Min-priority queue over tasks of type `T`.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<QueueEntry<T>>,
    next_sequence: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Create an empty queue with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Insert `task` with `priority`. Lower priorities come out first.
    pub fn insert(&mut self, priority: f64, task: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(QueueEntry {
            priority,
            sequence,
            task,
        });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the task with the smallest `(priority, sequence)`.
    ///
    /// Returns `None` on an empty queue.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.pop()?;
        if !self.entries.is_empty() {
            self.restore(0);
        }
        Some(entry.task)
    }

    /// Priority of the next task [`PriorityQueue::extract_min`] would return.
    #[must_use]
    pub fn peek_priority(&self) -> Option<f64> {
        self.entries.first().map(|e| e.priority)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending task.
    ///
    /// The sequence counter keeps counting, so ties between tasks inserted
    /// before and after a clear still resolve in insertion order.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-establish the heap property for the element at `index` after it
    /// was replaced by an arbitrary entry.
    ///
    /// The replacement may belong either above or below its new slot, so it
    /// first sinks toward any child that orders before it; only if it did
    /// not sink does it bubble toward the root.
    fn restore(&mut self, index: usize) {
        if !self.sift_down(index) {
            self.sift_up(index);
        }
    }

    /// Bubble `index` toward the root while it orders before its parent.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.entries[index].orders_before(&self.entries[parent]) {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
    }

    /// Sink `index` toward the leaves. Returns `true` if it moved.
    fn sift_down(&mut self, mut index: usize) -> bool {
        let len = self.entries.len();
        let start = index;
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut first = index;
            if left < len && self.entries[left].orders_before(&self.entries[first]) {
                first = left;
            }
            if right < len && self.entries[right].orders_before(&self.entries[first]) {
                first = right;
            }
            if first == index {
                break;
            }
            self.entries.swap(index, first);
            index = first;
        }
        index != start
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
