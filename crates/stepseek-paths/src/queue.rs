//! Cost-ordered frontier queue.
//!
//! Items are stored in a min-heap keyed by `(cost, insertion_order)`, with
//! costs in integer units so equal sums compare equal.
//! Lower costs are popped first; ties are broken by insertion order
//! (FIFO), which keeps the clockwise neighbour order as the tie-break.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// An entry in the queue.
#[derive(Debug, Clone)]
struct Entry<E> {
    item: E,
    cost: u64,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order: smaller cost first, then smaller seq. The heap
        // wraps entries in `Reverse`.
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue over integer costs with FIFO tie-breaking.
#[derive(Debug, Clone)]
pub struct CostQueue<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> CostQueue<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push an item at the given cost.
    pub fn push(&mut self, item: E, cost: u64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { item, cost, seq }));
    }

    /// Pop the item with the lowest cost (ties broken FIFO).
    pub fn pop(&mut self) -> Option<E> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of items in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// All queued items, in the order they would be popped.
    pub fn ordered(&self) -> Vec<&E> {
        let mut entries: Vec<&Entry<E>> = self.heap.iter().map(|Reverse(e)| e).collect();
        entries.sort();
        entries.into_iter().map(|e| &e.item).collect()
    }
}

impl<E> Default for CostQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_push_pop() {
        let mut q = CostQueue::new();
        q.push("a", 3_000);
        q.push("b", 1_000);
        q.push("c", 1_414);

        assert_eq!(q.pop(), Some("b"));
        assert_eq!(q.pop(), Some("c"));
        assert_eq!(q.pop(), Some("a"));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_fifo_same_cost() {
        let mut q = CostQueue::new();
        q.push("first", 1);
        q.push("second", 1);
        q.push("third", 1);

        assert_eq!(q.pop(), Some("first"));
        assert_eq!(q.pop(), Some("second"));
        assert_eq!(q.pop(), Some("third"));
    }

    #[test]
    fn test_ordered_matches_pop_order() {
        let mut q = CostQueue::new();
        q.push(1, 20);
        q.push(2, 10);
        q.push(3, 20);
        q.push(4, 5);

        let snapshot: Vec<i32> = q.ordered().into_iter().copied().collect();
        assert_eq!(snapshot, vec![4, 2, 1, 3]);
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn test_is_empty_and_len() {
        let mut q = CostQueue::<i32>::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);

        q.push(1, 1);
        assert!(!q.is_empty());
        assert_eq!(q.len(), 1);

        q.pop();
        assert!(q.is_empty());
    }
}
