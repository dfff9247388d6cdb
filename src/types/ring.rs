//! Fixed-capacity ring buffer
//!
//! Backs every bounded log in the crate: observations, meta logs, drift
//! capsules and the existence session log. Oldest entries are evicted first.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create a ring holding at most `capacity` items (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append, returning the evicted oldest item when full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// All items, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// The newest `n` items, oldest first
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = &T> {
        let skip = self.items.len().saturating_sub(n);
        self.items.iter().skip(skip)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Keep only items matching the predicate
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copy out, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_first() {
        let mut ring = RingBuffer::new(3);
        assert_eq!(ring.push(1), None);
        assert_eq!(ring.push(2), None);
        assert_eq!(ring.push(3), None);
        assert_eq!(ring.push(4), Some(1));
        assert_eq!(ring.to_vec(), vec![2, 3, 4]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_last_n() {
        let mut ring = RingBuffer::new(10);
        for i in 0..5 {
            ring.push(i);
        }
        let tail: Vec<_> = ring.last_n(3).copied().collect();
        assert_eq!(tail, vec![2, 3, 4]);
        let all: Vec<_> = ring.last_n(50).copied().collect();
        assert_eq!(all.len(), 5);
        assert_eq!(ring.last(), Some(&4));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut ring = RingBuffer::new(0);
        ring.push("a");
        ring.push("b");
        assert_eq!(ring.capacity(), 1);
        assert_eq!(ring.to_vec(), vec!["b"]);
    }

    #[test]
    fn test_retain() {
        let mut ring = RingBuffer::new(10);
        for i in 0..6 {
            ring.push(i);
        }
        ring.retain(|i| i % 2 == 0);
        assert_eq!(ring.to_vec(), vec![0, 2, 4]);
    }
}
