//! Minimum-priority queue with caller-supplied key extraction
//!
//! Wraps `std::collections::BinaryHeap` (a max-heap) with reversed ordering.
//! Keys are compared with `OrderedFloat` so every `f64`, including NaN and
//! infinities, has a place in the order. Entries with equal keys pop in
//! insertion order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

#[derive(Debug)]
struct Entry<T> {
    key: Reverse<(OrderedFloat<f64>, u64)>,
    item: T,
}

impl<T> Eq for Entry<T> {}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap ordered by `key(&item)`
pub struct MinPQ<T> {
    heap: BinaryHeap<Entry<T>>,
    key: fn(&T) -> f64,
    next_seq: u64,
}

impl<T> MinPQ<T> {
    pub fn new(key: fn(&T) -> f64) -> Self {
        Self {
            heap: BinaryHeap::new(),
            key,
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, item: T) {
        let priority = OrderedFloat((self.key)(&item));
        self.heap.push(Entry {
            key: Reverse((priority, self.next_seq)),
            item,
        });
        self.next_seq += 1;
    }

    /// Remove and return the item with the smallest key
    pub fn del_min(&mut self) -> Option<T> {
        self.heap.pop().map(|e| e.item)
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|e| &e.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_key_order() {
        let mut pq: MinPQ<f64> = MinPQ::new(|x| *x);
        for v in [5.0, 1.0, 3.0, 4.0, 2.0] {
            pq.insert(v);
        }
        assert_eq!(pq.peek_min(), Some(&1.0));

        let mut out = Vec::new();
        while let Some(v) = pq.del_min() {
            out.push(v);
        }
        assert_eq!(out, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(pq.is_empty());
    }

    #[test]
    fn test_equal_keys_pop_fifo() {
        let mut pq: MinPQ<(f64, char)> = MinPQ::new(|item| item.0);
        pq.insert((2.0, 'a'));
        pq.insert((1.0, 'b'));
        pq.insert((2.0, 'c'));
        pq.insert((1.0, 'd'));

        let order: Vec<char> = std::iter::from_fn(|| pq.del_min()).map(|(_, c)| c).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn test_infinite_keys_sort_last() {
        let mut pq: MinPQ<f64> = MinPQ::new(|x| *x);
        pq.insert(f64::INFINITY);
        pq.insert(7.0);
        assert_eq!(pq.del_min(), Some(7.0));
        assert_eq!(pq.del_min(), Some(f64::INFINITY));
        assert_eq!(pq.del_min(), None);
    }
}
