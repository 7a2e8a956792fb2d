//! Bounded history of position snapshots, used for trails

use crate::physics::math::{HISTORY_CAPACITY, Vector};
use std::collections::VecDeque;

/// Fixed-capacity FIFO of full position snapshots
///
/// Oldest snapshots are evicted first once `capacity` is reached. The
/// buffer always holds at least one snapshot: the one it was created or
/// last reset with.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionHistory {
    snapshots: VecDeque<Vec<Vector>>,
    capacity: usize,
}

impl PositionHistory {
    pub fn new(initial: Vec<Vector>) -> Self {
        Self::with_capacity(initial, HISTORY_CAPACITY)
    }

    /// A capacity of zero is treated as one
    pub fn with_capacity(initial: Vec<Vector>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(initial);
        Self {
            snapshots,
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Vec<Vector>) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Drop every snapshot and start over from `initial`
    pub fn reset(&mut self, initial: Vec<Vector>) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
    }

    #[inline]
    pub fn latest(&self) -> &[Vector] {
        self.snapshots.back().map(Vec::as_slice).unwrap_or_default()
    }

    #[inline]
    pub fn oldest(&self) -> &[Vector] {
        self.snapshots.front().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[Vector]> + ExactSizeIterator {
        self.snapshots.iter().map(Vec::as_slice)
    }

    /// Positions of one body from oldest to newest
    ///
    /// Yields nothing for an out-of-range index.
    pub fn trail(&self, body: usize) -> impl Iterator<Item = Vector> + '_ {
        self.snapshots
            .iter()
            .filter_map(move |snapshot| snapshot.get(body).copied())
    }
}
