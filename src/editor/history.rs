use std::collections::VecDeque;

use crate::canvas::Snapshot;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
pub const MAX_HISTORY_CAPACITY: usize = 1000;

/// Bounded undo stack of whole-grid snapshots.
///
/// The bottom entry is the state the grid was created or last reset with, so
/// the stack is never empty and undo can never step below it.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl HistoryStack {
    pub fn new(initial: Snapshot) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// `capacity` is clamped to `1..=MAX_HISTORY_CAPACITY`.
    pub fn with_capacity(initial: Snapshot, capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_CAPACITY);
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);
        Self {
            snapshots,
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Drops the newest snapshot and returns the one now on top. Returns `None`
    /// without changing anything when only one snapshot is left.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.snapshots.len() <= 1 {
            return None;
        }
        self.snapshots.pop_back();
        self.snapshots.back()
    }

    pub fn reset(&mut self, initial: Snapshot) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
    }

    pub fn top(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
