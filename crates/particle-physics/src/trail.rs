//! Fixed-capacity position history

use glam::Vec2;
use std::collections::VecDeque;

/// Ring buffer of recent positions; the oldest entry is dropped on overflow
#[derive(Clone, Debug, Default)]
pub struct Trail<T = Vec2> {
    points: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> Trail<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: T) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<T> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
