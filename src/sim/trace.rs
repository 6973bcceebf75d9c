//! Bounded position history for trace rendering

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TRACE_CAPACITY;

/// Past positions of an entity, oldest first
///
/// Once full, every push drops the oldest point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Default for Trace {
    fn default() -> Self {
        Self::with_capacity(TRACE_CAPACITY)
    }
}

impl Trace {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the oldest when over capacity
    pub fn push(&mut self, pos: Vec2) {
        self.points.push_back(pos);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained point
    pub fn oldest(&self) -> Option<Vec2> {
        self.points.front().copied()
    }

    /// Most recent point
    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}
