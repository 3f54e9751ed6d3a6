use std::collections::VecDeque;

use glam::DVec2;

/// Maximum number of samples kept per trail.
pub const TRAIL_CAP: usize = 150;

/// Bounded recency buffer of a body's past positions, oldest first.
/// Presentation only: physics never reads it.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<DVec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
        }
    }

    /// Append a sample, evicting the oldest once the cap is reached.
    pub fn push(&mut self, point: DVec2) {
        if self.points.len() == TRAIL_CAP {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    pub fn oldest(&self) -> Option<DVec2> {
        self.points.front().copied()
    }

    pub fn to_vec(&self) -> Vec<DVec2> {
        self.points.iter().copied().collect()
    }
}
