//! Free-hand drawn obstacles
//!
//! Strokes are stored as a de-duplicated, append-only cloud of points. The
//! collision pass treats every point as a fixed, zero-radius obstacle.

use std::collections::HashSet;

use glam::Vec2;

/// Upper bound on points filled into a single gap
const MAX_GAP_STEPS: usize = 4096;

/// Bit-exact key for a point (folds -0.0 into 0.0)
#[inline]
fn point_key(p: Vec2) -> (u32, u32) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Append-only set of obstacle points, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct SegmentSet {
    points: Vec<Vec2>,
    seen: HashSet<(u32, u32)>,
}

impl SegmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point; returns false if it was already present
    pub fn insert(&mut self, point: Vec2) -> bool {
        if self.seen.insert(point_key(point)) {
            self.points.push(point);
            true
        } else {
            false
        }
    }

    /// Insert a stroke, filling gaps between consecutive samples
    ///
    /// Each gap of length `d` gets `ceil(d)` evenly spaced points (at most
    /// `MAX_GAP_STEPS`), so the result is roughly one point per pixel.
    /// Non-finite samples are dropped. Returns how many new points were
    /// stored.
    pub fn add_stroke(&mut self, samples: &[Vec2]) -> usize {
        let before = self.points.len();
        let finite: Vec<Vec2> = samples.iter().copied().filter(|p| p.is_finite()).collect();
        if finite.len() < samples.len() {
            log::warn!("Dropped {} non-finite stroke samples", samples.len() - finite.len());
        }
        let Some(&first) = finite.first() else {
            return 0;
        };
        self.insert(first);
        for pair in finite.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let steps = (start.distance(end).ceil() as usize).min(MAX_GAP_STEPS);
            for i in 1..=steps {
                self.insert(start.lerp(end, i as f32 / steps as f32));
            }
            self.insert(end);
        }
        self.points.len() - before
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.seen.contains(&point_key(point))
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
