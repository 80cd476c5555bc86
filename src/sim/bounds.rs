//! Axis-aligned containment box

use glam::Vec2;

use crate::error::{SimError, SimResult};

/// Axis-aligned bounding box that bodies are kept inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    /// Create a box, requiring finite corners and `min < max` on both axes
    pub fn new(min: Vec2, max: Vec2) -> SimResult<Self> {
        // Placement samples inside the box, so its size must be finite too
        let finite = min.is_finite() && max.is_finite() && (max - min).is_finite();
        if !(finite && min.x < max.x && min.y < max.y) {
            return Err(SimError::InvalidBoundary { min, max });
        }
        Ok(Self { min, max })
    }

    /// Box anchored at the origin
    pub fn from_size(width: f32, height: f32) -> SimResult<Self> {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.max
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Range of valid centers for a circle of `radius`, or `None` if it cannot fit
    pub fn inset(&self, radius: f32) -> Option<(Vec2, Vec2)> {
        let lo = self.min + Vec2::splat(radius);
        let hi = self.max - Vec2::splat(radius);
        if lo.x > hi.x || lo.y > hi.y {
            None
        } else {
            Some((lo, hi))
        }
    }

    /// Whether a circle lies fully inside, with `tolerance` slack
    pub fn contains_circle(&self, center: Vec2, radius: f32, tolerance: f32) -> bool {
        center.x - radius >= self.min.x - tolerance
            && center.x + radius <= self.max.x + tolerance
            && center.y - radius >= self.min.y - tolerance
            && center.y + radius <= self.max.y + tolerance
    }
}
