//! Collision detection and response for circles
//!
//! Two kinds of contact: a body against the walls of the containing box, and
//! a body against another body. Body pairs get an elastic response computed by
//! splitting both velocities into normal and tangential parts and applying the
//! 1-D elastic collision formulas to the normal parts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::bounds::Aabb;
use super::math::{direction, dot, length};

/// How overlapping bodies are pushed apart before the velocity response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeparationPolicy {
    /// Each body backs up along its own velocity by half the overlap.
    ///
    /// Known approximation: for near-tangential hits the push is almost
    /// parallel to the contact and can leave the bodies overlapping.
    /// Bodies at rest are not moved.
    #[default]
    AlongVelocity,
    /// Bodies are pushed apart along the line between their centers
    ContactNormal,
}

/// What happens to the perpendicular velocity component on a wall contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallReflection {
    /// Negate the component whichever way it points
    #[default]
    Negate,
    /// Point the component away from the wall. A body pushed onto a wall
    /// while already moving off it keeps its velocity.
    AwayFromWall,
}

impl WallReflection {
    /// Reflect `v` off a wall whose inward side is `inward` (+1 or -1)
    fn reflect(self, v: f32, inward: f32) -> f32 {
        match self {
            WallReflection::Negate => -v,
            WallReflection::AwayFromWall => v.abs() * inward,
        }
    }
}

/// Result of a body-body overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit vector from the second body's center toward the first's
    /// (zero when the centers coincide)
    pub normal: Vec2,
    /// Total overlap, `r_a + r_b - distance`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether two bodies touch or overlap
pub fn circle_collision(a: &Body, b: &Body) -> CollisionResult {
    if !a.intersects(b) {
        return CollisionResult::miss();
    }
    let delta = a.position() - b.position();
    CollisionResult {
        hit: true,
        normal: direction(delta),
        penetration: a.radius() + b.radius() - length(delta),
    }
}

/// Walls touched during a boundary check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub x: bool,
    pub y: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    /// Number of axes that hit a wall (2 for a corner)
    pub fn count(&self) -> usize {
        self.x as usize + self.y as usize
    }
}

/// Clamp a body back inside the box and bounce it off any wall it touches
///
/// Axes are handled independently so a corner reflects both components.
pub fn boundary_collision(body: &mut Body, aabb: &Aabb, reflection: WallReflection) -> WallHits {
    let r = body.radius();
    let mut pos = body.position();
    let mut vel = body.velocity();
    let (min, max) = (aabb.min(), aabb.max());
    let mut hits = WallHits::default();

    if pos.x >= max.x - r {
        pos.x = max.x - r;
        vel.x = reflection.reflect(vel.x, -1.0);
        hits.x = true;
    } else if pos.x <= min.x + r {
        pos.x = min.x + r;
        vel.x = reflection.reflect(vel.x, 1.0);
        hits.x = true;
    }

    if pos.y >= max.y - r {
        pos.y = max.y - r;
        vel.y = reflection.reflect(vel.y, -1.0);
        hits.y = true;
    } else if pos.y <= min.y + r {
        pos.y = min.y + r;
        vel.y = reflection.reflect(vel.y, 1.0);
        hits.y = true;
    }

    if hits.any() {
        body.set_position(pos);
        body.set_velocity(vel);
    }
    hits
}

/// Clamp a body's position into the box without changing its velocity
///
/// A body too wide for the box is centered on that axis.
pub fn contain(body: &mut Body, aabb: &Aabb) {
    let r = body.radius();
    let (min, max) = (aabb.min(), aabb.max());
    let mut pos = body.position();
    pos.x = clamp_axis(pos.x, min.x + r, max.x - r);
    pos.y = clamp_axis(pos.y, min.y + r, max.y - r);
    if pos != body.position() {
        body.set_position(pos);
    }
}

fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi { (lo + hi) * 0.5 } else { v.clamp(lo, hi) }
}

/// Push two overlapping bodies apart by `depth` each
pub fn separate(a: &mut Body, b: &mut Body, depth: f32, policy: SeparationPolicy) {
    match policy {
        SeparationPolicy::AlongVelocity => {
            // direction() is zero for a resting body, which skips the push
            let da = direction(a.velocity()) * depth;
            let db = direction(b.velocity()) * depth;
            a.set_position(a.position() - da);
            b.set_position(b.position() - db);
        }
        SeparationPolicy::ContactNormal => {
            let n = direction(a.position() - b.position());
            a.set_position(a.position() + n * depth);
            b.set_position(b.position() - n * depth);
        }
    }
}

/// 1-D elastic collision along `normal`, tangential parts untouched
///
/// `normal` must be a unit vector. Returns the new velocities.
pub fn elastic_response(v1: Vec2, v2: Vec2, m1: f32, m2: f32, normal: Vec2) -> (Vec2, Vec2) {
    let tangent = Vec2::new(-normal.y, normal.x);

    let v1n = dot(v1, normal);
    let v2n = dot(v2, normal);
    let v1t = dot(v1, tangent);
    let v2t = dot(v2, tangent);

    let total = m1 + m2;
    let u1n = ((m1 - m2) / total) * v1n + ((2.0 * m2) / total) * v2n;
    let u2n = ((2.0 * m1) / total) * v1n + ((m2 - m1) / total) * v2n;

    (normal * u1n + tangent * v1t, normal * u2n + tangent * v2t)
}

/// Detect, separate and respond for one body pair
///
/// Returns true if the bodies were in contact.
pub fn resolve_pair(a: &mut Body, b: &mut Body, policy: SeparationPolicy) -> bool {
    let result = circle_collision(a, b);
    if !result.hit {
        return false;
    }

    separate(a, b, result.penetration / 2.0, policy);

    // Normal is taken after separation
    let normal = direction(a.position() - b.position());
    if normal == Vec2::ZERO {
        log::trace!("coincident centers, skipping response");
        return true;
    }

    let (u1, u2) = elastic_response(a.velocity(), b.velocity(), a.mass(), b.mass(), normal);
    a.set_velocity(u1);
    b.set_velocity(u2);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(pos: Vec2, vel: Vec2, r: f32, m: f32) -> Body {
        Body::new(pos, vel, r, m).unwrap()
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_circle_collision() {
        let a = body(Vec2::new(8.0, 0.0), Vec2::ZERO, 5.0, 1.0);
        let b = body(Vec2::ZERO, Vec2::ZERO, 5.0, 1.0);
        let result = circle_collision(&a, &b);
        assert!(result.hit);
        assert!(close(result.normal, Vec2::X));
        assert!((result.penetration - 2.0).abs() < 1e-5);

        let far = body(Vec2::new(20.0, 0.0), Vec2::ZERO, 5.0, 1.0);
        assert!(!circle_collision(&far, &b).hit);
    }

    #[test]
    fn test_wall_reflect_right() {
        let aabb = Aabb::from_size(1000.0, 1000.0).unwrap();
        let mut b = body(Vec2::new(995.0, 500.0), Vec2::new(100.0, 5.0), 10.0, 1.0);
        let hits = boundary_collision(&mut b, &aabb, WallReflection::default());
        assert_eq!(hits, WallHits { x: true, y: false });
        assert_eq!(b.position(), Vec2::new(990.0, 500.0));
        assert_eq!(b.velocity(), Vec2::new(-100.0, 5.0));
    }

    #[test]
    fn test_wall_corner_reflects_both_axes() {
        let aabb = Aabb::from_size(100.0, 100.0).unwrap();
        let mut b = body(Vec2::new(2.0, 1.0), Vec2::new(-3.0, -4.0), 5.0, 1.0);
        let hits = boundary_collision(&mut b, &aabb, WallReflection::default());
        assert_eq!(hits.count(), 2);
        assert_eq!(b.position(), Vec2::new(5.0, 5.0));
        assert_eq!(b.velocity(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_wall_negates_outgoing_velocity() {
        // Default reflection negates even a component already leaving the wall
        let aabb = Aabb::from_size(100.0, 100.0).unwrap();
        let mut b = body(Vec2::new(95.0, 50.0), Vec2::new(-10.0, 0.0), 5.0, 1.0);
        let hits = boundary_collision(&mut b, &aabb, WallReflection::default());
        assert!(hits.x);
        assert_eq!(b.position(), Vec2::new(95.0, 50.0));
        assert_eq!(b.velocity(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_wall_away_keeps_outgoing_velocity() {
        let aabb = Aabb::from_size(100.0, 100.0).unwrap();
        let mut b = body(Vec2::new(95.0, 50.0), Vec2::new(-10.0, 0.0), 5.0, 1.0);
        boundary_collision(&mut b, &aabb, WallReflection::AwayFromWall);
        assert_eq!(b.velocity(), Vec2::new(-10.0, 0.0));

        // Incoming components still bounce, on every wall
        let mut c = body(Vec2::new(2.0, 98.0), Vec2::new(-3.0, 4.0), 5.0, 1.0);
        let hits = boundary_collision(&mut c, &aabb, WallReflection::AwayFromWall);
        assert_eq!(hits.count(), 2);
        assert_eq!(c.velocity(), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_contain_leaves_velocity() {
        let aabb = Aabb::from_size(100.0, 100.0).unwrap();
        let mut b = body(Vec2::new(120.0, -3.0), Vec2::new(7.0, -7.0), 5.0, 1.0);
        contain(&mut b, &aabb);
        assert_eq!(b.position(), Vec2::new(95.0, 5.0));
        assert_eq!(b.velocity(), Vec2::new(7.0, -7.0));
    }

    #[test]
    fn test_separate_along_velocity() {
        let mut a = body(Vec2::new(8.0, 0.0), Vec2::new(-10.0, 0.0), 5.0, 1.0);
        let mut b = body(Vec2::ZERO, Vec2::ZERO, 5.0, 1.0);
        separate(&mut a, &mut b, 1.0, SeparationPolicy::AlongVelocity);
        // a backs up against its velocity, b is at rest and stays
        assert!(close(a.position(), Vec2::new(9.0, 0.0)));
        assert_eq!(b.position(), Vec2::ZERO);
    }

    #[test]
    fn test_separate_contact_normal() {
        let mut a = body(Vec2::new(8.0, 0.0), Vec2::ZERO, 5.0, 1.0);
        let mut b = body(Vec2::ZERO, Vec2::ZERO, 5.0, 1.0);
        separate(&mut a, &mut b, 1.0, SeparationPolicy::ContactNormal);
        assert!(close(a.position(), Vec2::new(9.0, 0.0)));
        assert!(close(b.position(), Vec2::new(-1.0, 0.0)));
        assert!(!circle_collision(&a, &b).hit || circle_collision(&a, &b).penetration < 1e-4);
    }

    #[test]
    fn test_equal_mass_head_on_swap() {
        let v = 50.0;
        let mut a = body(Vec2::new(-4.0, 0.0), Vec2::new(v, 0.0), 5.0, 2.0);
        let mut b = body(Vec2::new(4.0, 0.0), Vec2::new(-v, 0.0), 5.0, 2.0);
        assert!(resolve_pair(&mut a, &mut b, SeparationPolicy::AlongVelocity));
        assert!(close(a.velocity(), Vec2::new(-v, 0.0)));
        assert!(close(b.velocity(), Vec2::new(v, 0.0)));
    }

    #[test]
    fn test_heavy_body_barely_moves() {
        let (u1, u2) = elastic_response(
            Vec2::new(10.0, 0.0),
            Vec2::ZERO,
            1.0,
            1_000_000.0,
            Vec2::new(-1.0, 0.0),
        );
        assert!(close(u1, Vec2::new(-10.0, 0.0)));
        assert!(u2.length() < 1e-3);
    }

    #[test]
    fn test_tangential_component_preserved() {
        // Glancing contact along x: y components pass through
        let (u1, u2) = elastic_response(
            Vec2::new(3.0, 7.0),
            Vec2::new(-1.0, -2.0),
            1.0,
            1.0,
            Vec2::X,
        );
        assert!((u1.y - 7.0).abs() < 1e-5);
        assert!((u2.y + 2.0).abs() < 1e-5);
        assert!((u1.x + 1.0).abs() < 1e-5);
        assert!((u2.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_centers_no_nan() {
        let mut a = body(Vec2::new(5.0, 5.0), Vec2::ZERO, 2.0, 1.0);
        let mut b = body(Vec2::new(5.0, 5.0), Vec2::ZERO, 2.0, 1.0);
        assert!(resolve_pair(&mut a, &mut b, SeparationPolicy::AlongVelocity));
        assert!(a.position().is_finite() && a.velocity().is_finite());
        assert!(b.position().is_finite() && b.velocity().is_finite());
    }

    proptest! {
        #[test]
        fn prop_momentum_and_energy_conserved(
            v1x in -200.0f32..200.0, v1y in -200.0f32..200.0,
            v2x in -200.0f32..200.0, v2y in -200.0f32..200.0,
            m1 in 0.1f32..10.0, m2 in 0.1f32..10.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let n = Vec2::new(angle.cos(), angle.sin());
            let v1 = Vec2::new(v1x, v1y);
            let v2 = Vec2::new(v2x, v2y);
            let (u1, u2) = elastic_response(v1, v2, m1, m2, n);

            let before = v1 * m1 + v2 * m2;
            let after = u1 * m1 + u2 * m2;
            let scale = 1.0 + before.length();
            prop_assert!((before - after).length() / scale < 1e-3);

            let e_before = 0.5 * m1 * v1.length_squared() + 0.5 * m2 * v2.length_squared();
            let e_after = 0.5 * m1 * u1.length_squared() + 0.5 * m2 * u2.length_squared();
            prop_assert!((e_before - e_after).abs() / (1.0 + e_before) < 1e-3);
        }
    }
}
