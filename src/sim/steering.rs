//! Flocking rules for steered bodies
//!
//! Reynolds-style boids: cohesion, separation and alignment among boids, plus
//! fleeing from predators. Predators only steer toward nearby boids. Rules
//! read a snapshot of the bodies and return one acceleration per body, so the
//! result does not depend on iteration order.
//!
//! See <http://www.red3d.com/cwr/steer/gdc99/>.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

use super::body::{Behavior, Body};
use super::math::{direction, length, limit, wrap_angle};

/// Tuning for the flocking rules
///
/// Forces are accelerations in units/s².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockingSettings {
    /// Speed steered bodies cruise at (and are clamped to)
    pub max_speed: f32,
    /// Cap on each of cohesion/separation/alignment
    pub max_force: f32,
    /// Cap on the flee rule
    pub flee_force: f32,

    pub cohesion_radius: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub flee_radius: f32,
    /// Half-angle of the field of view, radians
    pub view_half_angle: f32,

    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub flee_weight: f32,
    /// Multiplier on a predator's pull toward boids
    pub predator_chase_weight: f32,
}

impl Default for FlockingSettings {
    fn default() -> Self {
        Self {
            max_speed: 80.0,
            max_force: 30.0,
            flee_force: 60.0,

            cohesion_radius: 200.0,
            separation_radius: 80.0,
            alignment_radius: 220.0,
            flee_radius: 300.0,
            view_half_angle: 3.0 * FRAC_PI_4,

            cohesion_weight: 1.75,
            separation_weight: 6.0,
            alignment_weight: 0.25,
            flee_weight: 10.0,
            predator_chase_weight: 2.0,
        }
    }
}

/// Whether `other` is inside `observer`'s field of view
///
/// A body at rest has no heading and sees in every direction.
pub fn visible(observer: &Body, other: &Body, half_angle: f32) -> bool {
    let heading = observer.velocity();
    if heading == Vec2::ZERO {
        return true;
    }
    let diff = other.position() - observer.position();
    let angle = wrap_angle(diff.y.atan2(diff.x) - heading.y.atan2(heading.x));
    angle.abs() < half_angle
}

/// Acceleration that turns `velocity` toward `desired` at full speed
fn steer(desired: Vec2, velocity: Vec2, max_speed: f32, max_force: f32) -> Vec2 {
    if desired == Vec2::ZERO {
        return Vec2::ZERO;
    }
    limit(direction(desired) * max_speed - velocity, max_force)
}

/// Running average over visible neighbours
#[derive(Default)]
struct Average {
    sum: Vec2,
    count: u32,
}

impl Average {
    fn add(&mut self, v: Vec2) {
        self.sum += v;
        self.count += 1;
    }

    fn get(&self) -> Option<Vec2> {
        (self.count > 0).then(|| self.sum / self.count as f32)
    }
}

/// Per-body flocking accelerations, zero for passive bodies
pub fn flocking_accelerations(bodies: &[Body], settings: &FlockingSettings) -> Vec<Vec2> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| match body.behavior() {
            Behavior::Ball => Vec2::ZERO,
            Behavior::Boid => boid_acceleration(i, bodies, settings),
            Behavior::Predator => predator_acceleration(i, bodies, settings),
        })
        .collect()
}

fn boid_acceleration(index: usize, bodies: &[Body], s: &FlockingSettings) -> Vec2 {
    let me = &bodies[index];
    let pos = me.position();
    let vel = me.velocity();

    let mut cohesion = Average::default();
    let mut separation = Average::default();
    let mut alignment = Average::default();
    let mut flee = Average::default();

    for (j, other) in bodies.iter().enumerate() {
        if j == index || !visible(me, other, s.view_half_angle) {
            continue;
        }
        let diff = pos - other.position();
        let dist = length(diff);
        if dist == 0.0 {
            continue;
        }

        match other.behavior() {
            Behavior::Boid => {
                if dist < s.cohesion_radius {
                    cohesion.add(other.position());
                }
                if dist < s.separation_radius {
                    // Closer neighbours push harder
                    separation.add(diff / (dist * dist));
                }
                if dist < s.alignment_radius {
                    alignment.add(other.velocity());
                }
            }
            Behavior::Predator => {
                if dist < s.flee_radius {
                    flee.add(diff / dist);
                }
            }
            Behavior::Ball => {}
        }
    }

    let rule = |avg: Option<Vec2>, force: f32| {
        avg.map_or(Vec2::ZERO, |d| steer(d, vel, s.max_speed, force))
    };

    rule(cohesion.get().map(|c| c - pos), s.max_force) * s.cohesion_weight
        + rule(separation.get(), s.max_force) * s.separation_weight
        + rule(alignment.get(), s.max_force) * s.alignment_weight
        + rule(flee.get(), s.flee_force) * s.flee_weight
}

fn predator_acceleration(index: usize, bodies: &[Body], s: &FlockingSettings) -> Vec2 {
    let me = &bodies[index];
    let pos = me.position();

    let mut prey = Average::default();
    for (j, other) in bodies.iter().enumerate() {
        if j == index || other.behavior() != Behavior::Boid {
            continue;
        }
        let dist = length(other.position() - pos);
        if dist > 0.0 && dist < s.cohesion_radius && visible(me, other, s.view_half_angle) {
            prey.add(other.position());
        }
    }

    prey.get()
        .map_or(Vec2::ZERO, |c| steer(c - pos, me.velocity(), s.max_speed, s.max_force))
        * s.predator_chase_weight
}
