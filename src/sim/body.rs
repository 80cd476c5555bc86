//! Circular rigid bodies

use glam::Vec2;

use super::math::{dot, length};
use crate::error::{SimError, SimResult};

/// How a body picks its own acceleration each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    /// Passive billiard ball, moved only by collisions
    #[default]
    Ball,
    /// Flocks with other boids and flees predators
    Boid,
    /// Chases boids
    Predator,
}

impl Behavior {
    /// Whether flocking rules drive this body
    pub fn is_steered(&self) -> bool {
        !matches!(self, Behavior::Ball)
    }
}

/// A circle with position, velocity, radius and mass
///
/// Radius, mass and behavior are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    mass: f32,
    /// External acceleration, zeroed after every integration step
    acceleration: Vec2,
    behavior: Behavior,
}

impl Body {
    /// Create a passive body
    ///
    /// Position and velocity must be finite, radius and mass positive and finite.
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, mass: f32) -> SimResult<Self> {
        for (field, v) in [("position", position), ("velocity", velocity)] {
            if !v.is_finite() {
                let value = if v.x.is_finite() { v.y } else { v.x };
                return Err(SimError::InvalidBody { field, value });
            }
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidBody {
                field: "radius",
                value: radius,
            });
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidBody {
                field: "mass",
                value: mass,
            });
        }
        Ok(Self {
            position,
            velocity,
            radius,
            mass,
            acceleration: Vec2::ZERO,
            behavior: Behavior::Ball,
        })
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Move the body without touching its velocity
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Add to the acceleration accumulator (consumed by the next integration)
    pub fn accelerate(&mut self, acceleration: Vec2) {
        self.acceleration += acceleration;
    }

    /// True when the circles touch or overlap
    pub fn intersects(&self, other: &Body) -> bool {
        length(self.position - other.position) <= self.radius + other.radius
    }

    /// ½mv²
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * dot(self.velocity, self.velocity)
    }

    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// Forward Euler step, then reset the acceleration accumulator
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;
        self.acceleration = Vec2::ZERO;
    }
}
