//! Ready-made worlds for the demo driver
//!
//! Factories decide radius, mass and velocity; `World::new` decides where
//! bodies go. Both draw from the same seeded generator so a seed fully
//! determines a scenario.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::PI;

use super::body::{Behavior, Body};
use super::bounds::Aabb;
use super::world::World;
use crate::error::SimResult;
use crate::settings::WorldSettings;

/// Boid radius
pub const BOID_RADIUS: f32 = 10.0;
/// Predator radius
pub const PREDATOR_RADIUS: f32 = 20.0;

/// Billiard balls with random weight
///
/// Weight `w` in [0.5, 2) scales the radius and doubles as the mass.
pub fn billiard_factory<R: Rng>(
    speed: f32,
    base_radius: f32,
) -> impl FnMut(usize, &mut R) -> SimResult<Body> {
    move |_, rng| {
        let weight: f32 = rng.random_range(0.5..2.0);
        let u: f32 = rng.random_range(-1.0..1.0);
        let velocity = Vec2::new(u, 1.0 - u) * speed;
        Body::new(Vec2::ZERO, velocity, base_radius * weight, weight)
    }
}

/// Boids first, then predators, all cruising at `max_speed` in a random heading
pub fn flock_factory<R: Rng>(
    boid_count: usize,
    max_speed: f32,
) -> impl FnMut(usize, &mut R) -> SimResult<Body> {
    move |i, rng| {
        let angle: f32 = rng.random_range(0.0..2.0 * PI);
        let velocity = Vec2::new(angle.cos(), angle.sin()) * max_speed;
        let (radius, behavior) = if i < boid_count {
            (BOID_RADIUS, Behavior::Boid)
        } else {
            (PREDATOR_RADIUS, Behavior::Predator)
        };
        Ok(Body::new(Vec2::ZERO, velocity, radius, 1.0)?.with_behavior(behavior))
    }
}

/// Demo scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Ten billiard balls in a 1000x1000 table
    #[default]
    Billiards,
    /// A hundred boids and two predators
    Flock,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Billiards => "billiards",
            Scenario::Flock => "flock",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "billiards" | "billiard" => Some(Scenario::Billiards),
            "flock" | "boids" => Some(Scenario::Flock),
            _ => None,
        }
    }

    /// Build the scenario's world from a seed
    pub fn build(&self, seed: u64, settings: WorldSettings) -> SimResult<World> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let boundary = Aabb::from_size(1000.0, 1000.0)?;

        match self {
            Scenario::Billiards => World::new(
                10,
                boundary,
                settings,
                &mut rng,
                billiard_factory(100.0, 25.0),
            ),
            Scenario::Flock => {
                let factory = flock_factory(100, settings.flocking.max_speed);
                World::new(102, boundary, settings, &mut rng, factory)
            }
        }
    }
}
