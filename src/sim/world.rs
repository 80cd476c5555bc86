//! Simulation world and the per-tick pipeline
//!
//! A world owns its bodies, its boundary and its settings. Nothing is global,
//! so independent worlds can be stepped side by side. Randomness is only used
//! during construction and comes from the caller.

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use super::bounds::Aabb;
use super::collision::{boundary_collision, contain, resolve_pair};
use super::math::limit;
use super::steering::flocking_accelerations;
use crate::error::{SimError, SimResult};
use crate::settings::WorldSettings;

/// Contacts handled during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Wall contacts (a corner counts twice)
    pub wall_contacts: usize,
    /// Body pairs that were in contact
    pub body_contacts: usize,
}

/// A box full of circles
#[derive(Debug, Clone)]
pub struct World {
    /// Insertion-ordered, never resized after construction
    bodies: Vec<Body>,
    boundary: Aabb,
    settings: WorldSettings,
    ticks: u64,
}

impl World {
    /// Build `body_count` bodies with `factory`, then scatter them so none overlap
    ///
    /// Each body is placed uniformly inside the boundary and re-drawn while it
    /// intersects an earlier one, up to `settings.max_placement_attempts` times.
    pub fn new<R, F>(
        body_count: usize,
        boundary: Aabb,
        settings: WorldSettings,
        rng: &mut R,
        mut factory: F,
    ) -> SimResult<Self>
    where
        R: Rng,
        F: FnMut(usize, &mut R) -> SimResult<Body>,
    {
        settings.validate()?;

        let mut bodies = Vec::with_capacity(body_count);
        for i in 0..body_count {
            bodies.push(factory(i, rng)?);
        }
        place_bodies(&mut bodies, &boundary, settings.max_placement_attempts, rng)?;

        log::debug!(
            "Placed {} bodies in {}x{} boundary",
            bodies.len(),
            boundary.size().x,
            boundary.size().y
        );

        Ok(Self::from_bodies(bodies, boundary, settings))
    }

    /// Wrap bodies exactly where they are
    pub fn from_bodies(bodies: Vec<Body>, boundary: Aabb, settings: WorldSettings) -> Self {
        Self {
            bodies,
            boundary,
            settings,
            ticks: 0,
        }
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Order within a tick:
    /// 1. flocking accelerations for steered bodies
    /// 2. wall collisions for every body
    /// 3. body pairs `(i, j)` with `i < j` in ascending order; later pairs see
    ///    the positions and velocities written by earlier ones
    /// 4. forward Euler integration, steered speed clamp, optional containment
    pub fn tick(&mut self, dt: f32) -> TickSummary {
        let mut summary = TickSummary::default();
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("Ignoring tick with invalid dt {dt}");
            return summary;
        }
        self.ticks += 1;

        self.apply_steering();

        let reflection = self.settings.wall_reflection;
        for body in &mut self.bodies {
            summary.wall_contacts += boundary_collision(body, &self.boundary, reflection).count();
        }

        let policy = self.settings.separation;
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.bodies.split_at_mut(j);
                if resolve_pair(&mut head[i], &mut tail[0], policy) {
                    log::trace!("tick {}: contact {i}-{j}", self.ticks);
                    summary.body_contacts += 1;
                }
            }
        }

        let max_speed = self.settings.flocking.max_speed;
        for body in &mut self.bodies {
            body.integrate(dt);
            if body.behavior().is_steered() {
                body.set_velocity(limit(body.velocity(), max_speed));
            }
            if self.settings.contain_after_integration {
                contain(body, &self.boundary);
            }
        }

        summary
    }

    fn apply_steering(&mut self) {
        if !self.bodies.iter().any(|b| b.behavior().is_steered()) {
            return;
        }
        let accelerations = flocking_accelerations(&self.bodies, &self.settings.flocking);
        for (body, acc) in self.bodies.iter_mut().zip(accelerations) {
            body.accelerate(acc);
        }
    }

    /// Queue an external acceleration for one body until the next integration
    ///
    /// Returns false if `index` is out of range.
    pub fn accelerate(&mut self, index: usize, acceleration: Vec2) -> bool {
        match self.bodies.get_mut(index) {
            Some(body) => {
                body.accelerate(acceleration);
                true
            }
            None => false,
        }
    }

    /// Queue the same acceleration (gravity, wind) for every body
    pub fn accelerate_all(&mut self, acceleration: Vec2) {
        for body in &mut self.bodies {
            body.accelerate(acceleration);
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn boundary(&self) -> &Aabb {
        &self.boundary
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Total kinetic energy
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Total linear momentum
    pub fn momentum(&self) -> Vec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }
}

/// Rejection-sample a non-overlapping position for every body, in order
fn place_bodies<R: Rng>(
    bodies: &mut [Body],
    boundary: &Aabb,
    max_attempts: u32,
    rng: &mut R,
) -> SimResult<()> {
    let requested = bodies.len();
    let size = boundary.size();
    let failed = |placed: usize| SimError::PlacementFailed {
        placed,
        requested,
        width: size.x,
        height: size.y,
    };

    for i in 0..requested {
        let (lo, hi) = boundary.inset(bodies[i].radius()).ok_or_else(|| failed(i))?;

        let (placed, rest) = bodies.split_at_mut(i);
        let candidate = &mut rest[0];
        let mut attempts = 0;
        loop {
            if attempts == max_attempts {
                return Err(failed(i));
            }
            attempts += 1;

            candidate.set_position(Vec2::new(
                rng.random_range(lo.x..=hi.x),
                rng.random_range(lo.y..=hi.y),
            ));
            if !placed.iter().any(|other| other.intersects(candidate)) {
                break;
            }
        }

        if attempts > 1 {
            log::trace!("body {i} placed after {attempts} attempts");
        }
    }
    Ok(())
}
