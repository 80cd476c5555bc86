//! Fixed timestep driver
//!
//! Turns variable frame times into whole `World::tick` calls of a fixed size.

use super::world::World;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::{SimError, SimResult};

/// Accumulates frame time and spends it in fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStepper {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self {
            dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }
}

impl FixedStepper {
    /// Stepper with tick size `dt`, which must be positive and finite
    pub fn new(dt: f32, max_substeps: u32) -> SimResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimestep { dt });
        }
        Ok(Self {
            dt,
            max_substeps,
            ..Self::default()
        })
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Time banked but not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame's elapsed time and run the ticks it pays for
    ///
    /// Returns the number of ticks run. At most `max_substeps` run per call
    /// to prevent a spiral of death; time beyond that is dropped.
    pub fn advance(&mut self, world: &mut World, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            world.tick(self.dt);
            self.accumulator -= self.dt;
            substeps += 1;
        }

        if self.accumulator >= self.dt {
            log::debug!(
                "Dropping {:.4}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator %= self.dt;
        }

        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldSettings;
    use crate::sim::{Aabb, Body};
    use glam::Vec2;

    fn world() -> World {
        let body = Body::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 0.0), 5.0, 1.0).unwrap();
        World::from_bodies(
            vec![body],
            Aabb::from_size(100.0, 100.0).unwrap(),
            WorldSettings::default(),
        )
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut world = world();
        let mut stepper = FixedStepper::new(0.01, 8).unwrap();

        assert_eq!(stepper.advance(&mut world, 0.004), 0);
        assert_eq!(stepper.advance(&mut world, 0.004), 0);
        assert_eq!(stepper.advance(&mut world, 0.004), 1);
        assert_eq!(world.ticks(), 1);
        assert!((stepper.pending() - 0.002).abs() < 1e-5);
    }

    #[test]
    fn test_caps_substeps() {
        let mut world = world();
        let mut stepper = FixedStepper::new(0.01, 4).unwrap();

        // 0.1s would be 10 ticks, capped at 4
        assert_eq!(stepper.advance(&mut world, 0.1), 4);
        assert_eq!(world.ticks(), 4);
        assert!(stepper.pending() < stepper.dt());
    }

    #[test]
    fn test_ignores_bad_frames() {
        let mut world = world();
        let mut stepper = FixedStepper::default();
        assert_eq!(stepper.advance(&mut world, -1.0), 0);
        assert_eq!(stepper.advance(&mut world, f32::NAN), 0);
        assert_eq!(stepper.pending(), 0.0);
    }

    #[test]
    fn test_rejects_bad_timestep() {
        for dt in [0.0, -0.01, f32::NAN, f32::INFINITY] {
            let err = FixedStepper::new(dt, 8).unwrap_err();
            assert!(matches!(err, SimError::InvalidTimestep { .. }));
        }
    }

    #[test]
    fn test_keeps_running_across_frames() {
        let mut world = world();
        let mut stepper = FixedStepper::new(0.004, 8).unwrap();
        let mut total = 0;
        for _ in 0..10 {
            total += stepper.advance(&mut world, 0.016);
            assert!(stepper.pending().is_finite());
        }
        // 0.16s at 4ms per tick, give or take rounding in the accumulator
        assert!((39..=40).contains(&total));
        assert_eq!(world.ticks(), u64::from(total));
    }

    #[test]
    fn test_zero_substeps_drops_time() {
        let mut world = world();
        let mut stepper = FixedStepper::new(0.01, 0).unwrap();
        assert_eq!(stepper.advance(&mut world, 0.05), 0);
        assert!(stepper.pending().is_finite() && stepper.pending() < stepper.dt());
        assert_eq!(world.ticks(), 0);
    }
}
