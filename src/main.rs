//! Headless demo driver
//!
//! Builds a scenario and runs it against a simulated 60 Hz frame clock,
//! logging energy and momentum once per simulated second.
//!
//! Usage: `circle-physics [billiards|flock] [settings.json]`
//! The seed comes from `CIRCLE_PHYSICS_SEED` (default 12345).

use std::process::ExitCode;

use circle_physics::sim::{FixedStepper, Scenario};
use circle_physics::{SimResult, WorldSettings};

/// Frames to simulate
const FRAMES: u32 = 60 * 20;
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> SimResult<()> {
    let mut args = std::env::args().skip(1);

    let scenario = match args.next() {
        Some(name) => Scenario::from_name(&name).unwrap_or_else(|| {
            log::warn!("Unknown scenario '{name}', using billiards");
            Scenario::Billiards
        }),
        None => Scenario::default(),
    };
    let settings = match args.next() {
        Some(path) => WorldSettings::load(path)?,
        None => WorldSettings::default(),
    };
    let seed = std::env::var("CIRCLE_PHYSICS_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);

    let mut world = scenario.build(seed, settings)?;
    log::info!(
        "Running {} with {} bodies (seed {seed})",
        scenario.as_str(),
        world.len()
    );

    let start_energy = world.kinetic_energy();
    let mut stepper = FixedStepper::default();
    for frame in 1..=FRAMES {
        stepper.advance(&mut world, FRAME_DT);

        if frame % 60 == 0 {
            let momentum = world.momentum();
            log::info!(
                "t={:>3}s ticks={} energy={:.1} momentum=({:.1}, {:.1})",
                frame / 60,
                world.ticks(),
                world.kinetic_energy(),
                momentum.x,
                momentum.y
            );
        }
    }

    let end_energy = world.kinetic_energy();
    log::info!(
        "Done: energy {:.1} -> {:.1} ({:+.3}%)",
        start_energy,
        end_energy,
        (end_energy - start_energy) / start_energy.max(f32::EPSILON) * 100.0
    );
    Ok(())
}
