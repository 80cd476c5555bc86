//! Circle Physics - deterministic 2D collision kernel for circular bodies
//!
//! Core modules:
//! - `sim`: Bodies, boundary, collision response, flocking and the world tick
//! - `settings`: Runtime tuning loaded from JSON
//! - `error`: Construction and configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::WorldSettings;
pub use sim::{Aabb, Body, World};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the fixed stepper will bank (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Placement attempts per body before `World::new` gives up
    pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 10_000;
}
