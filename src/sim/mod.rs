//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only, and only during construction
//! - Stable iteration order (by insertion index)
//! - No rendering or platform dependencies

pub mod body;
pub mod bounds;
pub mod collision;
pub mod math;
pub mod scenario;
pub mod steering;
pub mod stepper;
pub mod world;

pub use body::{Behavior, Body};
pub use bounds::Aabb;
pub use collision::{
    CollisionResult, SeparationPolicy, WallHits, WallReflection, boundary_collision, circle_collision, contain,
    elastic_response, resolve_pair, separate,
};
pub use scenario::{Scenario, billiard_factory, flock_factory};
pub use steering::{FlockingSettings, flocking_accelerations};
pub use stepper::FixedStepper;
pub use world::{TickSummary, World};
