//! RustMotionPlanning - sampling-based motion planning in Rust
//!
//! This crate provides a goal-biased RRT planner over an abstract
//! configuration space, together with the collaborators it needs:
//! state spaces, validity checking, goal regions and tree storage.

// Core modules
pub mod common;
pub mod base;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Configuration, KinematicPath, PlannerStatus, Solution};
pub use common::{MotionPlanner, StateValidityChecker};
pub use common::{PlanningError, PlanningResult};
pub use base::{SpaceInformation, StateComponent, StateSpace};
pub use path_planning::{RRTConfig, RRTPlanner};
