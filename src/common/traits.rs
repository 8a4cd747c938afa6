//! Common traits defining interfaces for motion planning

use std::time::Duration;

use crate::base::StateSpace;
use crate::common::error::PlanningResult;
use crate::common::types::*;

/// Trait for single-query motion planners
pub trait MotionPlanner {
    /// Grow the search until `budget` elapses or the goal is reached
    fn solve(&mut self, budget: Duration) -> PlanningResult<PlannerStatus>;

    /// Drop all planner data, including the tree
    fn clear(&mut self);

    /// Every stored configuration, in the store's enumeration order
    fn get_states(&self) -> Vec<&Configuration>;
}

/// Feasibility oracle for single states and straight segments
pub trait StateValidityChecker {
    /// Check a single state
    fn is_valid(&self, state: &Configuration) -> bool;

    /// Check the segment from `from` to `to`.
    ///
    /// The default walks the segment at the finest component resolution and
    /// checks every intermediate state and `to`. `from` is assumed valid.
    fn check_motion(&self, space: &StateSpace, from: &Configuration, to: &Configuration) -> bool {
        let steps = space.motion_steps(from, to);
        (1..=steps).all(|j| {
            let state = space.interpolate(from, to, j as f64 / steps as f64);
            self.is_valid(&state)
        })
    }
}

/// Trait for visualizable algorithms
pub trait Visualizable {
    /// Draw current state to visualizer
    fn visualize(&self, vis: &mut crate::utils::Visualizer);
}
