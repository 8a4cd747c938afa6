//! Goal regions
//!
//! A goal answers whether a configuration satisfies it together with a
//! distance. Goals that can also produce configurations inside themselves
//! expose that through [`Goal::as_sampleable`].

use rand::{Rng, RngCore};

use crate::base::StateSpace;
use crate::common::{Configuration, PlanningResult, Solution};

/// Region of the state space the planner tries to reach
pub trait Goal {
    /// Whether `state` is inside the goal, and how far from it the state is
    fn is_satisfied(&self, state: &Configuration) -> (bool, f64);

    /// Sampling capability, if this goal has one
    fn as_sampleable(&self) -> Option<&dyn GoalSampleable> {
        None
    }

    /// Final verdict on what the planner produced. Accepts any path,
    /// exact or approximate, unless overridden.
    fn is_achieved(&self, solution: Option<&Solution>) -> bool {
        solution.is_some()
    }
}

/// Goal that can draw configurations from its own region
pub trait GoalSampleable: Goal {
    fn sample_goal(&self, rng: &mut dyn RngCore) -> Configuration;

    /// Whether `sample_goal` can currently produce anything
    fn can_sample(&self) -> bool {
        true
    }
}

/// A single goal configuration with a distance threshold
#[derive(Debug, Clone)]
pub struct GoalState {
    space: StateSpace,
    state: Configuration,
    threshold: f64,
}

impl GoalState {
    pub fn new(space: &StateSpace, state: Configuration, threshold: f64) -> PlanningResult<Self> {
        space.check_dimension(&state)?;
        Ok(Self {
            space: space.clone(),
            state,
            threshold,
        })
    }

    pub fn state(&self) -> &Configuration {
        &self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Goal for GoalState {
    fn is_satisfied(&self, state: &Configuration) -> (bool, f64) {
        let d = self.space.distance(state, &self.state);
        (d < self.threshold, d)
    }

    fn as_sampleable(&self) -> Option<&dyn GoalSampleable> {
        Some(self)
    }
}

impl GoalSampleable for GoalState {
    fn sample_goal(&self, _rng: &mut dyn RngCore) -> Configuration {
        self.state.clone()
    }
}

/// Several goal configurations; satisfied near any of them
#[derive(Debug, Clone)]
pub struct GoalStates {
    space: StateSpace,
    states: Vec<Configuration>,
    threshold: f64,
}

impl GoalStates {
    pub fn new(space: &StateSpace, threshold: f64) -> Self {
        Self {
            space: space.clone(),
            states: Vec::new(),
            threshold,
        }
    }

    pub fn add_state(&mut self, state: Configuration) -> PlanningResult<()> {
        self.space.check_dimension(&state)?;
        self.states.push(state);
        Ok(())
    }

    pub fn states(&self) -> &[Configuration] {
        &self.states
    }
}

impl Goal for GoalStates {
    fn is_satisfied(&self, state: &Configuration) -> (bool, f64) {
        let d = self
            .states
            .iter()
            .map(|g| self.space.distance(state, g))
            .fold(f64::INFINITY, f64::min);
        (d < self.threshold, d)
    }

    fn as_sampleable(&self) -> Option<&dyn GoalSampleable> {
        Some(self)
    }
}

impl GoalSampleable for GoalStates {
    fn sample_goal(&self, rng: &mut dyn RngCore) -> Configuration {
        let index = rng.gen_range(0..self.states.len());
        self.states[index].clone()
    }

    fn can_sample(&self) -> bool {
        !self.states.is_empty()
    }
}

/// Goal described by a caller-supplied distance function
pub struct GoalRegion {
    distance: Box<dyn Fn(&Configuration) -> f64>,
    threshold: f64,
}

impl GoalRegion {
    pub fn new(distance: impl Fn(&Configuration) -> f64 + 'static, threshold: f64) -> Self {
        Self {
            distance: Box::new(distance),
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Goal for GoalRegion {
    fn is_satisfied(&self, state: &Configuration) -> (bool, f64) {
        let d = (self.distance)(state);
        (d < self.threshold, d)
    }
}
