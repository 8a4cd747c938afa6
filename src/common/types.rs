//! Common types used throughout rust_motion_planning

use std::ops::{Index, IndexMut};

use itertools::Itertools;
use nalgebra::DVector;

use crate::base::StateSpace;

/// A point in configuration space
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration(DVector<f64>);

impl Configuration {
    pub fn new(values: Vec<f64>) -> Self {
        Self(DVector::from_vec(values))
    }

    pub fn zeros(dimension: usize) -> Self {
        Self(DVector::zeros(dimension))
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }
}

impl Index<usize> for Configuration {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Configuration {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl From<Vec<f64>> for Configuration {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<DVector<f64>> for Configuration {
    fn from(v: DVector<f64>) -> Self {
        Self(v)
    }
}

/// Path represented as a sequence of configurations, start first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KinematicPath {
    pub states: Vec<Configuration>,
}

impl KinematicPath {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub fn from_states(states: Vec<Configuration>) -> Self {
        Self { states }
    }

    pub fn push(&mut self, state: Configuration) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> Option<&Configuration> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&Configuration> {
        self.states.last()
    }

    /// Values of one dimension along the path, used for plotting
    pub fn coords(&self, dimension: usize) -> Vec<f64> {
        self.states.iter().map(|s| s[dimension]).collect()
    }

    /// Sum of segment lengths under the space metric
    pub fn length(&self, space: &StateSpace) -> f64 {
        self.states
            .iter()
            .tuple_windows()
            .map(|(a, b)| space.distance(a, b))
            .sum()
    }
}

/// Outcome of a single planner invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Configurations from a root to the solution node
    pub path: KinematicPath,
    /// True when the path ends at the closest node rather than inside the goal
    pub approximate: bool,
    /// Goal distance achieved by the last configuration of the path
    pub difference: f64,
}

/// Status reported by a planner after `solve`
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerStatus {
    /// The goal's own verdict on the solution
    pub solved: bool,
    pub solution: Option<Solution>,
}

impl PlannerStatus {
    pub fn is_exact(&self) -> bool {
        self.solution.as_ref().map_or(false, |s| !s.approximate)
    }

    pub fn is_approximate(&self) -> bool {
        self.solution.as_ref().map_or(false, |s| s.approximate)
    }

    pub fn path(&self) -> Option<&KinematicPath> {
        self.solution.as_ref().map(|s| &s.path)
    }
}
