//! Everything a planner needs to know about the problem: the state space,
//! the validity checker, the start states and the goal.

use itertools::Itertools;

use crate::base::{Goal, StateSpace};
use crate::common::{Configuration, KinematicPath, PlanningResult, StateValidityChecker};

/// Validity checker that accepts every state
#[derive(Debug, Clone, Copy, Default)]
pub struct AllValidStateValidityChecker;

impl StateValidityChecker for AllValidStateValidityChecker {
    fn is_valid(&self, _state: &Configuration) -> bool {
        true
    }
}

/// Validity checker backed by a closure
pub struct FnStateValidityChecker<F> {
    check: F,
}

impl<F> FnStateValidityChecker<F>
where
    F: Fn(&Configuration) -> bool,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> StateValidityChecker for FnStateValidityChecker<F>
where
    F: Fn(&Configuration) -> bool,
{
    fn is_valid(&self, state: &Configuration) -> bool {
        (self.check)(state)
    }
}

/// Problem definition shared with planners
pub struct SpaceInformation {
    space: StateSpace,
    checker: Box<dyn StateValidityChecker>,
    start_states: Vec<Configuration>,
    goal: Option<Box<dyn Goal>>,
}

impl SpaceInformation {
    /// Space information that considers every in-bounds state valid
    pub fn new(space: StateSpace) -> Self {
        Self {
            space,
            checker: Box::new(AllValidStateValidityChecker),
            start_states: Vec::new(),
            goal: None,
        }
    }

    pub fn with_validity_checker(mut self, checker: impl StateValidityChecker + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    pub fn set_validity_checker(&mut self, checker: impl StateValidityChecker + 'static) {
        self.checker = Box::new(checker);
    }

    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    pub fn dimension(&self) -> usize {
        self.space.dimension()
    }

    pub fn add_start_state(&mut self, state: Configuration) -> PlanningResult<()> {
        self.space.check_dimension(&state)?;
        self.start_states.push(state);
        Ok(())
    }

    pub fn clear_start_states(&mut self) {
        self.start_states.clear();
    }

    pub fn start_states(&self) -> &[Configuration] {
        &self.start_states
    }

    pub fn set_goal(&mut self, goal: impl Goal + 'static) {
        self.goal = Some(Box::new(goal));
    }

    pub fn clear_goal(&mut self) {
        self.goal = None;
    }

    pub fn goal(&self) -> Option<&dyn Goal> {
        self.goal.as_deref()
    }

    pub fn satisfies_bounds(&self, state: &Configuration) -> bool {
        self.space.satisfies_bounds(state)
    }

    pub fn is_valid(&self, state: &Configuration) -> bool {
        self.checker.is_valid(state)
    }

    pub fn check_motion(&self, from: &Configuration, to: &Configuration) -> bool {
        self.checker.check_motion(&self.space, from, to)
    }

    pub fn distance(&self, a: &Configuration, b: &Configuration) -> f64 {
        self.space.distance(a, b)
    }

    /// Every state valid and every consecutive pair connected
    pub fn check_path(&self, path: &KinematicPath) -> bool {
        path.states.iter().all(|s| self.is_valid(s))
            && path
                .states
                .iter()
                .tuple_windows()
                .all(|(a, b)| self.check_motion(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{GoalState, StateComponent};
    use crate::common::PlanningError;

    fn si() -> SpaceInformation {
        let space = StateSpace::new(vec![
            StateComponent::linear(0.0, 10.0),
            StateComponent::linear(0.0, 10.0),
        ])
        .unwrap();
        SpaceInformation::new(space)
            .with_validity_checker(FnStateValidityChecker::new(|q: &Configuration| q[0] < 5.0 || q[1] > 8.0))
    }

    #[test]
    fn test_start_state_dimension_is_checked() {
        let mut si = si();
        let err = si.add_start_state(Configuration::new(vec![1.0])).unwrap_err();
        assert!(matches!(err, PlanningError::DimensionMismatch { expected: 2, got: 1 }));
        assert!(si.start_states().is_empty());
    }

    #[test]
    fn test_clear_start_states() {
        let mut si = si();
        si.add_start_state(Configuration::new(vec![1.0, 1.0])).unwrap();
        si.add_start_state(Configuration::new(vec![2.0, 2.0])).unwrap();
        assert_eq!(si.start_states().len(), 2);
        si.clear_start_states();
        assert!(si.start_states().is_empty());
    }

    #[test]
    fn test_goal_dimension_matches_space() {
        let err = GoalState::new(si().space(), Configuration::new(vec![9.0]), 0.5).unwrap_err();
        assert!(matches!(err, PlanningError::DimensionMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn test_goal_roundtrip() {
        let mut si = si();
        assert!(si.goal().is_none());
        let goal = GoalState::new(si.space(), Configuration::new(vec![9.0, 9.0]), 0.5).unwrap();
        si.set_goal(goal);
        assert!(si.goal().is_some());
        si.clear_goal();
        assert!(si.goal().is_none());
    }

    #[test]
    fn test_check_path() {
        let si = si();
        let around = KinematicPath::from_states(vec![
            Configuration::new(vec![1.0, 1.0]),
            Configuration::new(vec![1.0, 9.0]),
            Configuration::new(vec![9.0, 9.0]),
        ]);
        assert!(si.check_path(&around));

        let through = KinematicPath::from_states(vec![
            Configuration::new(vec![1.0, 1.0]),
            Configuration::new(vec![9.0, 1.0]),
        ]);
        assert!(!si.check_path(&through));
    }
}
