//! Behavioural tests of the RRT planner on small problems.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use rstest::rstest;

use rust_motion_planning::base::{
    FnStateValidityChecker, Goal, GoalRegion, GoalState, NearestNeighbors,
};
use rust_motion_planning::common::{Configuration, MotionPlanner, PlanningError};
use rust_motion_planning::{RRTConfig, RRTPlanner, SpaceInformation, StateComponent, StateSpace};

fn line() -> StateSpace {
    StateSpace::new(vec![StateComponent::linear(0.0, 10.0)]).unwrap()
}

fn plane() -> StateSpace {
    StateSpace::new(vec![
        StateComponent::linear(0.0, 10.0),
        StateComponent::linear(0.0, 10.0),
    ])
    .unwrap()
}

/// Wall at 4 <= x <= 6 with a gap above y = 8
fn wall_checker() -> FnStateValidityChecker<impl Fn(&Configuration) -> bool> {
    FnStateValidityChecker::new(|q: &Configuration| !(q[0] >= 4.0 && q[0] <= 6.0 && q[1] <= 8.0))
}

fn line_planner(seed: u64, goal: impl Goal + 'static) -> RRTPlanner {
    let mut si = SpaceInformation::new(line());
    si.add_start_state(Configuration::new(vec![0.0])).unwrap();
    si.set_goal(goal);
    let config = RRTConfig {
        seed: Some(seed),
        ..Default::default()
    };
    RRTPlanner::new(si, config).unwrap()
}

#[test]
fn finds_exact_solution_on_line_with_high_frequency() {
    let space = line();
    let exact = (0..20)
        .filter(|&seed| {
            let goal = GoalState::new(&space, Configuration::new(vec![10.0]), 0.5).unwrap();
            let mut planner = line_planner(seed, goal);
            let status = planner.solve(Duration::from_secs(1)).unwrap();
            status.solved && status.is_exact()
        })
        .count();
    assert!(exact >= 18, "only {} of 20 runs found an exact solution", exact);
}

#[test]
fn finds_exact_solution_without_goal_sampler() {
    let goal = GoalRegion::new(|q| (q[0] - 10.0).abs(), 0.5);
    let mut planner = line_planner(5, goal);
    let status = planner.solve(Duration::from_secs(1)).unwrap();
    assert!(status.is_exact());
}

#[test]
fn returned_path_is_valid_around_obstacle() {
    let space = plane();
    let mut si = SpaceInformation::new(space.clone()).with_validity_checker(wall_checker());
    si.add_start_state(Configuration::new(vec![1.0, 1.0])).unwrap();
    si.set_goal(GoalState::new(&space, Configuration::new(vec![9.0, 1.0]), 0.5).unwrap());
    let config = RRTConfig {
        rho: 0.1,
        seed: Some(11),
        ..Default::default()
    };
    let mut planner = RRTPlanner::new(si, config).unwrap();

    let status = planner.solve(Duration::from_secs(5)).unwrap();
    assert!(status.is_exact());
    let path = status.path().unwrap();
    let si = planner.space_information();
    assert!(si.check_path(path));
    // the only way across is through the gap
    assert!(path.states.iter().any(|q| q[0] >= 4.0 && q[0] <= 6.0 && q[1] > 8.0));
}

#[test]
fn approximate_distance_is_minimum_observed() {
    let best = Rc::new(Cell::new(f64::INFINITY));
    let observed = Rc::clone(&best);
    // unreachable target outside the bounds
    let goal = GoalRegion::new(
        move |q| {
            let d = (q[0] - 30.0).abs();
            observed.set(observed.get().min(d));
            d
        },
        0.5,
    );

    let mut si = SpaceInformation::new(line());
    si.add_start_state(Configuration::new(vec![0.0])).unwrap();
    si.set_goal(goal);
    let config = RRTConfig {
        rho: 0.05,
        max_iterations: Some(300),
        seed: Some(21),
        ..Default::default()
    };
    let mut planner = RRTPlanner::new(si, config).unwrap();

    let status = planner.solve(Duration::from_secs(60)).unwrap();
    let solution = status.solution.expect("approximate solution");
    assert!(solution.approximate);
    assert!(status.solved);
    assert_eq!(solution.difference, best.get());

    let last = solution.path.last().unwrap();
    assert_relative_eq!(solution.difference, (last[0] - 30.0).abs());
}

#[test]
fn path_runs_from_root_to_solution_node() {
    let space = plane();
    let mut si = SpaceInformation::new(space.clone()).with_validity_checker(wall_checker());
    si.add_start_state(Configuration::new(vec![1.0, 1.0])).unwrap();
    si.add_start_state(Configuration::new(vec![1.0, 9.0])).unwrap();
    si.set_goal(GoalState::new(&space, Configuration::new(vec![9.0, 5.0]), 0.5).unwrap());
    let config = RRTConfig {
        rho: 0.1,
        seed: Some(4),
        ..Default::default()
    };
    let mut planner = RRTPlanner::new(si, config).unwrap();
    let status = planner.solve(Duration::from_secs(5)).unwrap();
    let path = status.path().unwrap().clone();

    let nn = planner.nearest_neighbors();
    let end = nn
        .list()
        .into_iter()
        .rev()
        .find(|&id| nn.get(id).state() == path.last().unwrap())
        .unwrap();
    assert_eq!(path.len(), nn.depth(end) + 1);

    let roots = planner.space_information().start_states();
    assert!(roots.contains(path.first().unwrap()));
}

#[test]
fn fixed_seed_is_deterministic() {
    let run = || {
        let space = plane();
        let mut si = SpaceInformation::new(space).with_validity_checker(wall_checker());
        si.add_start_state(Configuration::new(vec![1.0, 1.0])).unwrap();
        si.set_goal(GoalRegion::new(|q| (q[0] - 20.0).abs(), 0.5));
        let config = RRTConfig {
            rho: 0.1,
            max_iterations: Some(400),
            seed: Some(77),
            ..Default::default()
        };
        let mut planner = RRTPlanner::new(si, config).unwrap();
        let status = planner.solve(Duration::from_secs(60)).unwrap();
        let states: Vec<Configuration> = planner.get_states().into_iter().cloned().collect();
        (status, states)
    };

    let (status_a, states_a) = run();
    let (status_b, states_b) = run();
    assert_eq!(states_a, states_b);
    assert_eq!(status_a, status_b);
}

#[test]
fn no_valid_starts_records_no_roots() {
    let space = plane();
    let mut si = SpaceInformation::new(space.clone()).with_validity_checker(wall_checker());
    si.add_start_state(Configuration::new(vec![5.0, 1.0])).unwrap();
    si.add_start_state(Configuration::new(vec![5.0, 5.0])).unwrap();
    si.set_goal(GoalState::new(&space, Configuration::new(vec![9.0, 1.0]), 0.5).unwrap());
    let mut planner = RRTPlanner::new(si, RRTConfig::default()).unwrap();

    let err = planner.solve(Duration::from_millis(100)).unwrap_err();
    assert!(matches!(err, PlanningError::NoValidStartState));
    assert_eq!(planner.tree_size(), 0);
}

#[rstest]
#[case(Duration::from_millis(0))]
#[case(Duration::from_millis(100))]
#[case(Duration::from_millis(300))]
fn finishes_within_budget(#[case] budget: Duration) {
    let goal = GoalRegion::new(|q| (q[0] - 30.0).abs(), 0.5);
    let mut planner = line_planner(8, goal);

    let started = Instant::now();
    let status = planner.solve(budget).unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < budget + Duration::from_millis(250), "took {:?}", elapsed);
    assert!(!status.is_exact());
}

#[test]
fn zero_budget_reports_failure() {
    let goal = GoalRegion::new(|q| (q[0] - 30.0).abs(), 0.5);
    let mut planner = line_planner(8, goal);
    let status = planner.solve(Duration::from_millis(0)).unwrap();
    assert!(!status.solved);
    assert!(status.solution.is_none());
    assert_eq!(planner.tree_size(), 1);
}
