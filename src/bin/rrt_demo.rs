//! RRT Motion Planning Example
//!
//! Plans through a planar world with two walls and plots the tree.

use std::time::Duration;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rust_motion_planning::base::{FnStateValidityChecker, GoalState};
use rust_motion_planning::common::{Configuration, MotionPlanner, Visualizable};
use rust_motion_planning::path_planning::{plot_solution, RRTConfig, RRTPlanner};
use rust_motion_planning::utils::Visualizer;
use rust_motion_planning::{SpaceInformation, StateComponent, StateSpace};

// (min corner, max corner)
const WALLS: [((f64, f64), (f64, f64)); 2] = [
    ((3.0, 0.0), (4.0, 7.0)),
    ((6.5, 3.0), (7.5, 10.0)),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("RRT motion planning start!!");

    let space = StateSpace::new(vec![
        StateComponent::linear(0.0, 10.0),
        StateComponent::linear(0.0, 10.0),
    ])?;

    let start = Configuration::new(vec![1.0, 1.0]);
    let goal = Configuration::new(vec![9.0, 1.0]);

    let checker = FnStateValidityChecker::new(|q: &Configuration| {
        WALLS.iter().all(|&((x0, y0), (x1, y1))| {
            !(q[0] >= x0 && q[0] <= x1 && q[1] >= y0 && q[1] <= y1)
        })
    });

    let mut si = SpaceInformation::new(space.clone()).with_validity_checker(checker);
    si.add_start_state(start.clone())?;
    si.set_goal(GoalState::new(&space, goal.clone(), 0.3)?);

    let config = RRTConfig {
        rho: 0.05,
        goal_bias: 0.05,
        seed: Some(2024),
        ..Default::default()
    };
    let mut planner = RRTPlanner::new(si, config)?;
    let status = planner.solve(Duration::from_secs(5))?;

    let mut vis = Visualizer::new();
    vis.set_title("RRT Motion Planning");
    vis.set_x_range(0.0, 10.0).set_y_range(0.0, 10.0);
    planner.visualize(&mut vis);
    for &(min, max) in WALLS.iter() {
        vis.plot_box(min, max);
    }
    vis.plot_start(&start);
    vis.plot_goal(&goal);

    match &status.solution {
        Some(solution) => {
            info!(
                "Path found with {} states (approximate: {}, goal distance: {:.3})",
                solution.path.len(),
                solution.approximate,
                solution.difference
            );
            plot_solution(&mut vis, solution);
        }
        None => warn!("Planning failed"),
    }
    info!("Tree size: {}", planner.get_states().len());

    if let Err(e) = vis.save_png("img/path_planning/rrt_result.png", 800, 600) {
        warn!("Could not save plot: {}", e);
    }
    if let Err(e) = vis.save_svg("img/path_planning/rrt_result.svg") {
        warn!("Could not save plot: {}", e);
    }
    if let Err(e) = vis.show() {
        warn!("Could not show plot: {}", e);
    }

    info!("RRT motion planning finish!!");
    Ok(())
}
