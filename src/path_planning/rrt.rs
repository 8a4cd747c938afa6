//! RRT (Rapidly-exploring Random Tree) motion planning algorithm
//!
//! Single-tree, goal-biased RRT over an abstract configuration space.
//! The tree grows from every valid start state toward random samples,
//! one bounded steering step at a time, until the goal is reached or the
//! time budget runs out. The tree is kept between calls to `solve`, so
//! repeated calls keep enlarging it until `clear` is called.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info, trace, warn};

use crate::base::{
    LinearNearestNeighbors, Motion, MotionId, NearestNeighbors, SpaceInformation, StateSpace,
};
use crate::common::{
    Configuration, KinematicPath, MotionPlanner, PlannerStatus, PlanningError, PlanningResult,
    Solution, Visualizable,
};
use crate::utils::{colors, PathStyle, PointStyle, Visualizer};

/// Configuration for RRT planner
#[derive(Debug, Clone)]
pub struct RRTConfig {
    /// Fraction of each bound span one steering step may cover, in (0, 1]
    pub rho: f64,
    /// Probability of sampling from the goal instead of the whole space
    pub goal_bias: f64,
    /// Optional cap on loop iterations, on top of the time budget
    pub max_iterations: Option<usize>,
    /// Seed for the random source; drawn from entropy when `None`
    pub seed: Option<u64>,
}

impl Default for RRTConfig {
    fn default() -> Self {
        Self {
            rho: 0.5,
            goal_bias: 0.05,
            max_iterations: None,
            seed: None,
        }
    }
}

impl RRTConfig {
    pub fn validate(&self) -> PlanningResult<()> {
        if !(self.rho > 0.0 && self.rho <= 1.0) {
            return Err(PlanningError::InvalidParameter(format!(
                "rho must be in (0, 1], got {}",
                self.rho
            )));
        }
        if !(0.0..=1.0).contains(&self.goal_bias) {
            return Err(PlanningError::InvalidParameter(format!(
                "goal_bias must be in [0, 1], got {}",
                self.goal_bias
            )));
        }
        Ok(())
    }
}

/// RRT motion planner
pub struct RRTPlanner<NN = LinearNearestNeighbors> {
    si: SpaceInformation,
    config: RRTConfig,
    nn: NN,
    rng: ChaCha8Rng,
}

impl RRTPlanner<LinearNearestNeighbors> {
    /// Create a new RRT planner backed by a linear-scan tree store
    pub fn new(si: SpaceInformation, config: RRTConfig) -> PlanningResult<Self> {
        Self::with_nearest_neighbors(si, config, LinearNearestNeighbors::new())
    }
}

impl<NN: NearestNeighbors> RRTPlanner<NN> {
    /// Create a new RRT planner with a custom tree store
    pub fn with_nearest_neighbors(
        si: SpaceInformation,
        config: RRTConfig,
        nn: NN,
    ) -> PlanningResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self { si, config, nn, rng })
    }

    pub fn config(&self) -> &RRTConfig {
        &self.config
    }

    pub fn set_rho(&mut self, rho: f64) -> PlanningResult<()> {
        let config = RRTConfig { rho, ..self.config.clone() };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_goal_bias(&mut self, goal_bias: f64) -> PlanningResult<()> {
        let config = RRTConfig { goal_bias, ..self.config.clone() };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn space_information(&self) -> &SpaceInformation {
        &self.si
    }

    pub fn space_information_mut(&mut self) -> &mut SpaceInformation {
        &mut self.si
    }

    pub fn nearest_neighbors(&self) -> &NN {
        &self.nn
    }

    /// Number of motions in the tree
    pub fn tree_size(&self) -> usize {
        self.nn.size()
    }

    /// Every stored configuration with its parent's configuration
    pub fn get_tree(&self) -> Vec<(&Configuration, Option<&Configuration>)> {
        self.nn
            .list()
            .into_iter()
            .map(|id| {
                let motion = self.nn.get(id);
                let parent = motion.parent().map(|p| self.nn.get(p).state());
                (motion.state(), parent)
            })
            .collect()
    }

    /// Solve with a budget given in seconds
    pub fn solve_for_secs(&mut self, secs: f64) -> PlanningResult<PlannerStatus> {
        let budget = Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO);
        self.solve_until(budget, || false)
    }

    /// Solve until `budget` elapses, an exact solution is found, or
    /// `should_stop` returns true. `should_stop` is polled once per
    /// iteration, right next to the deadline check.
    pub fn solve_until<F>(&mut self, budget: Duration, mut should_stop: F) -> PlanningResult<PlannerStatus>
    where
        F: FnMut() -> bool,
    {
        // a budget too large to represent never expires
        let deadline = Instant::now().checked_add(budget);

        let goal = match self.si.goal() {
            Some(goal) => goal,
            None => {
                error!("RRT: Goal undefined");
                return Err(PlanningError::GoalUndefined);
            }
        };

        if self.nn.is_empty() {
            for start in self.si.start_states() {
                if self.si.satisfies_bounds(start) && self.si.is_valid(start) {
                    self.nn.add(Motion::root(start.clone()));
                } else {
                    error!("RRT: Initial state is invalid: {:?}", start.as_slice());
                }
            }
        }

        if self.nn.is_empty() {
            error!("RRT: There are no valid initial states");
            return Err(PlanningError::NoValidStartState);
        }

        info!("RRT: Starting with {} states", self.nn.size());

        let space = self.si.space();
        let ranges = space.extension_ranges(self.config.rho);
        let goal_sampler = goal.as_sampleable().filter(|s| s.can_sample());

        let mut solution: Option<MotionId> = None;
        let mut approx_solution: Option<MotionId> = None;
        let mut approx_dif = f64::INFINITY;
        let mut iterations = 0;

        while deadline.map_or(true, |d| Instant::now() < d) && !should_stop() {
            if self.config.max_iterations.map_or(false, |max| iterations >= max) {
                break;
            }
            iterations += 1;

            // sample random state (with goal biasing)
            let rstate = match goal_sampler {
                Some(sampler) if self.rng.gen::<f64>() < self.config.goal_bias => {
                    sampler.sample_goal(&mut self.rng)
                }
                _ => space.sample_uniform(&mut self.rng),
            };

            let nearest = match self.nn.nearest(space, &rstate) {
                Some(id) => id,
                None => break,
            };
            let nstate = self.nn.get(nearest).state();
            let xstate = steer(space, nstate, &rstate, &ranges);

            if !self.si.check_motion(nstate, &xstate) {
                continue;
            }

            let (satisfied, dist) = goal.is_satisfied(&xstate);
            let motion = self.nn.add(Motion::new(xstate, nearest));

            if satisfied {
                trace!("RRT: Goal satisfied after {} iterations", iterations);
                approx_dif = dist;
                solution = Some(motion);
                break;
            }
            if dist < approx_dif {
                approx_dif = dist;
                approx_solution = Some(motion);
            }
        }

        let (chosen, approximate) = match (solution, approx_solution) {
            (Some(id), _) => (Some(id), false),
            (None, Some(id)) => (Some(id), true),
            (None, None) => (None, false),
        };

        let solution = chosen.map(|id| Solution {
            path: build_path(&self.nn, id),
            approximate,
            difference: approx_dif,
        });

        if approximate {
            warn!("RRT: Found approximate solution, goal distance {}", approx_dif);
        }
        info!("RRT: Created {} states", self.nn.size());

        Ok(PlannerStatus {
            solved: goal.is_achieved(solution.as_ref()),
            solution,
        })
    }
}

impl<NN: NearestNeighbors> MotionPlanner for RRTPlanner<NN> {
    fn solve(&mut self, budget: Duration) -> PlanningResult<PlannerStatus> {
        self.solve_until(budget, || false)
    }

    fn clear(&mut self) {
        self.nn.clear();
    }

    fn get_states(&self) -> Vec<&Configuration> {
        self.nn
            .list()
            .into_iter()
            .map(|id| self.nn.get(id).state())
            .collect()
    }
}

impl<NN: NearestNeighbors> Visualizable for RRTPlanner<NN> {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_tree(&self.get_tree());
        let roots: Vec<&Configuration> = self
            .nn
            .list()
            .into_iter()
            .map(|id| self.nn.get(id))
            .filter(|m| m.is_root())
            .map(|m| m.state())
            .collect();
        let root_style = PointStyle::new(colors::START, "Roots").with_size(1.5).with_symbol('S');
        vis.plot_states(&roots, &root_style);
    }
}

/// Draw a solution path over a plotted tree
pub fn plot_solution(vis: &mut Visualizer, solution: &Solution) {
    let caption = if solution.approximate { "Approximate path" } else { "Path" };
    vis.plot_path(&solution.path, &PathStyle::new(colors::PATH, caption));
}

/// Step from `nearest` toward `sample`, moving at most `ranges[i]` along
/// each dimension. Dimensions within range take the sample's value.
/// Quaternion groups of the sample are first taken on the same side as
/// `nearest`, so the step heads toward the same rotation.
pub fn steer(
    space: &StateSpace,
    nearest: &Configuration,
    sample: &Configuration,
    ranges: &[f64],
) -> Configuration {
    let sample = space.align_quaternions(nearest, sample);
    let mut candidate = sample.clone();
    for (i, &range) in ranges.iter().enumerate() {
        let diff = space.difference(i, nearest, &sample);
        if diff.abs() > range {
            candidate[i] = nearest[i] + range.copysign(diff);
        }
    }
    space.enforce_bounds(&mut candidate);
    candidate
}

fn build_path<NN: NearestNeighbors>(nn: &NN, id: MotionId) -> KinematicPath {
    KinematicPath::from_states(
        nn.path_to_root(id)
            .into_iter()
            .map(|m| nn.get(m).state().clone())
            .collect(),
    )
}
