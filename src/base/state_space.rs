//! Configuration space descriptor
//!
//! A state space is a fixed list of components, each with bounds, a
//! resolution used for motion checking, and a kind that decides how
//! differences, distances and interpolation are computed.

use std::f64::consts::PI;

use nalgebra::Quaternion;
use rand::Rng;

use crate::common::{Configuration, PlanningError, PlanningResult};

/// Every bound span is split into this many steps for the default resolution
pub const DEFAULT_DIVISIONS: f64 = 100.0;

/// Largest deviation from unit norm a quaternion group may have and still
/// count as inside the bounds
pub const QUATERNION_NORM_TOLERANCE: f64 = 1e-6;

/// How a single dimension behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Plain real value
    Linear,
    /// Angle that wraps from `max` back to `min`
    WrappingAngle,
    /// One of four consecutive components (x, y, z, w) of a unit quaternion
    Quaternion,
}

/// One dimension of the state space
#[derive(Debug, Clone, PartialEq)]
pub struct StateComponent {
    pub kind: ComponentKind,
    pub min: f64,
    pub max: f64,
    /// Largest step taken when checking a motion along this dimension
    pub resolution: f64,
}

impl StateComponent {
    pub fn new(kind: ComponentKind, min: f64, max: f64) -> Self {
        Self {
            kind,
            min,
            max,
            resolution: (max - min) / DEFAULT_DIVISIONS,
        }
    }

    pub fn linear(min: f64, max: f64) -> Self {
        Self::new(ComponentKind::Linear, min, max)
    }

    /// Continuous angle in [-pi, pi)
    pub fn wrapping_angle() -> Self {
        Self::new(ComponentKind::WrappingAngle, -PI, PI)
    }

    /// The four components of a unit quaternion
    pub fn quaternion() -> [Self; 4] {
        [
            Self::new(ComponentKind::Quaternion, -1.0, 1.0),
            Self::new(ComponentKind::Quaternion, -1.0, 1.0),
            Self::new(ComponentKind::Quaternion, -1.0, 1.0),
            Self::new(ComponentKind::Quaternion, -1.0, 1.0),
        ]
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Bounded configuration space of fixed dimension
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    components: Vec<StateComponent>,
    // first index of every quaternion group
    quaternion_groups: Vec<usize>,
}

impl StateSpace {
    /// Build a space, rejecting empty spaces, inverted bounds and
    /// incomplete quaternion groups
    pub fn new(components: Vec<StateComponent>) -> PlanningResult<Self> {
        if components.is_empty() {
            return Err(PlanningError::InvalidParameter(
                "state space needs at least one component".to_string(),
            ));
        }

        for (index, c) in components.iter().enumerate() {
            if !(c.min.is_finite() && c.max.is_finite() && c.min < c.max) {
                return Err(PlanningError::InvalidBounds { index, min: c.min, max: c.max });
            }
            if !(c.resolution.is_finite() && c.resolution > 0.0) {
                return Err(PlanningError::InvalidParameter(format!(
                    "resolution of component {} must be positive, got {}",
                    index, c.resolution
                )));
            }
        }

        let mut quaternion_groups = Vec::new();
        let mut i = 0;
        while i < components.len() {
            if components[i].kind != ComponentKind::Quaternion {
                i += 1;
                continue;
            }
            let complete = i + 4 <= components.len()
                && components[i..i + 4].iter().all(|c| c.kind == ComponentKind::Quaternion);
            if !complete {
                return Err(PlanningError::InvalidParameter(format!(
                    "quaternion group starting at component {} needs four components",
                    i
                )));
            }
            quaternion_groups.push(i);
            i += 4;
        }

        Ok(Self { components, quaternion_groups })
    }

    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    pub fn components(&self) -> &[StateComponent] {
        &self.components
    }

    pub fn component(&self, index: usize) -> &StateComponent {
        &self.components[index]
    }

    pub fn check_dimension(&self, state: &Configuration) -> PlanningResult<()> {
        if state.dimension() != self.dimension() {
            return Err(PlanningError::DimensionMismatch {
                expected: self.dimension(),
                got: state.dimension(),
            });
        }
        Ok(())
    }

    /// Every value inside its bounds and every quaternion group of unit norm
    pub fn satisfies_bounds(&self, state: &Configuration) -> bool {
        state.dimension() == self.dimension()
            && self
                .components
                .iter()
                .zip(state.iter())
                .all(|(c, &v)| v >= c.min && v <= c.max)
            && self
                .quaternion_groups
                .iter()
                .all(|&g| (quaternion_at(state, g).norm() - 1.0).abs() <= QUATERNION_NORM_TOLERANCE)
    }

    /// Clamp linear values, wrap angles and re-normalize quaternions
    pub fn enforce_bounds(&self, state: &mut Configuration) {
        for (i, c) in self.components.iter().enumerate() {
            match c.kind {
                ComponentKind::Linear => state[i] = state[i].max(c.min).min(c.max),
                ComponentKind::WrappingAngle => state[i] = wrap(state[i], c.min, c.span()),
                ComponentKind::Quaternion => {}
            }
        }
        for &g in &self.quaternion_groups {
            let q = quaternion_at(state, g);
            let norm = q.norm();
            if norm > f64::EPSILON {
                set_quaternion(state, g, &(q / norm));
            } else {
                set_quaternion(state, g, &Quaternion::identity());
            }
        }
    }

    /// Signed difference `to - from` along one dimension, the short way
    /// around for wrapping angles
    pub fn difference(&self, index: usize, from: &Configuration, to: &Configuration) -> f64 {
        let c = &self.components[index];
        let d = to[index] - from[index];
        match c.kind {
            ComponentKind::WrappingAngle => wrap(d, -0.5 * c.span(), c.span()),
            _ => d,
        }
    }

    /// Euclidean distance over per-dimension differences. Quaternion groups
    /// are compared against whichever of `q` and `-q` is closer.
    pub fn distance(&self, a: &Configuration, b: &Configuration) -> f64 {
        let mut sum = 0.0;
        let mut i = 0;
        while i < self.components.len() {
            if self.components[i].kind == ComponentKind::Quaternion {
                let qa = quaternion_at(a, i);
                let qb = aligned(&qa, quaternion_at(b, i));
                sum += (qb - qa).norm_squared();
                i += 4;
            } else {
                let d = self.difference(i, a, b);
                sum += d * d;
                i += 1;
            }
        }
        sum.sqrt()
    }

    /// Copy of `state` with every quaternion group flipped, if needed, into
    /// the same hemisphere as the matching group of `reference`
    pub fn align_quaternions(&self, reference: &Configuration, state: &Configuration) -> Configuration {
        let mut out = state.clone();
        for &g in &self.quaternion_groups {
            let q = aligned(&quaternion_at(reference, g), quaternion_at(state, g));
            set_quaternion(&mut out, g, &q);
        }
        out
    }

    /// State at fraction `t` of the way from `from` to `to`
    pub fn interpolate(&self, from: &Configuration, to: &Configuration, t: f64) -> Configuration {
        let mut state = from.clone();
        for (i, c) in self.components.iter().enumerate() {
            match c.kind {
                ComponentKind::Linear => state[i] = from[i] + t * (to[i] - from[i]),
                ComponentKind::WrappingAngle => {
                    state[i] = wrap(from[i] + t * self.difference(i, from, to), c.min, c.span())
                }
                ComponentKind::Quaternion => {}
            }
        }
        for &g in &self.quaternion_groups {
            let qa = quaternion_at(from, g);
            let qb = aligned(&qa, quaternion_at(to, g));
            let q = qa.lerp(&qb, t);
            set_quaternion(&mut state, g, &(q / q.norm()));
        }
        state
    }

    /// Number of checks needed to walk from `from` to `to` at resolution
    pub fn motion_steps(&self, from: &Configuration, to: &Configuration) -> usize {
        let steps = self
            .components
            .iter()
            .enumerate()
            .map(|(i, c)| (self.difference(i, from, to).abs() / c.resolution).ceil())
            .fold(1.0, f64::max);
        steps as usize
    }

    /// Uniform sample over the bounds; quaternion groups are uniformly
    /// random unit quaternions
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Configuration {
        let mut state = Configuration::zeros(self.dimension());
        for (i, c) in self.components.iter().enumerate() {
            if c.kind != ComponentKind::Quaternion {
                state[i] = rng.gen_range(c.min..=c.max);
            }
        }
        for &g in &self.quaternion_groups {
            let (u1, u2, u3): (f64, f64, f64) = (rng.gen(), rng.gen(), rng.gen());
            let (s1, s2) = ((1.0 - u1).sqrt(), u1.sqrt());
            let q = Quaternion::new(
                s2 * (2.0 * PI * u3).cos(),
                s1 * (2.0 * PI * u2).sin(),
                s1 * (2.0 * PI * u2).cos(),
                s2 * (2.0 * PI * u3).sin(),
            );
            set_quaternion(&mut state, g, &q);
        }
        state
    }

    /// Per-dimension cap on a single steering step
    pub fn extension_ranges(&self, rho: f64) -> Vec<f64> {
        self.components.iter().map(|c| c.span() * rho).collect()
    }
}

/// Map `value` into `[min, min + span)`
fn wrap(value: f64, min: f64, span: f64) -> f64 {
    value - span * ((value - min) / span).floor()
}

fn quaternion_at(state: &Configuration, start: usize) -> Quaternion<f64> {
    Quaternion::new(state[start + 3], state[start], state[start + 1], state[start + 2])
}

fn set_quaternion(state: &mut Configuration, start: usize, q: &Quaternion<f64>) {
    state[start] = q.i;
    state[start + 1] = q.j;
    state[start + 2] = q.k;
    state[start + 3] = q.w;
}

fn aligned(reference: &Quaternion<f64>, q: Quaternion<f64>) -> Quaternion<f64> {
    if reference.dot(&q) < 0.0 {
        -q
    } else {
        q
    }
}
