//! Tree storage with nearest-neighbor lookup
//!
//! The store is also the arena that owns every motion of the search tree.
//! Parents are referenced by [`MotionId`], so the tree can only ever point
//! at nodes that were inserted before.

use ordered_float::OrderedFloat;

use crate::base::StateSpace;
use crate::common::Configuration;

/// Stable handle of a motion inside a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MotionId(pub usize);

/// Node of the search tree
#[derive(Debug, Clone)]
pub struct Motion {
    state: Configuration,
    parent: Option<MotionId>,
}

impl Motion {
    /// A root motion
    pub fn root(state: Configuration) -> Self {
        Self { state, parent: None }
    }

    pub fn new(state: Configuration, parent: MotionId) -> Self {
        Self {
            state,
            parent: Some(parent),
        }
    }

    pub fn state(&self) -> &Configuration {
        &self.state
    }

    pub fn parent(&self) -> Option<MotionId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Indexed set of motions supporting insertion and nearest lookup
pub trait NearestNeighbors {
    /// Insert a motion. Its parent, if any, must already be stored.
    fn add(&mut self, motion: Motion) -> MotionId;

    fn get(&self, id: MotionId) -> &Motion;

    /// Stored motion closest to `query` under the space metric
    fn nearest(&self, space: &StateSpace, query: &Configuration) -> Option<MotionId>;

    fn size(&self) -> usize;

    /// Every stored motion, in insertion order
    fn list(&self) -> Vec<MotionId>;

    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of edges between `id` and its root
    fn depth(&self, id: MotionId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent();
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent();
        }
        depth
    }

    /// Motions from the root of `id`'s tree down to `id`
    fn path_to_root(&self, id: MotionId) -> Vec<MotionId> {
        let mut ids = vec![id];
        let mut current = self.get(id).parent();
        while let Some(parent) = current {
            ids.push(parent);
            current = self.get(parent).parent();
        }
        ids.reverse();
        ids
    }
}

/// Linear scan over a vector of motions
#[derive(Debug, Clone, Default)]
pub struct LinearNearestNeighbors {
    motions: Vec<Motion>,
}

impl LinearNearestNeighbors {
    pub fn new() -> Self {
        Self { motions: Vec::new() }
    }
}

impl NearestNeighbors for LinearNearestNeighbors {
    fn add(&mut self, motion: Motion) -> MotionId {
        debug_assert!(motion.parent.map_or(true, |p| p.0 < self.motions.len()));
        self.motions.push(motion);
        MotionId(self.motions.len() - 1)
    }

    fn get(&self, id: MotionId) -> &Motion {
        &self.motions[id.0]
    }

    fn nearest(&self, space: &StateSpace, query: &Configuration) -> Option<MotionId> {
        // min_by_key keeps the first of equal minima
        self.motions
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| OrderedFloat(space.distance(&m.state, query)))
            .map(|(i, _)| MotionId(i))
    }

    fn size(&self) -> usize {
        self.motions.len()
    }

    fn list(&self) -> Vec<MotionId> {
        (0..self.motions.len()).map(MotionId).collect()
    }

    fn clear(&mut self) {
        self.motions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::StateComponent;

    fn line() -> StateSpace {
        StateSpace::new(vec![StateComponent::linear(0.0, 10.0)]).unwrap()
    }

    #[test]
    fn test_empty_store_has_no_nearest() {
        let nn = LinearNearestNeighbors::new();
        assert!(nn.is_empty());
        assert_eq!(nn.nearest(&line(), &Configuration::new(vec![1.0])), None);
    }

    #[test]
    fn test_nearest_and_ties() {
        let space = line();
        let mut nn = LinearNearestNeighbors::new();
        let a = nn.add(Motion::root(Configuration::new(vec![2.0])));
        let b = nn.add(Motion::new(Configuration::new(vec![4.0]), a));
        nn.add(Motion::new(Configuration::new(vec![8.0]), b));

        assert_eq!(nn.nearest(&space, &Configuration::new(vec![4.4])), Some(b));
        // equidistant from 2 and 4, first inserted wins
        assert_eq!(nn.nearest(&space, &Configuration::new(vec![3.0])), Some(a));
    }

    #[test]
    fn test_depth_and_path() {
        let mut nn = LinearNearestNeighbors::new();
        let a = nn.add(Motion::root(Configuration::new(vec![0.0])));
        let b = nn.add(Motion::new(Configuration::new(vec![1.0]), a));
        let c = nn.add(Motion::new(Configuration::new(vec![2.0]), b));
        let d = nn.add(Motion::root(Configuration::new(vec![9.0])));

        assert_eq!(nn.depth(c), 2);
        assert_eq!(nn.depth(d), 0);
        assert_eq!(nn.path_to_root(c), vec![a, b, c]);
        assert_eq!(nn.list(), vec![a, b, c, d]);

        nn.clear();
        assert_eq!(nn.size(), 0);
    }
}
