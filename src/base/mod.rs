//! Planning collaborators: state space, goals, tree storage and the
//! problem definition handed to planners.

pub mod state_space;
pub mod goal;
pub mod nearest_neighbors;
pub mod space_information;

pub use state_space::*;
pub use goal::*;
pub use nearest_neighbors::*;
pub use space_information::*;
