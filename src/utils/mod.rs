//! Utility modules for rust_motion_planning

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
