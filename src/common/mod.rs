//! Common types, traits, and error definitions for rust_motion_planning
//!
//! This module provides the foundational building blocks used across
//! the planner and its collaborators.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
