//! Error types for rust_motion_planning

use thiserror::Error;

/// Main error type for motion planning
#[derive(Error, Debug)]
pub enum PlanningError {
    /// No goal was set before solving
    #[error("Planning error: goal undefined")]
    GoalUndefined,
    /// Every provided start state was out of bounds or invalid
    #[error("Planning error: there are no valid initial states")]
    NoValidStartState,
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// State component bounds are inconsistent
    #[error("Invalid bounds for component {index}: min {min} must be below max {max}")]
    InvalidBounds {
        /// Component index
        index: usize,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Configuration dimension does not match the state space
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimension of the state space
        expected: usize,
        /// Dimension of the offending configuration
        got: usize,
    },
    /// Visualization error
    #[error("Visualization error: {0}")]
    VisualizationError(String),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;
