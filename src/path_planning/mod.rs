// Motion planning algorithms module

pub mod rrt;

pub use rrt::*;
