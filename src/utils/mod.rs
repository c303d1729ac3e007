//! Utility modules for terrain_pathfinder

pub mod grid_map;
pub mod priority_queue;
pub mod visualization;

pub use grid_map::*;
pub use priority_queue::MinPQ;
pub use visualization::{plot_search, colors, PathStyle, PointStyle, Visualizer};
