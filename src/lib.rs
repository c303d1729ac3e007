//! terrain_pathfinder - weighted best-first route search on terrain grids
//!
//! This crate computes near-optimal routes between two cells of a square
//! grid whose cells carry variable traversal cost, and provides the
//! terrain model, priority queue, walker and plotting around it.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;
pub mod path_tracking;

// Re-export common types for convenience
pub use common::{GridCoord, GridPath};
pub use common::{CostModel, GridPathPlanner};
pub use common::{PathfinderError, PathfinderResult};
pub use path_planning::{Pathfinder, PathfinderConfig};
pub use path_tracking::Walker;
pub use utils::{MinPQ, RandomTerrainConfig, Terrain, TerrainConfig};
