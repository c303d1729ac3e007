//! Common traits defining interfaces for grid search

use std::sync::Arc;

use crate::common::error::PathfinderResult;
use crate::common::types::{GridCoord, GridPath};

/// Terrain-dependent travel cost over a square grid
pub trait CostModel {
    /// Side length N of the grid
    fn dimension(&self) -> usize;

    /// Cost of travelling from `from` to `to`. Must be non-negative; may be
    /// infinite for impassable moves. Defined for any pair of in-bounds cells.
    fn travel_cost(&self, from: GridCoord, to: GridCoord) -> f64;
}

impl<C: CostModel + ?Sized> CostModel for &C {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn travel_cost(&self, from: GridCoord, to: GridCoord) -> f64 {
        (**self).travel_cost(from, to)
    }
}

impl<C: CostModel + ?Sized> CostModel for Arc<C> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn travel_cost(&self, from: GridCoord, to: GridCoord) -> f64 {
        (**self).travel_cost(from, to)
    }
}

/// Trait for grid-based path planning algorithms
pub trait GridPathPlanner {
    /// Plan a path on a grid from start to goal, excluding the start cell
    fn plan(&mut self, start: GridCoord, goal: GridCoord) -> PathfinderResult<GridPath>;
}
