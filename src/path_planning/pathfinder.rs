//! Weighted best-first pathfinder over a terrain cost grid
//!
//! Nodes are ordered by `g + w * c(n, goal)`, where `g` is the accumulated
//! travel cost from the start and `c(n, goal)` is the terrain's travel cost
//! from the node straight to the goal. That estimate is neither a lower bound
//! nor consistent, so the search behaves like weighted greedy best-first
//! rather than textbook A*.
//!
//! A cell is marked visited when it is pushed onto the frontier, not when it
//! is expanded. The first parent to discover a cell owns it for the rest of
//! the run and nodes are never reopened, so the returned path is near-optimal
//! rather than guaranteed minimal on non-uniform terrain.

use itertools::iproduct;
use nalgebra as na;
use tracing::{debug, info, trace};

use crate::common::{
    CostModel, GridCoord, GridPath, GridPathPlanner, PathfinderError, PathfinderResult,
};
use crate::utils::MinPQ;

/// Configuration for the pathfinder
#[derive(Debug, Clone)]
pub struct PathfinderConfig {
    /// Multiplier on the cost-to-goal term (0.0 = uniform-cost search)
    pub heuristic_weight: f64,
    /// Emit a progress trace every this many pops (0 disables)
    pub log_interval: usize,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 1.0,
            log_interval: 100,
        }
    }
}

/// One explored cell within a single run; immutable once created
#[derive(Debug, Clone)]
struct SearchNode {
    location: GridCoord,
    parent_index: Option<usize>,
    cost: f64,
    priority: f64,
}

/// Frontier entry pointing into the node arena
#[derive(Debug, Clone, Copy)]
struct NodeRef {
    index: usize,
    priority: f64,
}

pub struct Pathfinder<C: CostModel> {
    terrain: C,
    n: usize,
    config: PathfinderConfig,
    start: Option<GridCoord>,
    end: Option<GridCoord>,
    // Per-run state
    visited: na::DMatrix<bool>,
    nodes: Vec<SearchNode>,
    explored: usize,
    found: bool,
    end_index: Option<usize>,
}

impl<C: CostModel> Pathfinder<C> {
    /// Create a pathfinder with the default configuration
    pub fn new(terrain: C) -> Self {
        Self::with_config(terrain, PathfinderConfig::default())
    }

    /// Create a pathfinder with an explicit configuration
    pub fn with_config(terrain: C, config: PathfinderConfig) -> Self {
        let n = terrain.dimension();
        Pathfinder {
            terrain,
            n,
            config,
            start: None,
            end: None,
            visited: na::DMatrix::from_element(n, n, false),
            nodes: Vec::new(),
            explored: 0,
            found: false,
            end_index: None,
        }
    }

    /// The cost model searched over
    pub fn terrain(&self) -> &C {
        &self.terrain
    }

    /// Mutable terrain access for re-planning after a terrain change.
    /// The grid dimension must not change.
    pub fn terrain_mut(&mut self) -> &mut C {
        &mut self.terrain
    }

    /// Grid side length captured at construction
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Set the start cell; `None` or an out-of-grid cell is rejected
    pub fn set_start(&mut self, loc: impl Into<Option<GridCoord>>) -> PathfinderResult<()> {
        let loc = self.validate(loc.into(), "start")?;
        self.start = Some(loc);
        Ok(())
    }

    /// Configured start cell, if any
    pub fn start(&self) -> Option<GridCoord> {
        self.start
    }

    /// Set the end cell; `None` or an out-of-grid cell is rejected
    pub fn set_end(&mut self, loc: impl Into<Option<GridCoord>>) -> PathfinderResult<()> {
        let loc = self.validate(loc.into(), "end")?;
        self.end = Some(loc);
        Ok(())
    }

    /// Configured end cell, if any
    pub fn end(&self) -> Option<GridCoord> {
        self.end
    }

    /// Weight on the cost-to-goal term for subsequent runs
    pub fn set_heuristic_weight(&mut self, weight: f64) {
        self.config.heuristic_weight = weight;
    }

    /// Current weight on the cost-to-goal term
    pub fn heuristic_weight(&self) -> f64 {
        self.config.heuristic_weight
    }

    /// Discard the previous run. Start, end and weight are kept.
    pub fn reset(&mut self) {
        self.visited.fill(false);
        self.nodes.clear();
        self.explored = 0;
        self.found = false;
        self.end_index = None;
    }

    /// Search from start to end. Returns `PathNotFound` if the frontier
    /// empties before the end cell is popped.
    pub fn compute_path(&mut self) -> PathfinderResult<()> {
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(PathfinderError::InvalidArgument(
                    "start and end location must be set before computing a path".to_string(),
                ))
            }
        };
        if self.terrain.dimension() != self.n {
            return Err(PathfinderError::IllegalState(format!(
                "terrain dimension changed from {} to {}",
                self.n,
                self.terrain.dimension()
            )));
        }
        self.reset();
        debug!(%start, %end, weight = self.config.heuristic_weight, "path search started");

        let mut frontier: MinPQ<NodeRef> = MinPQ::new(|r| r.priority);
        let start_index = self.push_node(SearchNode {
            location: start,
            parent_index: None,
            cost: 0.0,
            priority: self.config.heuristic_weight,
        });
        frontier.insert(NodeRef {
            index: start_index,
            priority: self.nodes[start_index].priority,
        });
        self.visited[start.index()] = true;

        let mut iteration = 0usize;
        while let Some(current) = frontier.del_min() {
            iteration += 1;
            if self.config.log_interval > 0 && iteration % self.config.log_interval == 0 {
                trace!(
                    iteration,
                    frontier = frontier.len(),
                    explored = self.explored,
                    "search progress"
                );
            }

            let location = self.nodes[current.index].location;
            if location == end {
                self.found = true;
                self.end_index = Some(current.index);
                info!(
                    iterations = iteration,
                    explored = self.explored,
                    cost = self.nodes[current.index].cost,
                    "found goal"
                );
                return Ok(());
            }

            for child in self.expand(current.index, end) {
                let index = self.push_node(child);
                frontier.insert(NodeRef {
                    index,
                    priority: self.nodes[index].priority,
                });
            }
        }

        debug!(iterations = iteration, explored = self.explored, "frontier exhausted");
        Err(PathfinderError::PathNotFound {
            start,
            end,
            explored: self.explored,
        })
    }

    /// Whether the last run reached the end cell
    pub fn path_found(&self) -> bool {
        self.found
    }

    /// Accumulated travel cost of the path found by the last run
    pub fn path_cost(&self) -> PathfinderResult<f64> {
        let index = self.end_node()?;
        Ok(self.nodes[index].cost)
    }

    /// Number of cells that entered the frontier, excluding the start
    pub fn explored_count(&self) -> usize {
        self.explored
    }

    /// Whether the last run pushed `loc` onto the frontier (the start counts)
    pub fn was_visited(&self, loc: GridCoord) -> PathfinderResult<bool> {
        if !self.in_grid(loc) {
            return Err(PathfinderError::OutOfBounds {
                coord: loc,
                dimension: self.n,
            });
        }
        Ok(self.visited[loc.index()])
    }

    /// Cells marked visited by the current run, row-major
    pub fn visited_cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        iproduct!(0..self.n, 0..self.n)
            .filter(move |&(i, j)| self.visited[(i, j)])
            .map(|(i, j)| GridCoord::new(i as i32, j as i32))
    }

    /// Cells from the one after the start up to and including the end
    pub fn reconstruct_path(&self) -> PathfinderResult<GridPath> {
        let mut cells = Vec::new();
        let mut current_index = Some(self.end_node()?);

        while let Some(index) = current_index {
            let node = &self.nodes[index];
            if node.parent_index.is_none() {
                break;
            }
            cells.push(node.location);
            current_index = node.parent_index;
        }

        cells.reverse();
        Ok(GridPath::from_cells(cells))
    }

    fn expand(&mut self, parent_index: usize, end: GridCoord) -> Vec<SearchNode> {
        let parent = self.nodes[parent_index].clone();
        let max = self.n as i32 - 1;
        let mut children = Vec::with_capacity(4);

        for (di, dj) in Self::get_motion_model() {
            let next = parent.location.offset(di, dj);
            if !next.in_bounds(0, 0, max, max) || self.visited[next.index()] {
                continue;
            }

            let step = self.terrain.travel_cost(parent.location, next);
            if !step.is_finite() {
                continue;
            }

            let cost = parent.cost + step;
            let priority = cost + self.calc_heuristic(next, end);
            children.push(SearchNode {
                location: next,
                parent_index: Some(parent_index),
                cost,
                priority,
            });
            self.visited[next.index()] = true;
            self.explored += 1;
        }

        children
    }

    fn calc_heuristic(&self, from: GridCoord, end: GridCoord) -> f64 {
        let w = self.config.heuristic_weight;
        if w == 0.0 {
            return 0.0;
        }
        let remaining = self.terrain.travel_cost(from, end);
        if remaining == 0.0 {
            // keeps `inf * 0` from turning into NaN
            return 0.0;
        }
        w * remaining
    }

    fn get_motion_model() -> [(i32, i32); 4] {
        // right, left, up, down; order doubles as the tie-break
        [(1, 0), (-1, 0), (0, -1), (0, 1)]
    }

    fn push_node(&mut self, node: SearchNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn end_node(&self) -> PathfinderResult<usize> {
        match self.end_index {
            Some(index) if self.found => Ok(index),
            _ => Err(PathfinderError::IllegalState(
                "no path has been computed; call compute_path first".to_string(),
            )),
        }
    }

    fn in_grid(&self, loc: GridCoord) -> bool {
        let max = self.n as i32 - 1;
        loc.in_bounds(0, 0, max, max)
    }

    fn validate(&self, loc: Option<GridCoord>, which: &str) -> PathfinderResult<GridCoord> {
        let loc = loc.ok_or_else(|| {
            PathfinderError::InvalidArgument(format!("{} location cannot be absent", which))
        })?;
        if !self.in_grid(loc) {
            return Err(PathfinderError::OutOfBounds {
                coord: loc,
                dimension: self.n,
            });
        }
        Ok(loc)
    }
}

impl<C: CostModel> GridPathPlanner for Pathfinder<C> {
    fn plan(&mut self, start: GridCoord, goal: GridCoord) -> PathfinderResult<GridPath> {
        self.set_start(start)?;
        self.set_end(goal)?;
        self.compute_path()?;
        self.reconstruct_path()
    }
}
