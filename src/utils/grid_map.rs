//! Terrain grid used as the travel-cost model for the pathfinder
//!
//! Each cell carries an elevation; walls are impassable. Moving between two
//! cells costs their Manhattan distance scaled by the elevation change, so a
//! flat terrain is a uniform-cost grid.

use itertools::iproduct;
use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::common::{CostModel, GridCoord, PathfinderError, PathfinderResult};

/// Travel-cost parameters
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Extra cost per unit of elevation change (0.0 = flat costs everywhere)
    pub climb_weight: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self { climb_weight: 1.0 }
    }
}

/// Parameters for seeded random terrain generation
#[derive(Debug, Clone)]
pub struct RandomTerrainConfig {
    pub mean_elevation: f64,
    pub elevation_std_dev: f64,
    /// Probability that a cell becomes a wall
    pub wall_probability: f64,
    pub terrain: TerrainConfig,
}

impl Default for RandomTerrainConfig {
    fn default() -> Self {
        Self {
            mean_elevation: 5.0,
            elevation_std_dev: 2.0,
            wall_probability: 0.0,
            terrain: TerrainConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Terrain {
    elevation: na::DMatrix<f64>,
    walls: na::DMatrix<bool>,
    config: TerrainConfig,
}

impl Terrain {
    /// Flat N x N terrain: every adjacent move costs 1
    pub fn flat(n: usize) -> Self {
        Self {
            elevation: na::DMatrix::zeros(n, n),
            walls: na::DMatrix::from_element(n, n, false),
            config: TerrainConfig::default(),
        }
    }

    /// Wall-free terrain from a square matrix of finite elevations
    pub fn from_elevations(elevation: na::DMatrix<f64>, config: TerrainConfig) -> PathfinderResult<Self> {
        if elevation.nrows() != elevation.ncols() {
            return Err(PathfinderError::InvalidTerrain(format!(
                "terrain must be square, got {}x{}",
                elevation.nrows(),
                elevation.ncols()
            )));
        }
        if elevation.iter().any(|h| !h.is_finite()) {
            return Err(PathfinderError::InvalidTerrain("elevations must be finite".to_string()));
        }
        let n = elevation.nrows();
        Ok(Self {
            elevation,
            walls: na::DMatrix::from_element(n, n, false),
            config,
        })
    }

    /// Seeded random terrain; the same seed always yields the same terrain
    pub fn random(n: usize, seed: u64, config: &RandomTerrainConfig) -> PathfinderResult<Self> {
        if !(0.0..=1.0).contains(&config.wall_probability) {
            return Err(PathfinderError::InvalidArgument(format!(
                "wall probability must be in [0, 1], got {}",
                config.wall_probability
            )));
        }
        let normal = Normal::new(config.mean_elevation, config.elevation_std_dev)
            .map_err(|e| PathfinderError::InvalidArgument(format!("elevation distribution: {}", e)))?;
        let mut rng = StdRng::seed_from_u64(seed);

        let elevation = na::DMatrix::from_fn(n, n, |_, _| normal.sample(&mut rng).max(0.0));
        let walls = na::DMatrix::from_fn(n, n, |_, _| rng.gen_bool(config.wall_probability));

        Ok(Self {
            elevation,
            walls,
            config: config.terrain.clone(),
        })
    }

    /// Parse an ASCII map: one row per line, `0`-`9` elevation, `.` flat, `#` wall
    pub fn parse(text: &str, config: TerrainConfig) -> PathfinderResult<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let n = rows.len();
        if n == 0 {
            return Err(PathfinderError::InvalidTerrain("map is empty".to_string()));
        }

        let mut terrain = Self::flat(n);
        terrain.config = config;
        for (i, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != n {
                return Err(PathfinderError::InvalidTerrain(format!(
                    "row {} has {} cells, expected {}",
                    i, width, n
                )));
            }
            for (j, ch) in row.chars().enumerate() {
                match ch {
                    '#' => terrain.walls[(i, j)] = true,
                    '.' => {}
                    d if d.is_ascii_digit() => {
                        terrain.elevation[(i, j)] = f64::from(d as u8 - b'0');
                    }
                    other => {
                        return Err(PathfinderError::InvalidTerrain(format!(
                            "unexpected character {:?} at ({}, {})",
                            other, i, j
                        )))
                    }
                }
            }
        }
        Ok(terrain)
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn set_climb_weight(&mut self, climb_weight: f64) {
        self.config.climb_weight = climb_weight;
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        let max = self.elevation.nrows() as i32 - 1;
        coord.in_bounds(0, 0, max, max)
    }

    pub fn elevation(&self, coord: GridCoord) -> PathfinderResult<f64> {
        self.check(coord)?;
        Ok(self.elevation[coord.index()])
    }

    pub fn set_elevation(&mut self, coord: GridCoord, elevation: f64) -> PathfinderResult<()> {
        self.check(coord)?;
        if !elevation.is_finite() {
            return Err(PathfinderError::InvalidArgument(format!(
                "elevation at {} must be finite, got {}",
                coord, elevation
            )));
        }
        self.elevation[coord.index()] = elevation;
        Ok(())
    }

    pub fn is_wall(&self, coord: GridCoord) -> PathfinderResult<bool> {
        self.check(coord)?;
        Ok(self.walls[coord.index()])
    }

    pub fn set_wall(&mut self, coord: GridCoord, wall: bool) -> PathfinderResult<()> {
        self.check(coord)?;
        self.walls[coord.index()] = wall;
        Ok(())
    }

    /// All wall cells in row-major order
    pub fn walls(&self) -> Vec<GridCoord> {
        let n = self.dimension();
        iproduct!(0..n, 0..n)
            .filter(|&(i, j)| self.walls[(i, j)])
            .map(|(i, j)| GridCoord::new(i as i32, j as i32))
            .collect()
    }

    fn check(&self, coord: GridCoord) -> PathfinderResult<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(PathfinderError::OutOfBounds {
                coord,
                dimension: self.dimension(),
            })
        }
    }
}

impl CostModel for Terrain {
    fn dimension(&self) -> usize {
        self.elevation.nrows()
    }

    fn travel_cost(&self, from: GridCoord, to: GridCoord) -> f64 {
        if from == to {
            return 0.0;
        }
        if !self.contains(from) || !self.contains(to) {
            return f64::INFINITY;
        }
        if self.walls[from.index()] || self.walls[to.index()] {
            return f64::INFINITY;
        }
        let climb = (self.elevation[to.index()] - self.elevation[from.index()]).abs();
        from.manhattan(&to) as f64 * (1.0 + self.config.climb_weight * climb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_terrain_costs_manhattan() {
        let terrain = Terrain::flat(5);
        assert_eq!(terrain.dimension(), 5);
        assert_eq!(terrain.travel_cost(GridCoord::new(0, 0), GridCoord::new(0, 1)), 1.0);
        assert_eq!(terrain.travel_cost(GridCoord::new(0, 0), GridCoord::new(3, 4)), 7.0);
        assert_eq!(terrain.travel_cost(GridCoord::new(2, 2), GridCoord::new(2, 2)), 0.0);
    }

    #[test]
    fn test_climb_scales_cost() {
        let mut terrain = Terrain::flat(3);
        terrain.set_elevation(GridCoord::new(0, 1), 3.0).unwrap();
        assert_eq!(terrain.travel_cost(GridCoord::new(0, 0), GridCoord::new(0, 1)), 4.0);
        assert_eq!(terrain.travel_cost(GridCoord::new(0, 1), GridCoord::new(0, 0)), 4.0);

        terrain.set_climb_weight(0.5);
        assert_eq!(terrain.travel_cost(GridCoord::new(0, 0), GridCoord::new(0, 1)), 2.5);
    }

    #[test]
    fn test_walls_are_impassable() {
        let mut terrain = Terrain::flat(3);
        terrain.set_wall(GridCoord::new(1, 1), true).unwrap();
        assert!(terrain.travel_cost(GridCoord::new(0, 1), GridCoord::new(1, 1)).is_infinite());
        assert!(terrain.travel_cost(GridCoord::new(1, 1), GridCoord::new(1, 2)).is_infinite());
        assert_eq!(terrain.walls(), vec![GridCoord::new(1, 1)]);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut terrain = Terrain::flat(2);
        assert!(matches!(
            terrain.set_wall(GridCoord::new(2, 0), true),
            Err(PathfinderError::OutOfBounds { dimension: 2, .. })
        ));
        assert!(terrain.elevation(GridCoord::new(0, -1)).is_err());
    }

    #[test]
    fn test_parse_map() {
        let terrain = Terrain::parse("0.#\n.5.\n#..\n", TerrainConfig::default()).unwrap();
        assert_eq!(terrain.dimension(), 3);
        assert_eq!(terrain.elevation(GridCoord::new(1, 1)).unwrap(), 5.0);
        assert_eq!(terrain.walls(), vec![GridCoord::new(0, 2), GridCoord::new(2, 0)]);
    }

    #[test]
    fn test_parse_rejects_bad_maps() {
        assert!(matches!(
            Terrain::parse("", TerrainConfig::default()),
            Err(PathfinderError::InvalidTerrain(_))
        ));
        assert!(Terrain::parse("..\n...\n", TerrainConfig::default()).is_err());
        assert!(Terrain::parse("ab\ncd\n", TerrainConfig::default()).is_err());
    }

    #[test]
    fn test_from_elevations() {
        let elevation = na::DMatrix::from_row_slice(2, 2, &[0.0, 2.0, 1.0, 1.0]);
        let terrain = Terrain::from_elevations(elevation, TerrainConfig { climb_weight: 0.5 }).unwrap();

        assert_eq!(terrain.dimension(), 2);
        assert_eq!(terrain.config().climb_weight, 0.5);
        assert!(terrain.walls().is_empty());
        assert_eq!(terrain.travel_cost(GridCoord::new(0, 0), GridCoord::new(0, 1)), 2.0);
        assert_eq!(terrain.travel_cost(GridCoord::new(0, 0), GridCoord::new(1, 0)), 1.5);
        assert_eq!(terrain.travel_cost(GridCoord::new(1, 0), GridCoord::new(1, 1)), 1.0);
    }

    #[test]
    fn test_from_elevations_rejects_bad_input() {
        let wide = na::DMatrix::from_element(2, 3, 1.0);
        assert!(matches!(
            Terrain::from_elevations(wide, TerrainConfig::default()),
            Err(PathfinderError::InvalidTerrain(_))
        ));

        let mut holey = na::DMatrix::from_element(3, 3, 1.0);
        holey[(1, 2)] = f64::NAN;
        assert!(matches!(
            Terrain::from_elevations(holey, TerrainConfig::default()),
            Err(PathfinderError::InvalidTerrain(_))
        ));

        let mut steep = na::DMatrix::from_element(2, 2, 0.0);
        steep[(0, 0)] = f64::INFINITY;
        assert!(Terrain::from_elevations(steep, TerrainConfig::default()).is_err());
    }

    #[test]
    fn test_random_terrain_is_seeded() {
        let config = RandomTerrainConfig {
            wall_probability: 0.2,
            ..Default::default()
        };
        let a = Terrain::random(8, 42, &config).unwrap();
        let b = Terrain::random(8, 42, &config).unwrap();
        assert_eq!(a.walls(), b.walls());
        for (i, j) in iproduct!(0..8, 0..8) {
            let c = GridCoord::new(i, j);
            assert_eq!(a.elevation(c).unwrap(), b.elevation(c).unwrap());
            assert!(a.elevation(c).unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_random_terrain_rejects_bad_probability() {
        let config = RandomTerrainConfig {
            wall_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            Terrain::random(4, 1, &config),
            Err(PathfinderError::InvalidArgument(_))
        ));
    }
}
