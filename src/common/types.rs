//! Common types used throughout terrain_pathfinder

use std::fmt;
use std::str::FromStr;

use crate::common::error::PathfinderError;

/// Immutable (row, column) cell address on a square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub i: i32,
    pub j: i32,
}

impl GridCoord {
    pub fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }


    /// Inclusive range check on both axes
    pub fn in_bounds(&self, min_i: i32, min_j: i32, max_i: i32, max_j: i32) -> bool {
        self.i >= min_i && self.i <= max_i && self.j >= min_j && self.j <= max_j
    }

    pub fn manhattan(&self, other: &GridCoord) -> u32 {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j)
    }

    pub fn offset(&self, di: i32, dj: i32) -> Self {
        Self { i: self.i + di, j: self.j + dj }
    }

    /// Matrix index, valid only after a bounds check
    pub(crate) fn index(&self) -> (usize, usize) {
        (self.i as usize, self.j as usize)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from(tuple: (i32, i32)) -> Self {
        Self { i: tuple.0, j: tuple.1 }
    }
}

impl FromStr for GridCoord {
    type Err = PathfinderError;

    /// Parses `"i,j"` (surrounding whitespace and parentheses allowed)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (i, j) = trimmed
            .split_once(',')
            .ok_or_else(|| PathfinderError::InvalidArgument(format!("expected \"i,j\", got {:?}", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|e| PathfinderError::InvalidArgument(format!("bad coordinate {:?}: {}", s, e)))
        };
        Ok(Self::new(parse(i)?, parse(j)?))
    }
}

/// Path represented as a sequence of grid cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridPath {
    pub cells: Vec<GridCoord>,
}

impl GridPath {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn from_cells(cells: Vec<GridCoord>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Option<&GridCoord> {
        self.cells.first()
    }

    pub fn last(&self) -> Option<&GridCoord> {
        self.cells.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridCoord> {
        self.cells.iter()
    }

    pub fn rows(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.i as f64).collect()
    }

    pub fn cols(&self) -> Vec<f64> {
        self.cells.iter().map(|c| c.j as f64).collect()
    }

    /// Every consecutive pair differs by one unit on exactly one axis
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].manhattan(&w[1]) == 1)
    }
}

impl IntoIterator for GridPath {
    type Item = GridCoord;
    type IntoIter = std::vec::IntoIter<GridCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a GridPath {
    type Item = &'a GridCoord;
    type IntoIter = std::slice::Iter<'a, GridCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_in_bounds() {
        let c = GridCoord::new(2, 3);
        assert!(c.in_bounds(0, 0, 3, 3));
        assert!(!c.in_bounds(0, 0, 2, 2));
        assert!(!GridCoord::new(-1, 0).in_bounds(0, 0, 3, 3));
    }

    #[test]
    fn test_grid_coord_parse() {
        assert_eq!("3,4".parse::<GridCoord>().unwrap(), GridCoord::new(3, 4));
        assert_eq!(" (0, 7) ".parse::<GridCoord>().unwrap(), GridCoord::new(0, 7));
        assert!("3;4".parse::<GridCoord>().is_err());
        assert!("a,4".parse::<GridCoord>().is_err());
    }

    #[test]
    fn test_grid_path_contiguous() {
        let path = GridPath::from_cells(vec![(0, 1).into(), (1, 1).into(), (1, 2).into()]);
        assert!(path.is_contiguous());

        let diagonal = GridPath::from_cells(vec![(0, 0).into(), (1, 1).into()]);
        assert!(!diagonal.is_contiguous());
    }
}
