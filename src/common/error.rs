//! Error types for terrain_pathfinder

use thiserror::Error;

use crate::common::types::GridCoord;

/// Main error type for configuration, search and terrain handling
#[derive(Debug, Error)]
pub enum PathfinderError {
    /// Missing or malformed argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Coordinate outside `[0, N-1] x [0, N-1]`
    #[error("Out of bounds: {coord} is outside a {dimension}x{dimension} grid")]
    OutOfBounds { coord: GridCoord, dimension: usize },
    /// Result queried before a successful search, or walker misuse
    #[error("Illegal state: {0}")]
    IllegalState(String),
    /// Frontier exhausted before the end cell was reached
    #[error("No path found from {start} to {end} after exploring {explored} cells")]
    PathNotFound {
        start: GridCoord,
        end: GridCoord,
        explored: usize,
    },
    /// Terrain could not be built or parsed
    #[error("Invalid terrain: {0}")]
    InvalidTerrain(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Visualization error
    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for pathfinder operations
pub type PathfinderResult<T> = Result<T, PathfinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PathfinderError::PathNotFound {
            start: GridCoord::new(0, 0),
            end: GridCoord::new(2, 2),
            explored: 3,
        };
        assert_eq!(
            format!("{}", err),
            "No path found from (0, 0) to (2, 2) after exploring 3 cells"
        );

        let err = PathfinderError::OutOfBounds { coord: GridCoord::new(5, -1), dimension: 4 };
        assert_eq!(format!("{}", err), "Out of bounds: (5, -1) is outside a 4x4 grid");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PathfinderError = io_err.into();
        assert!(matches!(err, PathfinderError::Io(_)));
    }
}
