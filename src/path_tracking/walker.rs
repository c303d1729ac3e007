//! Step-by-step traversal of a computed path
//!
//! The walker only reports how long each step should take; sleeping or
//! animating is left to the caller.

use std::time::Duration;

use crate::common::{CostModel, GridCoord, GridPath, PathfinderError, PathfinderResult};

pub struct Walker<'a, C: CostModel> {
    terrain: &'a C,
    course: Vec<GridCoord>,
    // index of the occupied cell within `course`
    position: usize,
}

impl<'a, C: CostModel> Walker<'a, C> {
    /// `path` is a reconstructed path, which does not include `start`
    pub fn new(terrain: &'a C, start: GridCoord, path: &GridPath) -> PathfinderResult<Self> {
        if path.is_empty() {
            return Err(PathfinderError::InvalidArgument(
                "a walker needs at least one step after the start".to_string(),
            ));
        }
        let mut course = Vec::with_capacity(path.len() + 1);
        course.push(start);
        course.extend(path.iter().copied());

        Ok(Walker {
            terrain,
            course,
            position: 0,
        })
    }

    /// Cell the walker currently stands on
    pub fn location(&self) -> GridCoord {
        self.course[self.position]
    }

    /// Cell the next step leads into, `None` once the end is reached
    pub fn next_location(&self) -> Option<GridCoord> {
        self.course.get(self.position + 1).copied()
    }

    pub fn is_done(&self) -> bool {
        self.position + 1 >= self.course.len()
    }

    /// Time to cover the next step, in milliseconds of travel cost / speed
    pub fn step_duration(&self, speed: f64) -> PathfinderResult<Duration> {
        if speed <= 0.0 || !speed.is_finite() {
            return Err(PathfinderError::InvalidArgument(format!(
                "walking speed must be positive and finite, got {}",
                speed
            )));
        }
        let from = self.location();
        let to = self.next_location().ok_or_else(|| {
            PathfinderError::IllegalState(format!("walker already reached {}", from))
        })?;
        let millis = self.terrain.travel_cost(from, to) / speed;
        Duration::try_from_secs_f64(millis / 1000.0).map_err(|e| {
            PathfinderError::InvalidArgument(format!(
                "step {} -> {} has no finite duration: {}",
                from, to, e
            ))
        })
    }

    /// Take the next step; returns the pacing delay for the step just taken
    pub fn advance(&mut self, speed: f64) -> PathfinderResult<Duration> {
        let delay = self.step_duration(speed)?;
        self.position += 1;
        Ok(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Terrain;

    fn straight_path() -> GridPath {
        GridPath::from_cells(vec![(0, 1).into(), (0, 2).into(), (0, 3).into()])
    }

    #[test]
    fn test_walker_walks_to_end() {
        let terrain = Terrain::flat(4);
        let path = straight_path();
        let mut walker = Walker::new(&terrain, GridCoord::new(0, 0), &path).unwrap();

        assert_eq!(walker.location(), GridCoord::new(0, 0));
        assert_eq!(walker.next_location(), Some(GridCoord::new(0, 1)));

        let mut reached = Vec::new();
        while !walker.is_done() {
            let delay = walker.advance(0.5).unwrap();
            assert_eq!(delay, Duration::from_millis(2));
            reached.push(walker.location());
        }
        assert_eq!(reached, path.cells);
        assert_eq!(walker.next_location(), None);
        assert!(matches!(walker.advance(1.0), Err(PathfinderError::IllegalState(_))));
    }

    #[test]
    fn test_last_step_is_paced() {
        let mut terrain = Terrain::flat(3);
        terrain.set_elevation(GridCoord::new(0, 2), 9.0).unwrap();
        let path = GridPath::from_cells(vec![(0, 1).into(), (0, 2).into()]);
        let mut walker = Walker::new(&terrain, GridCoord::new(0, 0), &path).unwrap();

        let mut delays = Vec::new();
        while !walker.is_done() {
            delays.push(walker.advance(1.0).unwrap());
        }
        assert_eq!(delays, vec![Duration::from_millis(1), Duration::from_millis(10)]);
        assert_eq!(walker.location(), GridCoord::new(0, 2));
    }

    #[test]
    fn test_single_step_path() {
        let mut terrain = Terrain::flat(2);
        terrain.set_elevation(GridCoord::new(0, 1), 4.0).unwrap();
        let path = GridPath::from_cells(vec![(0, 1).into()]);
        let mut walker = Walker::new(&terrain, GridCoord::new(0, 0), &path).unwrap();

        assert!(!walker.is_done());
        assert_eq!(walker.step_duration(1.0).unwrap(), Duration::from_millis(5));
        assert_eq!(walker.advance(1.0).unwrap(), Duration::from_millis(5));
        assert!(walker.is_done());
        assert_eq!(walker.location(), GridCoord::new(0, 1));
    }

    #[test]
    fn test_walker_rejects_bad_input() {
        let terrain = Terrain::flat(2);
        assert!(Walker::new(&terrain, GridCoord::new(0, 0), &GridPath::new()).is_err());

        let path = GridPath::from_cells(vec![(0, 1).into()]);
        let mut walker = Walker::new(&terrain, GridCoord::new(0, 0), &path).unwrap();
        assert!(walker.step_duration(0.0).is_err());
        assert!(walker.step_duration(f64::NAN).is_err());
        assert!(walker.advance(-1.0).is_err());
        assert_eq!(walker.location(), GridCoord::new(0, 0));
    }
}
