// Path Planning algorithms module

pub mod pathfinder;

pub use pathfinder::*;
