//! Common types, traits, and error definitions for terrain_pathfinder
//!
//! This module provides the foundational building blocks shared by the
//! search engine, the terrain model and the walker.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
