// Path Tracking module

pub mod walker;

pub use walker::*;
