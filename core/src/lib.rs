//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
#[macro_use]
pub mod stats;
pub mod geometry;
pub mod light;
pub mod light_distrib;
pub mod light_tree;
pub mod math;
pub mod rng;
pub mod sampling;
