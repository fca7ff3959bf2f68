//! Lights

#[macro_use]
extern crate log;

mod distant;
mod mesh;
mod point;
mod scene;
mod spot;

// Re-export.
pub use distant::*;
pub use mesh::*;
pub use point::*;
pub use scene::*;
pub use spot::*;
