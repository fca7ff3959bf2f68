//! Statistics

mod accumulator;
#[macro_use]
mod macros;
mod registrar;

pub use accumulator::*;
pub use registrar::*;
