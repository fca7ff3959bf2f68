//! Common math

mod common;
mod fast;

// Re-export
pub use common::*;
pub use fast::*;
