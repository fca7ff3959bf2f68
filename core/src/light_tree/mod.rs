//! Light Tree
//!
//! Importance based selection of a single light for a shading point. Emitters
//! are organized in a bounding volume hierarchy whose nodes bound both the
//! position and the emission directions of their lights; lights at infinity
//! are kept in a separate list.

use crate::stats::*;

mod distant;
mod importance;
#[cfg(test)]
mod mock;
mod node;
mod sample;
mod traversal;
mod tree;

// Re-export
pub use distant::*;
pub use importance::*;
pub use node::*;
pub use sample::*;
pub use traversal::*;
pub use tree::*;

stat_percent!(
    "Light Tree/Samples without a light",
    FAILED_SAMPLES,
    TOTAL_SAMPLES,
    light_tree_stats_failed,
);
stat_counter!(
    "Light Tree/Zero importance leaves",
    ZERO_IMPORTANCE_LEAVES,
    light_tree_stats_zero_leaves,
);
stat_int_distribution!(
    "Light Tree/Traversal depth",
    TRAVERSAL_DEPTH,
    light_tree_stats_depth,
);

stat_register_fns!(
    light_tree_stats_failed,
    light_tree_stats_zero_leaves,
    light_tree_stats_depth,
);
