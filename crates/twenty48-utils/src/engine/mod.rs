//! Engine module: compact 2048 board, line slide/merge, and precomputed
//! lookup tables. Public API stays small and ergonomic.
//!
//! - `Board` is the packed 4x4 state with useful methods.
//! - `slide_line` is the per-line merge pass the tables are built from.
//! - Internals (tables and hot ops) live in submodules to keep things tidy.

mod ops;
pub mod state;
mod tables;

pub use state::{
    Board, DEFAULT_FOUR_PROBABILITY, Direction, Grid, MAX_EXPONENT, exponent_to_value,
    value_to_exponent,
};

pub use ops::{
    LineShift, can_move, count_empty, get_highest_tile_val, get_tile_val, has_adjacent_pair,
    shift, slide_line,
};

/// Build the internal lookup tables now instead of on the first move.
/// Safe to call multiple times.
pub fn new() {
    tables::init();
}
