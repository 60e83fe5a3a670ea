//! Game layer: the owned `GameState`, the rules it is played under, and the
//! operations that drive it. `Game` bundles all of that with an RNG so a
//! front end only has to feed it directions.

mod session;
pub mod state;

pub use session::{Game, GameSummary};
pub use state::{
    GameState, MoveOutcome, Rules, TARGET_TILE, apply_move, check_terminal_state, reset,
    spawn_tile,
};
