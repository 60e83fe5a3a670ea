use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, DEFAULT_FOUR_PROBABILITY, Direction, Grid, MAX_EXPONENT};
use crate::error::EngineError;

/// Tile value that wins the game under the default rules.
pub const TARGET_TILE: u32 = 2048;

/// Tunable rules for a game. The defaults are the classic game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Reaching this tile wins and ends the game.
    #[serde(default = "defaults::target_tile")]
    pub target_tile: u32,
    /// Chance that a spawned tile is a 4 instead of a 2.
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            target_tile: defaults::target_tile(),
            four_probability: defaults::four_probability(),
        }
    }
}

impl Rules {
    /// Check the rules can be played on a packed board.
    pub fn validate(&self) -> Result<(), EngineError> {
        let t = self.target_tile;
        if !t.is_power_of_two() || !(2..=MAX_EXPONENT).contains(&t.trailing_zeros()) {
            return Err(EngineError::InvalidTarget(t));
        }
        let p = self.four_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(EngineError::InvalidProbability(p));
        }
        Ok(())
    }
}

mod defaults {
    pub fn target_tile() -> u32 { super::TARGET_TILE }
    pub fn four_probability() -> f64 { super::DEFAULT_FOUR_PROBABILITY }
}

/// Everything the presentation layer needs to draw a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub score: u64,
    /// Latched once the game ends, by winning or by running out of moves.
    pub game_over: bool,
    /// Latched once the target tile appears.
    pub won: bool,
}

impl GameState {
    /// Tile values of the current board.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.board.to_grid()
    }
}

/// Result of one `apply_move` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True iff at least one row/column changed.
    pub moved: bool,
    /// Sum of merged tile values produced by the move.
    pub score_delta: u64,
}

impl MoveOutcome {
    /// The outcome of a move that did nothing.
    pub const NONE: MoveOutcome = MoveOutcome {
        moved: false,
        score_delta: 0,
    };
}

/// Start a new game: empty board, zero score, then two spawned tiles.
pub fn reset<R: Rng + ?Sized>(rules: &Rules, rng: &mut R) -> GameState {
    let mut state = GameState::default();
    spawn_tile(&mut state.board, rules, rng);
    spawn_tile(&mut state.board, rules, rng);
    state
}

/// Place a 2 or 4 on a uniformly chosen empty cell.
///
/// Returns `false` and leaves the board untouched when it is full.
pub fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rules: &Rules, rng: &mut R) -> bool {
    if board.count_empty() == 0 {
        return false;
    }
    *board = board.with_random_tile_weighted(rng, rules.four_probability);
    true
}

/// Slide every line of the board toward `direction`.
///
/// The state is only touched when something moved. Once the game is over
/// this is a no-op. Spawning and the terminal check are left to the caller.
pub fn apply_move(state: &mut GameState, direction: Direction) -> MoveOutcome {
    if state.game_over {
        return MoveOutcome::NONE;
    }
    let (board, score_delta) = state.board.shift_scored(direction);
    if board == state.board {
        return MoveOutcome::NONE;
    }
    state.board = board;
    state.score += score_delta;
    MoveOutcome {
        moved: true,
        score_delta,
    }
}

/// Latch `won`/`game_over` from the current board.
///
/// The target tile wins even with empty cells left. Otherwise the game only
/// ends on a full board with no equal neighbours.
pub fn check_terminal_state(state: &mut GameState, rules: &Rules) {
    if state.board.contains(rules.target_tile) {
        state.won = true;
        state.game_over = true;
        return;
    }
    if state.board.count_empty() > 0 {
        return;
    }
    if state.board.has_adjacent_pair() {
        return;
    }
    state.game_over = true;
}
