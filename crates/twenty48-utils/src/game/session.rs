use log::{debug, info};
use rand::Rng;

use super::state::{self, GameState, MoveOutcome, Rules};
use crate::engine::Direction;
use crate::error::EngineError;

/// Summary for a finished (or abandoned) game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub moves: u64,
    pub score: u64,
    pub highest_tile: u32,
    pub won: bool,
}

/// One running game: its state, rules, RNG and move counter.
///
/// `step` runs the whole move pipeline (move, spawn, terminal check) before
/// returning, so the next input always sees a settled board.
pub struct Game<R> {
    state: GameState,
    rules: Rules,
    rng: R,
    moves: u64,
}

impl<R: Rng> Game<R> {
    /// Validate `rules` and start a fresh game.
    pub fn new(rules: Rules, mut rng: R) -> Result<Self, EngineError> {
        rules.validate()?;
        let state = state::reset(&rules, &mut rng);
        Ok(Self {
            state,
            rules,
            rng,
            moves: 0,
        })
    }

    /// Resume from an existing state, e.g. a hand-built position.
    pub fn from_state(state: GameState, rules: Rules, rng: R) -> Result<Self, EngineError> {
        rules.validate()?;
        Ok(Self {
            state,
            rules,
            rng,
            moves: 0,
        })
    }

    /// Apply one move. Spawns a tile and re-checks the terminal state only
    /// when the board changed.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = state::apply_move(&mut self.state, direction);
        if !outcome.moved {
            return outcome;
        }
        state::spawn_tile(&mut self.state.board, &self.rules, &mut self.rng);
        state::check_terminal_state(&mut self.state, &self.rules);
        self.moves += 1;
        debug!(
            "move {} {direction}: +{} (score {})",
            self.moves, outcome.score_delta, self.state.score
        );
        if self.state.game_over {
            let s = self.summary();
            if s.won {
                info!("reached {} in {} moves, score {}", self.rules.target_tile, s.moves, s.score);
            } else {
                info!(
                    "no moves left after {} moves, score {}, highest tile {}",
                    s.moves, s.score, s.highest_tile
                );
            }
        }
        outcome
    }

    /// Throw the current game away and start over with the same rules and RNG.
    pub fn reset(&mut self) {
        self.state = state::reset(&self.rules, &mut self.rng);
        self.moves = 0;
        debug!("game reset");
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            moves: self.moves,
            score: self.state.score,
            highest_tile: self.state.board.highest_tile(),
            won: self.state.won,
        }
    }
}
