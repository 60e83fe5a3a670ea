//! twenty48-utils: the 2048 board engine.
//!
//! This crate provides:
//! - A compact `Board` type with ergonomic methods (`shift`, `with_random_tile`, ...)
//! - `GameState` plus the free functions that drive one game (`reset`,
//!   `spawn_tile`, `apply_move`, `check_terminal_state`)
//! - `Game`, an owned session that chains a full move pipeline with its own RNG
//!
//! Quick start:
//! ```
//! use twenty48_utils::engine::Direction;
//! use twenty48_utils::game::{Game, Rules};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(Rules::default(), rng).unwrap();
//! assert_eq!(game.state().board.count_empty(), 14);
//! let outcome = game.step(Direction::Left);
//! assert!(outcome.score_delta % 2 == 0);
//! ```
//!
//! Determinism comes from the caller: seed the RNG and the whole game replays.
pub mod engine;
pub mod error;
pub mod game;

pub use error::EngineError;
