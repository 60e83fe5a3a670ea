use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{info, warn};
use rand::Rng;
use twenty48_utils::game::{Game, GameSummary};

use crate::config::Display;
use crate::input::Command;
use crate::render;

/// Drive `game` from line-based `input` until quit or end of input.
///
/// Every line is one command. Moves are ignored once the game is over; the
/// player can still reset or quit.
pub fn run<G, I, O>(game: &mut Game<G>, input: I, mut out: O, display: &Display) -> Result<GameSummary>
where
    G: Rng,
    I: BufRead,
    O: Write,
{
    draw(game, &mut out, display)?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Reset) => {
                info!("restart after {} moves, score {}", game.moves(), game.state().score);
                game.reset();
            }
            Ok(Command::Move(direction)) => {
                if !game.is_over() {
                    game.step(direction);
                }
            }
            Err(err) => {
                warn!("{err}");
                continue;
            }
        }
        draw(game, &mut out, display)?;
    }
    Ok(game.summary())
}

fn draw<G: Rng, O: Write>(game: &Game<G>, out: &mut O, display: &Display) -> Result<()> {
    out.write_all(render::frame(game.state(), display).as_bytes())
        .context("failed to write frame")?;
    out.flush().context("failed to flush output")
}
