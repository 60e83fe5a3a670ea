use std::fmt::Write;

use twenty48_utils::game::GameState;

use crate::config::Display;

const CLEAR: &str = "\x1b[2J\x1b[H";
const HELP: &str = "Use w/a/s/d to move, r to restart, q to quit";

/// Draw one frame: board, score, help line and the end-of-game banner.
pub fn frame(state: &GameState, display: &Display) -> String {
    let mut out = String::new();
    if display.clear_screen {
        out.push_str(CLEAR);
    }
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", state.board);
    let _ = writeln!(out, "\nScore: {}", state.score);
    if display.show_help {
        let _ = writeln!(out, "{HELP}");
    }
    if state.game_over {
        let banner = if state.won { "You win!" } else { "Game over!" };
        let _ = writeln!(out, "\n{banner}\nPress r to restart");
    }
    out
}
