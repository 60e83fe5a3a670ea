use std::str::FromStr;

use twenty48_utils::engine::Direction;

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Reset,
    Quit,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown command {0:?}")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Accepts wasd, vi keys (hjkl), direction words, `r`/`reset` and `q`/`quit`/`esc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let cmd = match token.as_str() {
            "w" | "k" | "up" => Command::Move(Direction::Up),
            "s" | "j" | "down" => Command::Move(Direction::Down),
            "a" | "h" | "left" => Command::Move(Direction::Left),
            "d" | "l" | "right" => Command::Move(Direction::Right),
            "r" | "reset" | "restart" => Command::Reset,
            "q" | "quit" | "exit" | "esc" => Command::Quit,
            _ => return Err(ParseCommandError(s.trim().to_string())),
        };
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_keys() {
        assert_eq!("w".parse(), Ok(Command::Move(Direction::Up)));
        assert_eq!("J".parse(), Ok(Command::Move(Direction::Down)));
        assert_eq!(" Left \n".parse(), Ok(Command::Move(Direction::Left)));
        assert_eq!("d".parse(), Ok(Command::Move(Direction::Right)));
        assert_eq!("R".parse(), Ok(Command::Reset));
        assert_eq!("esc".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!(
            "x".parse::<Command>(),
            Err(ParseCommandError("x".to_string()))
        );
        assert!("".parse::<Command>().is_err());
    }
}
