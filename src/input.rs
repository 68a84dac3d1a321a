//! Host-neutral input vocabulary.
//!
//! Hosts translate their native key and pointer events into [`Key`]s and
//! [`Command`]s; [`GameLife`](crate::life::GameLife) only ever sees commands.

use crate::pos::Point;

/// Everything a user can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    /// Primary button pressed at a pixel
    PaintDown(Point),
    /// Pointer moved to a pixel, with or without a button held
    PaintMove(Point),
    PaintUp,
    Clear,
    Randomize,
    SpeedUp,
    SpeedDown,
    SizeUp,
    SizeDown,
    /// Advance exactly one generation while paused
    Step,
}

/// The keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Char(char),
}

/// Key bindings, in the order they are listed in the help text
pub const BINDINGS: [(Key, Command, &str); 11] = [
    (Key::Enter, Command::TogglePause, "pause / resume"),
    (Key::Backspace, Command::Clear, "clear"),
    (Key::Delete, Command::Clear, "clear"),
    (Key::Char('r'), Command::Randomize, "randomize"),
    (Key::Left, Command::SpeedDown, "slower"),
    (Key::Right, Command::SpeedUp, "faster"),
    (Key::Down, Command::SizeDown, "smaller cells"),
    (Key::Up, Command::SizeUp, "larger cells"),
    (Key::Char('n'), Command::Step, "single step while paused"),
    (Key::Escape, Command::Quit, "quit"),
    (Key::Char('q'), Command::Quit, "quit"),
];

/// Looks up the command bound to a key
pub fn key_command(key: Key) -> Option<Command> {
    BINDINGS
        .iter()
        .find(|(bound, _, _)| *bound == key)
        .map(|&(_, command, _)| command)
}

/// One line per binding, for `--help` output
pub fn bindings_help() -> String {
    let mut help = String::from("controls:\n");
    for (key, _, what) in BINDINGS.iter() {
        let name = match key {
            Key::Char(c) => c.to_string(),
            other => format!("{other:?}"),
        };
        help.push_str(&format!("    {name:<10} {what}\n"));
    }
    help.push_str("    mouse      paint cells while paused (drag to paint a run)\n");
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_toggles_pause() {
        assert_eq!(key_command(Key::Enter), Some(Command::TogglePause));
    }

    #[test]
    fn both_erase_keys_clear() {
        assert_eq!(key_command(Key::Backspace), Some(Command::Clear));
        assert_eq!(key_command(Key::Delete), Some(Command::Clear));
    }

    #[test]
    fn arrows_control_speed_and_size() {
        assert_eq!(key_command(Key::Left), Some(Command::SpeedDown));
        assert_eq!(key_command(Key::Right), Some(Command::SpeedUp));
        assert_eq!(key_command(Key::Down), Some(Command::SizeDown));
        assert_eq!(key_command(Key::Up), Some(Command::SizeUp));
    }

    #[test]
    fn unbound_key_does_nothing() {
        assert_eq!(key_command(Key::Char('x')), None);
        assert_eq!(key_command(Key::Char('R')), None);
    }

    #[test]
    fn each_command_is_listed_once_per_key() {
        let help = bindings_help();

        assert_eq!(help.matches("randomize").count(), 1);
        assert_eq!(help.matches("clear").count(), 2);
    }

    #[test]
    fn help_lists_every_binding() {
        let help = bindings_help();

        assert_eq!(help.lines().count(), BINDINGS.len() + 2);
        assert!(help.contains("Enter"));
    }
}
