//! Parsers for string -> ECS enums for data-driven configs.

use crate::components::{InputCommand, Key};

/// Case-insensitive key name parser with common aliases.
pub fn parse_key(s: &str) -> Option<Key> {
    Some(match s.trim().to_ascii_lowercase().as_str() {
        // canonical
        "space" => Key::Space,
        "enter" => Key::Enter,
        "leftshift" => Key::LeftShift,
        "mouseleft" => Key::MouseLeft,
        "mouseright" => Key::MouseRight,
        "e" => Key::E,
        "f" => Key::F,
        "q" => Key::Q,
        "r" => Key::R,
        // aliases
        "return" => Key::Enter,
        "shift" | "lshift" => Key::LeftShift,
        "mouse0" | "lmb" => Key::MouseLeft,
        "mouse1" | "rmb" => Key::MouseRight,
        _ => return None,
    })
}

/// Command names as used in scenario scripts.
pub fn parse_command(s: &str) -> Option<InputCommand> {
    Some(match s.trim().to_ascii_lowercase().as_str() {
        "catch" | "catch_bomb" => InputCommand::CatchBomb,
        "throw" | "throw_bomb" => InputCommand::ThrowBomb,
        _ => return None,
    })
}
