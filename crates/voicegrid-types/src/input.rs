//! Platform-agnostic input event types.
//!
//! Every front end maps its native input to these enums. The engine never
//! sees raw platform input.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key pressed (physical keyboard, remote, or switch device).
    Key(Key),
    /// Pointer tap on a grid cell (mouse click or touch tap).
    PointerActivate { index: usize },
    /// A touch sequence began anywhere on the screen.
    TouchStart,
    /// User requested quit.
    Quit,
}

/// Keys that map across all front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Enter / Space.
    Confirm,
    /// Escape.
    Cancel,
    /// Digit 1-9 for direct slot selection.
    Digit(u8),
}

/// A directional move on the selection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// The directional component of the key, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            _ => None,
        }
    }
}
