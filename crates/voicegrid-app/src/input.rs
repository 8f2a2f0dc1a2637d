//! Console front end input: maps command words to engine input events.
//!
//! The terminal stands in for the touch screen and keyboard of the real
//! device, so each word becomes exactly one `InputEvent` (plus a couple
//! of console-only commands).

use voicegrid_types::input::{InputEvent, Key};

/// One parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Event(InputEvent),
    /// Print the console usage text.
    Help,
    /// Unrecognized word, echoed back to the user.
    Unknown(String),
}

/// Console usage text.
pub const USAGE: &str = "\
commands: up down left right enter esc | 1-9 (digit keys)\n\
          tap <1-9> (pointer tap on a cell) | touch (touch start)\n\
          help | quit";

/// Parse one input line into commands, in order.
pub fn parse_line(line: &str) -> Vec<ConsoleCommand> {
    let mut commands = Vec::new();
    let mut words = line.split_whitespace().peekable();
    while let Some(word) = words.next() {
        let command = match word.to_ascii_lowercase().as_str() {
            "up" => ConsoleCommand::Event(InputEvent::Key(Key::Up)),
            "down" => ConsoleCommand::Event(InputEvent::Key(Key::Down)),
            "left" => ConsoleCommand::Event(InputEvent::Key(Key::Left)),
            "right" => ConsoleCommand::Event(InputEvent::Key(Key::Right)),
            "enter" | "space" => ConsoleCommand::Event(InputEvent::Key(Key::Confirm)),
            "esc" | "escape" => ConsoleCommand::Event(InputEvent::Key(Key::Cancel)),
            "touch" => ConsoleCommand::Event(InputEvent::TouchStart),
            "quit" | "exit" => ConsoleCommand::Event(InputEvent::Quit),
            "help" | "?" => ConsoleCommand::Help,
            "tap" => match words.peek().and_then(|w| w.parse::<usize>().ok()) {
                Some(cell) if (1..=9).contains(&cell) => {
                    words.next();
                    // A tap is a touch sequence: touch-start, then the tap
                    // lands on the cell.
                    commands.push(ConsoleCommand::Event(InputEvent::TouchStart));
                    ConsoleCommand::Event(InputEvent::PointerActivate { index: cell - 1 })
                },
                _ => ConsoleCommand::Unknown(word.to_string()),
            },
            digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) => {
                match digit.parse::<u8>() {
                    Ok(n) if (1..=9).contains(&n) => {
                        ConsoleCommand::Event(InputEvent::Key(Key::Digit(n)))
                    },
                    _ => ConsoleCommand::Unknown(word.to_string()),
                }
            },
            _ => ConsoleCommand::Unknown(word.to_string()),
        };
        commands.push(command);
    }
    commands
}
