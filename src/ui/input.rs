//! Single-line input over raw key presses.
//!
//! Keeping the editing rules free of any terminal lets them be tested with
//! plain key sequences.

use std::io;

use console::Key;

/// What a key press did to the line being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Pending,
    Submit(String),
    Cancel,
}

/// Editable line buffer, pre-filled with an initial value
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new(initial: &str) -> Self {
        LineEditor {
            buffer: initial.to_string(),
        }
    }

    /// Current contents, including any pre-filled text
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Apply one key press.
    ///
    /// Enter submits the whole buffer. Ctrl-C, Escape and Ctrl-D on an empty
    /// line cancel. Backspace removes the last character, pre-filled or not,
    /// and Ctrl-U clears the line.
    pub fn apply(&mut self, key: Key) -> LineEvent {
        match key {
            Key::Enter => return LineEvent::Submit(self.buffer.clone()),
            Key::CtrlC | Key::Escape => return LineEvent::Cancel,
            Key::Char('\u{4}') if self.buffer.is_empty() => return LineEvent::Cancel,
            Key::Char('\u{15}') => self.buffer.clear(),
            Key::Backspace => {
                self.buffer.pop();
            }
            Key::Char(c) if !c.is_control() => self.buffer.push(c),
            _ => {}
        }
        LineEvent::Pending
    }
}

/// Treat a closed or interrupted input stream like Ctrl-C
pub fn key_or_cancel(result: io::Result<Key>) -> io::Result<Key> {
    match result {
        Err(e) if matches!(e.kind(), io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted) => {
            Ok(Key::CtrlC)
        }
        other => other,
    }
}
