//! Input classification
//!
//! Turns one line typed by the user into a [`Msg`].

use crate::app::Msg;

/// Lines that end the session. Matched exactly, case-sensitive.
pub const QUIT_COMMANDS: [&str; 2] = ["quit", "q"];

/// Classify a raw input line. Anything that is not a quit command is a
/// [`Msg::Command`], including the empty line.
pub fn classify(line: &str) -> Msg {
    if QUIT_COMMANDS.contains(&line) {
        Msg::Quit
    } else {
        Msg::Command(line.to_string())
    }
}

/// Strip one trailing `\n` or `\r\n`, nothing else
pub fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
