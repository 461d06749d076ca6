//! State transitions
//!
//! [`update`] is the only place that decides how a [`Msg`] changes the
//! [`Model`]. It never touches its input model; it returns a new one.

use crate::app::model::{Model, Msg};
use crate::env::Environment;

/// Appended when the session ends
pub const FAREWELL: &str = "\nBy for now :)";

/// Appended for commands nobody handles yet
pub const NOT_IMPLEMENTED: &str = "\nUpdate for command not yet implemented";

/// Appended after every command response
pub const PROMPT_MARKER: &str = "\n>";

/// Handles the text of a [`Msg::Command`].
///
/// Domain commands plug in here. The handler gets the live environment so a
/// command can read or change persisted entries.
pub trait CommandHandler {
    /// Text to append to the prompt in response to `command`
    fn handle(&mut self, command: &str, environment: &mut Environment) -> String;
}

/// Answers every command with [`NOT_IMPLEMENTED`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NotImplemented;

impl CommandHandler for NotImplemented {
    fn handle(&mut self, _command: &str, _environment: &mut Environment) -> String {
        NOT_IMPLEMENTED.to_string()
    }
}

/// Compute the model that follows `model` once `msg` is applied
pub fn update(
    model: &Model,
    msg: &Msg,
    handler: &mut dyn CommandHandler,
    environment: &mut Environment,
) -> Model {
    match msg {
        Msg::Nop => model.clone(),
        Msg::Quit => {
            let mut next = model.clone();
            next.prompt.push_str(FAREWELL);
            next.quit = true;
            next
        }
        Msg::Command(command) => {
            let mut next = model.clone();
            next.prompt.push_str(&handler.handle(command, environment));
            next.prompt.push_str(PROMPT_MARKER);
            next
        }
    }
}
