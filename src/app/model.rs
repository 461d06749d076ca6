//! Interpreter state and the messages that change it

/// Complete interpreter state for one turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    /// Display text accumulated so far
    pub prompt: String,
    /// Set once the interpreter should stop
    pub quit: bool,
}

/// A state transition trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Leave the model as it is
    Nop,
    /// End the session
    Quit,
    /// User text awaiting dispatch
    Command(String),
}

/// Rendered display lines
pub type Ux = Vec<String>;
