//! Interactive REPL for Cratchit
//!
//! Drives the update/render/read cycle until a `Quit` reaches the model.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::app::{Cratchit, Model, Msg, Ux};
use crate::cli::commands::{classify, strip_line_terminator};
use crate::core::Result;

/// Where the loop is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminating,
}

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl<R, W> {
    cratchit: Cratchit,
    model: Model,
    pending: VecDeque<Msg>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// Create a REPL whose first turn processes `command`
    pub fn new(cratchit: Cratchit, command: impl Into<String>, input: R, output: W) -> Self {
        let model = cratchit.init();
        let mut pending = VecDeque::new();
        pending.push_back(Msg::Command(command.into()));
        Self {
            cratchit,
            model,
            pending,
            input,
            output,
        }
    }

    /// Run one turn. Returns `false` once the session has ended.
    pub fn step(&mut self) -> Result<bool> {
        let msg = self.pending.pop_front().unwrap_or(Msg::Nop);
        self.model = self.cratchit.update(&msg, &self.model);

        let ux = self.cratchit.view(&self.model);
        self.render(&ux)?;

        if self.state() == LoopState::Terminating {
            debug!("Quit received, leaving the loop");
            return Ok(false);
        }

        let msg = self.read_msg()?;
        self.pending.push_back(msg);
        Ok(true)
    }

    /// Run until the session ends
    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn state(&self) -> LoopState {
        if self.model.quit {
            LoopState::Terminating
        } else {
            LoopState::Running
        }
    }

    /// Output sink, holding everything rendered so far
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn cratchit(&self) -> &Cratchit {
        &self.cratchit
    }

    /// Persist the environment and hand back the output sink
    pub fn close(self) -> W {
        self.cratchit.close();
        self.output
    }

    /// Write every row of the view, as is
    fn render(&mut self, ux: &Ux) -> Result<()> {
        for row in ux {
            self.output.write_all(row.as_bytes())?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Read one line. Bytes that are not UTF-8 are replaced, not rejected.
    fn read_msg(&mut self) -> Result<Msg> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            debug!("End of input, treating as quit");
            return Ok(Msg::Quit);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(classify(strip_line_terminator(&line)))
    }
}
