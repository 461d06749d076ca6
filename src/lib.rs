//! Cratchit - a line-at-a-time command interpreter
//!
//! A persistent [`Model`] is transformed by discrete [`Msg`] values through a
//! pure update function, and rendered after every turn. Key-value state
//! lives in `cratchit.env` and survives restarts.
//!
//! # Architecture
//!
//! - **Core**: Configuration, error handling, logging and startup context
//! - **Parse**: Parser primitives, starting with a word parser
//! - **Env**: The persisted key-value environment
//! - **App**: Model, messages, the updater and the view
//! - **CLI**: Input classification and the REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use cratchit::{Cratchit, Repl};
//! use std::io;
//!
//! let cratchit = Cratchit::open("cratchit.env");
//! let mut repl = Repl::new(cratchit, "hello ", io::stdin().lock(), io::stdout());
//! repl.run().unwrap();
//! repl.close();
//! ```

pub mod app;
pub mod cli;
pub mod core;
pub mod env;
pub mod parse;

// Re-export commonly used items
pub use app::{Cratchit, Model, Msg};
pub use cli::Repl;
pub use core::{Config, CratchitError, Result, StartupContext};
pub use env::{Environment, EnvironmentStore};
