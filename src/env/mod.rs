//! Environment module - durable key-value state
//!
//! The environment is read from `cratchit.env` when the interpreter starts
//! and written back when it shuts down.

pub mod quoted;
pub mod store;

pub use store::{load, save, Environment, EnvironmentStore, EnvironmentValue};
