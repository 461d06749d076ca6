//! App module - model, messages and state transitions
//!
//! The interpreter state is a [`Model`] value. Each [`Msg`] produces a new
//! model through [`update()`], and [`Cratchit::view`] renders it.

pub mod cratchit;
pub mod model;
pub mod update;

pub use cratchit::Cratchit;
pub use model::{Model, Msg, Ux};
pub use update::{update, CommandHandler, NotImplemented};
