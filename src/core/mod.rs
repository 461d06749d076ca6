//! Core module - shared infrastructure for Cratchit
//!
//! This module contains configuration, error handling, logging setup and the
//! startup context used throughout the application.

pub mod config;
pub mod error;
pub mod logging;
pub mod startup;

pub use config::Config;
pub use error::{CratchitError, Result};
pub use startup::StartupContext;
