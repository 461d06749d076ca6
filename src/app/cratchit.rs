//! The interpreter core: init, update and view over an environment store

use std::path::PathBuf;

use tracing::trace;

use crate::app::model::{Model, Msg, Ux};
use crate::app::update::{self, CommandHandler, NotImplemented};
use crate::env::EnvironmentStore;

/// Owns the environment store for the whole session
pub struct Cratchit {
    store: EnvironmentStore,
    handler: Box<dyn CommandHandler>,
}

impl Cratchit {
    /// Open the environment at `path` with no domain commands
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_handler(path, NotImplemented)
    }

    /// Open the environment at `path`, dispatching commands to `handler`
    pub fn with_handler(path: impl Into<PathBuf>, handler: impl CommandHandler + 'static) -> Self {
        Self {
            store: EnvironmentStore::open(path),
            handler: Box::new(handler),
        }
    }

    /// The model the session starts from
    pub fn init(&self) -> Model {
        Model {
            prompt: format!("\nInit from {}", self.store.path().display()),
            quit: false,
        }
    }

    pub fn update(&mut self, msg: &Msg, model: &Model) -> Model {
        trace!("update: {:?}", msg);
        update::update(
            model,
            msg,
            self.handler.as_mut(),
            self.store.environment_mut(),
        )
    }

    pub fn view(&self, model: &Model) -> Ux {
        vec![model.prompt.clone()]
    }

    pub fn store(&self) -> &EnvironmentStore {
        &self.store
    }

    /// Persist the environment and end the session
    pub fn close(self) {
        self.store.close();
    }
}
