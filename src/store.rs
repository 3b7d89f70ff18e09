//! Store - owns the current `ApplicationState`
//!
//! Operations never reach into state directly. They dispatch actions and the
//! store swaps in the reduced state.

use crate::action::Action;
use crate::model::ApplicationState;

#[derive(Debug, Default)]
pub struct Store {
    state: ApplicationState,
}

impl Store {
    pub fn new(state: ApplicationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(%action, "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Consume the store, returning the final state
    pub fn into_state(self) -> ApplicationState {
        self.state
    }
}
