//! Errors raised while configuring states and building machines.

use thiserror::Error;

/// Errors that can occur when registering callbacks on a state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Trigger '{trigger}' with payload '{payload}' is already handled in state '{state}'")]
    DuplicateCallback {
        state: String,
        trigger: String,
        payload: String,
    },
}

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,
}
