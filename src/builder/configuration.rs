//! Per-state callback table and entry/exit hooks.

use crate::builder::error::ConfigError;
use crate::core::{PayloadKind, State, Trigger};
use crate::effects::{action, Action, Callback};
use std::collections::HashMap;
use std::fmt;

/// Everything registered for one state.
///
/// Holds at most one callback per (trigger, payload shape) pair, plus one
/// entry and one exit hook. Hooks default to no-ops.
pub struct StateConfiguration<S: State, T: Trigger> {
    state: S,
    callbacks: HashMap<(T, PayloadKind), Callback<S, T>>,
    on_entry: Action,
    on_exit: Action,
}

impl<S: State, T: Trigger> StateConfiguration<S, T> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            callbacks: HashMap::new(),
            on_entry: action::inert(),
            on_exit: action::inert(),
        }
    }

    /// Insert a callback, refusing a second one for the same key.
    /// The existing registration is left untouched on failure.
    pub fn register(&mut self, callback: Callback<S, T>) -> Result<(), ConfigError> {
        let key = (callback.trigger().clone(), callback.payload_kind());
        if self.callbacks.contains_key(&key) {
            return Err(ConfigError::DuplicateCallback {
                state: self.state.name().to_string(),
                trigger: key.0.name().to_string(),
                payload: key.1.name().to_string(),
            });
        }

        tracing::trace!(
            state = self.state.name(),
            trigger = key.0.name(),
            payload = key.1.name(),
            changes_state = callback.changes_state(),
            "registered callback"
        );
        self.callbacks.insert(key, callback);
        Ok(())
    }

    /// Exact-match lookup; there is no fallback between payload shapes.
    pub fn lookup(&self, trigger: &T, payload: PayloadKind) -> Option<&Callback<S, T>> {
        self.callbacks.get(&(trigger.clone(), payload))
    }

    /// Whether any callback answers `trigger`, whatever its payload shape.
    pub fn handles(&self, trigger: &T) -> bool {
        self.callbacks.keys().any(|(t, _)| t == trigger)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub(crate) fn set_on_entry(&mut self, action: Action) {
        self.on_entry = action;
    }

    pub(crate) fn set_on_exit(&mut self, action: Action) {
        self.on_exit = action;
    }

    pub(crate) fn on_entry(&self) -> &Action {
        &self.on_entry
    }

    pub(crate) fn on_exit(&self) -> &Action {
        &self.on_exit
    }
}

impl<S: State, T: Trigger> fmt::Debug for StateConfiguration<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateConfiguration")
            .field("state", &self.state)
            .field("callbacks", &self.callbacks.values().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
