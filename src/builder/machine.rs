//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{State, Trigger, TriggerResult};
use crate::effects::{StateMachine, StateObserver, TransitionObserver};
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
///
/// Use this when the machine needs observers or a transition history;
/// otherwise [`StateMachine::new`] is enough.
pub struct StateMachineBuilder<S: State, T: Trigger> {
    initial: Option<S>,
    state_observer: Option<StateObserver<S>>,
    transition_observer: Option<TransitionObserver<S, T>>,
    history_capacity: Option<usize>,
}

impl<S: State, T: Trigger> StateMachineBuilder<S, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            state_observer: None,
            transition_observer: None,
            history_capacity: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Called with the new state right after it is committed, before the
    /// entry hook of that state runs.
    pub fn on_state_change<F>(mut self, observer: F) -> Self
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.state_observer = Some(Arc::new(observer));
        self
    }

    /// Called with the transition record after the entry hook has run.
    pub fn on_transition<F>(mut self, observer: F) -> Self
    where
        F: Fn(&TriggerResult<S, T>) + Send + Sync + 'static,
    {
        self.transition_observer = Some(Arc::new(observer));
        self
    }

    /// Keep the last `capacity` committed transitions in memory.
    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Build the state machine.
    /// Returns an error if the initial state is missing.
    pub fn build(self) -> Result<StateMachine<S, T>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        Ok(StateMachine::from_parts(
            initial,
            self.state_observer,
            self.transition_observer,
            self.history_capacity,
        ))
    }
}

impl<S: State, T: Trigger> Default for StateMachineBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Complete => "Complete",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Complete)
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestTrigger {
        Finish,
    }

    impl Trigger for TestTrigger {
        fn name(&self) -> &str {
            "Finish"
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::<TestState, TestTrigger>::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_without_history_has_none() {
        let machine = StateMachineBuilder::<TestState, TestTrigger>::new()
            .initial(TestState::Initial)
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), TestState::Initial);
        assert!(machine.history().is_none());
    }

    #[tokio::test]
    async fn fluent_api_wires_observers_and_history() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut machine = StateMachineBuilder::new()
            .initial(TestState::Initial)
            .on_transition(move |result: &TriggerResult<TestState, TestTrigger>| {
                sink.lock().push(result.new_state.clone())
            })
            .with_history(4)
            .build()
            .unwrap();

        machine
            .configure(TestState::Initial)
            .change_state(TestTrigger::Finish, TestState::Complete)
            .unwrap();
        machine.fire(TestTrigger::Finish).await.unwrap();

        assert!(machine.is_final());
        assert_eq!(*seen.lock(), vec![TestState::Complete]);
        assert_eq!(machine.history().unwrap().len(), 1);
    }
}
