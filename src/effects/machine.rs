//! State machine that dispatches triggers against one current state.

use crate::builder::{StateConfiguration, StateConfigurator};
use crate::core::{Payload, PayloadKind, State, TransitionHistory, Trigger, TriggerResult};
use crate::effects::error::FsmError;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tracing::Instrument;
use uuid::Uuid;

/// Observer invoked with the newly committed state.
pub type StateObserver<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Observer invoked with the record of each committed transition.
pub type TransitionObserver<S, T> = Arc<dyn Fn(&TriggerResult<S, T>) + Send + Sync>;

/// Trigger-driven state machine.
///
/// Configuration happens through `&mut self` before the machine is shared;
/// dispatch takes `&self` and is serialized by a per-instance gate, so an
/// `Arc<StateMachine>` can be fired from many tasks at once.
///
/// Dispatch order for a state-changing trigger: action, exit hook, commit,
/// state observer, entry hook of the new state, history, transition
/// observer. The current state is readable at any time without waiting
/// for the gate.
///
/// Callbacks must not fire triggers on the machine that is dispatching
/// them; the gate is not re-entrant and such a call never completes.
pub struct StateMachine<S: State, T: Trigger> {
    id: Uuid,
    current: RwLock<S>,
    configurations: HashMap<S, StateConfiguration<S, T>>,
    gate: tokio::sync::Mutex<()>,
    state_observer: Option<StateObserver<S>>,
    transition_observer: Option<TransitionObserver<S, T>>,
    history: Option<Mutex<TransitionHistory<S, T>>>,
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Create a state machine without observers or history.
    pub fn new(initial: S) -> Self {
        Self::from_parts(initial, None, None, None)
    }

    pub(crate) fn from_parts(
        initial: S,
        state_observer: Option<StateObserver<S>>,
        transition_observer: Option<TransitionObserver<S, T>>,
        history_capacity: Option<usize>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            current: RwLock::new(initial),
            configurations: HashMap::new(),
            gate: tokio::sync::Mutex::new(()),
            state_observer,
            transition_observer,
            history: history_capacity.map(|c| Mutex::new(TransitionHistory::with_capacity(c))),
        }
    }

    /// Unique identifier of this instance, attached to its log spans.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get current state.
    pub fn current_state(&self) -> S {
        self.current.read().clone()
    }

    /// Check if machine is in a final state.
    pub fn is_final(&self) -> bool {
        self.current.read().is_final()
    }

    pub fn is_configured(&self, state: &S) -> bool {
        self.configurations.contains_key(state)
    }

    /// Snapshot of the transition history, if enabled.
    pub fn history(&self) -> Option<TransitionHistory<S, T>> {
        self.history.as_ref().map(|h| h.lock().clone())
    }

    /// Configure `state`, creating its configuration on first use.
    /// Later calls for the same state add to the same configuration.
    pub fn configure(&mut self, state: S) -> StateConfigurator<'_, S, T> {
        let configuration = self
            .configurations
            .entry(state)
            .or_insert_with_key(|state| StateConfiguration::new(state.clone()));
        StateConfigurator::new(configuration)
    }

    /// Fire `trigger` without a payload.
    pub async fn fire(&self, trigger: T) -> Result<(), FsmError> {
        self.dispatch(trigger, PayloadKind::None, None).await
    }

    /// Fire `trigger` with a payload; only callbacks registered for
    /// payload type `P` match.
    pub async fn fire_with<P: Any + Send>(&self, trigger: T, payload: P) -> Result<(), FsmError> {
        self.dispatch(trigger, PayloadKind::of::<P>(), Some(Box::new(payload)))
            .await
    }

    /// Blocking form of [`fire`](Self::fire).
    ///
    /// Works with or without a surrounding runtime. Must not be called from a
    /// callback of this machine. On the thread driving a current-thread
    /// runtime it stalls that runtime until the dispatch completes, so a
    /// dispatch that waits on tasks of that runtime never finishes.
    pub fn fire_blocking(&self, trigger: T) -> Result<(), FsmError> {
        block_on(self.fire(trigger))
    }

    /// Blocking form of [`fire_with`](Self::fire_with).
    pub fn fire_blocking_with<P: Any + Send>(&self, trigger: T, payload: P) -> Result<(), FsmError> {
        block_on(self.fire_with(trigger, payload))
    }

    async fn dispatch(
        &self,
        trigger: T,
        kind: PayloadKind,
        payload: Option<Payload>,
    ) -> Result<(), FsmError> {
        let _permit = self.gate.lock().await;

        let from = self.current_state();
        let span = tracing::debug_span!(
            "fire",
            machine = %self.id,
            state = from.name(),
            trigger = trigger.name(),
            payload = kind.name(),
        );

        self.run_transition(from, trigger, kind, payload)
            .instrument(span)
            .await
    }

    async fn run_transition(
        &self,
        from: S,
        trigger: T,
        kind: PayloadKind,
        payload: Option<Payload>,
    ) -> Result<(), FsmError> {
        let Some(configuration) = self.configurations.get(&from) else {
            tracing::warn!("state is not configured");
            return Err(FsmError::StateNotConfigured {
                state: from.name().to_string(),
            });
        };

        let Some(callback) = configuration.lookup(&trigger, kind) else {
            if configuration.handles(&trigger) {
                tracing::warn!("trigger is configured only for other payload types");
            } else {
                tracing::warn!("trigger is not configured for this state");
            }
            return Err(FsmError::TriggerNotConfigured {
                state: from.name().to_string(),
                trigger: trigger.name().to_string(),
                payload: kind.name().to_string(),
            });
        };

        if let Err(err) = callback.invoke(payload).await {
            tracing::error!(error = %err, "action failed, state unchanged");
            return Err(err);
        }

        let Some(target) = callback.target_state().cloned() else {
            tracing::debug!("action completed without transition");
            return Ok(());
        };

        if let Err(err) = configuration.on_exit()(None).await {
            tracing::error!(error = %err, "exit hook failed, state unchanged");
            return Err(err);
        }

        let old_state = std::mem::replace(&mut *self.current.write(), target.clone());
        if let Some(observer) = &self.state_observer {
            observer(&target);
        }

        if let Some(next) = self.configurations.get(&target) {
            if let Err(err) = next.on_entry()(None).await {
                tracing::error!(
                    error = %err,
                    to = target.name(),
                    "entry hook failed after state was committed"
                );
                return Err(err);
            }
        }

        tracing::info!(from = old_state.name(), to = target.name(), "transition committed");

        let result = TriggerResult::new(trigger, old_state, target);
        if let Some(history) = &self.history {
            history.lock().record(result.clone());
        }
        if let Some(observer) = &self.transition_observer {
            observer(&result);
        }

        Ok(())
    }
}

impl<S: State, T: Trigger> std::fmt::Debug for StateMachine<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("current", &*self.current.read())
            .field("configured_states", &self.configurations.len())
            .field(
                "callbacks",
                &self
                    .configurations
                    .values()
                    .map(StateConfiguration::len)
                    .sum::<usize>(),
            )
            .finish_non_exhaustive()
    }
}

/// Drive a dispatch future to completion from synchronous code.
fn block_on<F>(future: F) -> Result<(), FsmError>
where
    F: Future<Output = Result<(), FsmError>> + Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        // A current-thread runtime cannot host a nested block_on, so the
        // dispatch gets a private runtime on a scoped thread.
        Ok(_) => std::thread::scope(|scope| {
            scope
                .spawn(move || block_on_private(future))
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        }),
        Err(_) => block_on_private(future),
    }
}

fn block_on_private<F>(future: F) -> Result<(), FsmError>
where
    F: Future<Output = Result<(), FsmError>>,
{
    Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(future)
}
