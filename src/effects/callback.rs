//! Registered reactions to a trigger.

use crate::core::{Payload, PayloadKind, State, Trigger};
use crate::effects::action::{self, Action};
use crate::effects::error::FsmError;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// One reaction registered on a state for a (trigger, payload shape) pair.
///
/// A callback with a target state is a transition; without one it runs its
/// action and leaves the current state alone. Callbacks are immutable once
/// built.
pub struct Callback<S: State, T: Trigger> {
    trigger: T,
    payload: PayloadKind,
    target: Option<S>,
    action: Action,
}

impl<S: State, T: Trigger> Callback<S, T> {
    fn new(trigger: T, payload: PayloadKind, target: Option<S>, action: Action) -> Self {
        Self {
            trigger,
            payload,
            target,
            action,
        }
    }

    /// Reaction that does nothing, with no payload.
    pub fn inert(trigger: T, target: Option<S>) -> Self {
        Self::new(trigger, PayloadKind::None, target, action::inert())
    }

    /// Reaction that does nothing but requires a payload of type `P`.
    pub fn inert_with<P: Any + Send>(trigger: T, target: Option<S>) -> Self {
        Self::new(trigger, PayloadKind::of::<P>(), target, action::inert_with::<P>())
    }

    pub fn blocking<F>(trigger: T, target: Option<S>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(trigger, PayloadKind::None, target, action::blocking(action))
    }

    pub fn asynchronous<F, Fut>(trigger: T, target: Option<S>, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::new(trigger, PayloadKind::None, target, action::asynchronous(action))
    }

    pub fn blocking_with<P, F>(trigger: T, target: Option<S>, action: F) -> Self
    where
        P: Any + Send,
        F: Fn(P) + Send + Sync + 'static,
    {
        Self::new(
            trigger,
            PayloadKind::of::<P>(),
            target,
            action::blocking_with(action),
        )
    }

    pub fn asynchronous_with<P, F, Fut>(trigger: T, target: Option<S>, action: F) -> Self
    where
        P: Any + Send,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::new(
            trigger,
            PayloadKind::of::<P>(),
            target,
            action::asynchronous_with(action),
        )
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn payload_kind(&self) -> PayloadKind {
        self.payload
    }

    pub fn target_state(&self) -> Option<&S> {
        self.target.as_ref()
    }

    pub fn changes_state(&self) -> bool {
        self.target.is_some()
    }

    /// Run the wrapped action exactly once.
    pub async fn invoke(&self, payload: Option<Payload>) -> Result<(), FsmError> {
        let action = Arc::clone(&self.action);
        action(payload).await
    }
}

impl<S: State, T: Trigger> fmt::Debug for Callback<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("trigger", &self.trigger)
            .field("payload", &self.payload.name())
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
