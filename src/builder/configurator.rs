//! Fluent registration surface over a [`StateConfiguration`].

use crate::builder::configuration::StateConfiguration;
use crate::builder::error::ConfigError;
use crate::core::{State, Trigger};
use crate::effects::{action, Callback};
use std::any::Any;
use std::future::Future;

/// Builder returned by `StateMachine::configure`.
///
/// Registration methods return `Result<Self, ConfigError>` so a chain stops
/// at the first duplicate. The `_with` variants take a payload type; blocking
/// closures run on the blocking pool, `_async` closures are awaited directly.
///
/// # Example
///
/// ```rust
/// use trigger_fsm::{state_enum, trigger_enum, StateMachine};
///
/// state_enum! {
///     enum Door { Open, Closed }
/// }
///
/// trigger_enum! {
///     enum Action { Close, Knock }
/// }
///
/// # fn main() -> Result<(), trigger_fsm::ConfigError> {
/// let mut machine = StateMachine::new(Door::Open);
/// machine
///     .configure(Door::Open)
///     .no_action(Action::Knock)?
///     .change_state(Action::Close, Door::Closed)?
///     .on_exit(|| println!("closing"));
/// # Ok(())
/// # }
/// ```
pub struct StateConfigurator<'a, S: State, T: Trigger> {
    configuration: &'a mut StateConfiguration<S, T>,
}

impl<'a, S: State, T: Trigger> StateConfigurator<'a, S, T> {
    pub(crate) fn new(configuration: &'a mut StateConfiguration<S, T>) -> Self {
        Self { configuration }
    }

    /// Register a pre-built callback.
    pub fn callback(self, callback: Callback<S, T>) -> Result<Self, ConfigError> {
        self.configuration.register(callback)?;
        Ok(self)
    }

    /// Mark `trigger` as legal but inert in this state.
    pub fn no_action(self, trigger: T) -> Result<Self, ConfigError> {
        self.callback(Callback::inert(trigger, None))
    }

    /// Mark `trigger` with a `P` payload as legal but inert in this state.
    pub fn no_action_with<P: Any + Send>(self, trigger: T) -> Result<Self, ConfigError> {
        self.callback(Callback::inert_with::<P>(trigger, None))
    }

    pub fn on_action<F>(self, trigger: T, action: F) -> Result<Self, ConfigError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback(Callback::blocking(trigger, None, action))
    }

    pub fn on_action_with<P, F>(self, trigger: T, action: F) -> Result<Self, ConfigError>
    where
        P: Any + Send,
        F: Fn(P) + Send + Sync + 'static,
    {
        self.callback(Callback::blocking_with(trigger, None, action))
    }

    pub fn on_action_async<F, Fut>(self, trigger: T, action: F) -> Result<Self, ConfigError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.callback(Callback::asynchronous(trigger, None, action))
    }

    pub fn on_action_async_with<P, F, Fut>(
        self,
        trigger: T,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        P: Any + Send,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.callback(Callback::asynchronous_with(trigger, None, action))
    }

    /// Transition to `to` on `trigger`, with no action of its own.
    pub fn change_state(self, trigger: T, to: S) -> Result<Self, ConfigError> {
        self.callback(Callback::inert(trigger, Some(to)))
    }

    /// Transition to `to` on `trigger` carrying a `P` payload.
    pub fn change_state_with<P: Any + Send>(self, trigger: T, to: S) -> Result<Self, ConfigError> {
        self.callback(Callback::inert_with::<P>(trigger, Some(to)))
    }

    /// Transition to `to` on `trigger`; `action` runs before the exit hook.
    pub fn change_state_action<F>(self, trigger: T, to: S, action: F) -> Result<Self, ConfigError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback(Callback::blocking(trigger, Some(to), action))
    }

    pub fn change_state_action_with<P, F>(
        self,
        trigger: T,
        to: S,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        P: Any + Send,
        F: Fn(P) + Send + Sync + 'static,
    {
        self.callback(Callback::blocking_with(trigger, Some(to), action))
    }

    pub fn change_state_async<F, Fut>(
        self,
        trigger: T,
        to: S,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.callback(Callback::asynchronous(trigger, Some(to), action))
    }

    pub fn change_state_async_with<P, F, Fut>(
        self,
        trigger: T,
        to: S,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        P: Any + Send,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.callback(Callback::asynchronous_with(trigger, Some(to), action))
    }

    /// Set the entry hook. A later call replaces the earlier hook.
    pub fn on_entry<F>(self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.configuration.set_on_entry(action::blocking(action));
        self
    }

    pub fn on_entry_async<F, Fut>(self, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.configuration.set_on_entry(action::asynchronous(action));
        self
    }

    /// Set the exit hook. A later call replaces the earlier hook.
    pub fn on_exit<F>(self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.configuration.set_on_exit(action::blocking(action));
        self
    }

    pub fn on_exit_async<F, Fut>(self, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.configuration.set_on_exit(action::asynchronous(action));
        self
    }
}
