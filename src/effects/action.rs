//! Type-erased actions.
//!
//! Every reaction registered on a state, and every entry/exit hook, is
//! stored as an [`Action`]: one capability that takes an optional payload
//! and returns a boxed future. The constructors below adapt the four user
//! facing shapes (blocking or async, with or without a payload) to it.

use crate::core::{Payload, PayloadKind};
use crate::effects::error::FsmError;
use futures::future::{self, BoxFuture, FutureExt, TryFutureExt};
use std::any::Any;
use std::future::Future;
use std::sync::Arc;

/// Erased action shared by callbacks and hooks.
pub type Action =
    Arc<dyn Fn(Option<Payload>) -> BoxFuture<'static, Result<(), FsmError>> + Send + Sync>;

/// Action that does nothing. Default for entry/exit hooks.
pub fn inert() -> Action {
    Arc::new(|_: Option<Payload>| future::ok(()).boxed())
}

/// Adapt a blocking closure. It runs on the blocking pool and is awaited,
/// so a panic surfaces to the dispatching caller.
pub fn blocking<F>(action: F) -> Action
where
    F: Fn() + Send + Sync + 'static,
{
    let action = Arc::new(action);
    Arc::new(move |_: Option<Payload>| {
        let action = Arc::clone(&action);
        run_blocking(move || action()).boxed()
    })
}

/// Adapt an async closure.
pub fn asynchronous<F, Fut>(action: F) -> Action
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |_: Option<Payload>| action().map_err(FsmError::ActionFailed).boxed())
}

/// Adapt a blocking closure taking a payload of type `P`.
pub fn blocking_with<P, F>(action: F) -> Action
where
    P: Any + Send,
    F: Fn(P) + Send + Sync + 'static,
{
    let action = Arc::new(action);
    Arc::new(move |payload: Option<Payload>| match downcast::<P>(payload) {
        Ok(payload) => {
            let action = Arc::clone(&action);
            run_blocking(move || action(payload)).boxed()
        }
        Err(err) => future::err(err).boxed(),
    })
}

/// Adapt an async closure taking a payload of type `P`.
pub fn asynchronous_with<P, F, Fut>(action: F) -> Action
where
    P: Any + Send,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |payload: Option<Payload>| match downcast::<P>(payload) {
        Ok(payload) => action(payload).map_err(FsmError::ActionFailed).boxed(),
        Err(err) => future::err(err).boxed(),
    })
}

/// Action that accepts only payloads of type `P` and does nothing with them.
pub fn inert_with<P: Any + Send>() -> Action {
    Arc::new(|payload: Option<Payload>| {
        let checked = downcast::<P>(payload).map(drop);
        future::ready(checked).boxed()
    })
}

async fn run_blocking<F>(action: F) -> Result<(), FsmError>
where
    F: FnOnce() + Send + 'static,
{
    tokio::task::spawn_blocking(action)
        .await
        .map_err(FsmError::from_join)
}

fn downcast<P: Any>(payload: Option<Payload>) -> Result<P, FsmError> {
    let expected = PayloadKind::of::<P>().name();
    match payload {
        Some(payload) => payload
            .downcast::<P>()
            .map(|payload| *payload)
            .map_err(|_| FsmError::PayloadMismatch {
                expected,
                received: "another type",
            }),
        None => Err(FsmError::PayloadMismatch {
            expected,
            received: PayloadKind::None.name(),
        }),
    }
}
