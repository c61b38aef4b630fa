//! Trigger dispatch: erased actions, callbacks and the state machine.
//!
//! This module is the imperative shell of the crate. It runs user actions,
//! serializes dispatch per machine instance and commits transitions.
//!
//! # Key Concepts
//!
//! - **Actions**: blocking or async closures, erased to one capability
//! - **Callbacks**: an action bound to a (trigger, payload shape) pair,
//!   optionally with a target state
//! - **State Machine**: owns the current state and runs the transition
//!   sequence under a per-instance gate

pub mod action;
mod callback;
mod error;
mod machine;

pub use action::Action;
pub use callback::Callback;
pub use error::FsmError;
pub use machine::{StateMachine, StateObserver, TransitionObserver};
