//! Core state machine types.
//!
//! This module contains the value types shared by the builder and the
//! dispatch engine:
//! - State and trigger identifiers via the `State` and `Trigger` traits
//! - Payload type tags for overload resolution
//! - Transition records and bounded history

mod history;
mod payload;
mod state;

pub use history::{TransitionHistory, TriggerResult};
pub use payload::{Payload, PayloadKind};
pub use state::{State, Trigger};
