//! Trigger FSM: a programmatically configured finite state machine.
//!
//! Callers declare, per state, which triggers are legal, what runs when
//! each fires and whether it moves the machine to another state. The same
//! trigger may be registered several times on one state as long as the
//! payload types differ; dispatch picks the exact match.
//!
//! # Core Concepts
//!
//! - **State** / **Trigger**: closed sets of identifiers, usually enums
//! - **Callbacks**: blocking or async reactions, with or without a payload
//! - **Transitions**: action, exit hook, commit, entry hook, notification
//! - **Gate**: one dispatch at a time per machine instance
//!
//! # Example
//!
//! ```rust
//! use trigger_fsm::{state_enum, trigger_enum, StateMachineBuilder};
//!
//! state_enum! {
//!     enum Order {
//!         Placed,
//!         Paid,
//!         Shipped,
//!     }
//!     final: [Shipped]
//! }
//!
//! trigger_enum! {
//!     enum OrderEvent {
//!         Pay,
//!         Ship,
//!         Note,
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut machine = StateMachineBuilder::new()
//!     .initial(Order::Placed)
//!     .on_transition(|r: &trigger_fsm::TriggerResult<Order, OrderEvent>| {
//!         println!("{:?} -> {:?}", r.old_state, r.new_state)
//!     })
//!     .build()?;
//!
//! machine
//!     .configure(Order::Placed)
//!     .on_action_with(OrderEvent::Note, |text: String| println!("note: {text}"))?
//!     .change_state_with::<u64>(OrderEvent::Pay, Order::Paid)?;
//! machine
//!     .configure(Order::Paid)
//!     .change_state(OrderEvent::Ship, Order::Shipped)?;
//!
//! machine.fire_blocking_with(OrderEvent::Note, String::from("gift wrap"))?;
//! machine.fire_blocking_with(OrderEvent::Pay, 1999u64)?;
//! machine.fire_blocking(OrderEvent::Ship)?;
//! assert!(machine.is_final());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use builder::{BuildError, ConfigError, StateConfigurator, StateMachineBuilder};
pub use crate::core::{PayloadKind, State, TransitionHistory, Trigger, TriggerResult};
pub use effects::{FsmError, StateMachine};
