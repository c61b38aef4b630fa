//! Builder API for configuring states and constructing state machines.
//!
//! [`StateConfigurator`] is the fluent surface returned by
//! `StateMachine::configure`; [`StateMachineBuilder`] wires observers and
//! history into a new machine.

pub mod error;
pub mod machine;
pub mod macros;

mod configuration;
mod configurator;

pub use configuration::StateConfiguration;
pub use configurator::StateConfigurator;
pub use error::{BuildError, ConfigError};
pub use machine::StateMachineBuilder;
