//! Property-based tests for configuration and overload resolution.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated registration sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use trigger_fsm::{state_enum, trigger_enum, ConfigError, FsmError, StateMachine};

state_enum! {
    enum TestState {
        Initial,
        Processing,
        Complete,
    }
}

trigger_enum! {
    enum TestTrigger {
        Alpha,
        Beta,
        Gamma,
    }
}

/// Payload shapes a registration may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Shape {
    Bare,
    Int,
    Text,
    Flag,
}

prop_compose! {
    fn arbitrary_state()(variant in 0..3u8) -> TestState {
        match variant {
            0 => TestState::Initial,
            1 => TestState::Processing,
            _ => TestState::Complete,
        }
    }
}

prop_compose! {
    fn arbitrary_trigger()(variant in 0..3u8) -> TestTrigger {
        match variant {
            0 => TestTrigger::Alpha,
            1 => TestTrigger::Beta,
            _ => TestTrigger::Gamma,
        }
    }
}

prop_compose! {
    fn arbitrary_shape()(variant in 0..4u8) -> Shape {
        match variant {
            0 => Shape::Bare,
            1 => Shape::Int,
            2 => Shape::Text,
            _ => Shape::Flag,
        }
    }
}

fn register(
    machine: &mut StateMachine<TestState, TestTrigger>,
    state: TestState,
    trigger: TestTrigger,
    shape: Shape,
) -> Result<(), ConfigError> {
    let configurator = machine.configure(state);
    let registered = match shape {
        Shape::Bare => configurator.no_action(trigger),
        Shape::Int => configurator.no_action_with::<i64>(trigger),
        Shape::Text => configurator.no_action_with::<String>(trigger),
        Shape::Flag => configurator.no_action_with::<bool>(trigger),
    };
    registered.map(drop)
}

async fn fire(
    machine: &StateMachine<TestState, TestTrigger>,
    trigger: TestTrigger,
    shape: Shape,
) -> Result<(), FsmError> {
    match shape {
        Shape::Bare => machine.fire(trigger).await,
        Shape::Int => machine.fire_with(trigger, 7i64).await,
        Shape::Text => machine.fire_with(trigger, String::from("x")).await,
        Shape::Flag => machine.fire_with(trigger, true).await,
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn registration_fails_exactly_on_repeated_keys(
        registrations in prop::collection::vec(
            (arbitrary_state(), arbitrary_trigger(), arbitrary_shape()),
            0..24,
        )
    ) {
        let mut machine = StateMachine::new(TestState::Initial);
        let mut seen = HashSet::new();

        for (state, trigger, shape) in registrations {
            let fresh = seen.insert((state, trigger, shape));
            let result = register(&mut machine, state, trigger, shape);
            prop_assert_eq!(result.is_ok(), fresh);
        }
    }

    #[test]
    fn dispatch_matches_only_registered_shapes(
        registered in prop::collection::hash_set((arbitrary_trigger(), arbitrary_shape()), 0..6),
        fired in prop::collection::vec((arbitrary_trigger(), arbitrary_shape()), 1..12),
    ) {
        let mut machine = StateMachine::new(TestState::Initial);
        for (trigger, shape) in &registered {
            register(&mut machine, TestState::Initial, *trigger, *shape).unwrap();
        }

        let rt = runtime();
        for (trigger, shape) in fired {
            let result = rt.block_on(fire(&machine, trigger, shape));
            if registered.contains(&(trigger, shape)) {
                prop_assert!(result.is_ok());
            } else {
                let rejected = matches!(result, Err(FsmError::TriggerNotConfigured { .. }));
                prop_assert!(rejected);
            }
            prop_assert_eq!(machine.current_state(), TestState::Initial);
        }
    }

    #[test]
    fn configure_accumulates_into_one_configuration(
        triggers in prop::collection::hash_set(arbitrary_trigger(), 1..3),
        state in arbitrary_state(),
    ) {
        let mut machine = StateMachine::new(state);
        for trigger in &triggers {
            machine.configure(state).no_action(*trigger).unwrap();
        }

        let rt = runtime();
        for trigger in &triggers {
            prop_assert!(rt.block_on(machine.fire(*trigger)).is_ok());
        }
    }

    #[test]
    fn unconfigured_state_always_rejects(
        trigger in arbitrary_trigger(),
        shape in arbitrary_shape(),
    ) {
        let mut machine = StateMachine::new(TestState::Complete);
        register(&mut machine, TestState::Initial, trigger, shape).unwrap();

        let result = runtime().block_on(fire(&machine, trigger, shape));
        let rejected = matches!(result, Err(FsmError::StateNotConfigured { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(machine.current_state(), TestState::Complete);
    }
}
