//! Errors surfaced by trigger dispatch.

use std::any::Any;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors that can occur while firing a trigger.
///
/// None of these leave the machine in a partially committed state, except
/// `ActionFailed`/`ActionPanicked` raised by an entry hook, which run after
/// the new state is committed.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("State '{state}' is not configured")]
    StateNotConfigured { state: String },

    #[error("Trigger '{trigger}' with payload '{payload}' is not configured in state '{state}'")]
    TriggerNotConfigured {
        state: String,
        trigger: String,
        payload: String,
    },

    #[error("Callback expects payload '{expected}' but received '{received}'")]
    PayloadMismatch {
        expected: &'static str,
        received: &'static str,
    },

    #[error("Action failed: {0}")]
    ActionFailed(#[source] anyhow::Error),

    #[error("Action panicked: {message}")]
    ActionPanicked { message: String },

    #[error("Action was cancelled before completing")]
    ActionCancelled,

    #[error("Failed to start runtime for blocking dispatch: {0}")]
    Runtime(#[from] std::io::Error),
}

impl FsmError {
    /// Whether the failure came from user code rather than the engine.
    pub fn is_action_error(&self) -> bool {
        matches!(
            self,
            FsmError::ActionFailed(_) | FsmError::ActionPanicked { .. } | FsmError::ActionCancelled
        )
    }

    pub(crate) fn from_join(err: JoinError) -> Self {
        match err.try_into_panic() {
            Ok(panic) => FsmError::ActionPanicked {
                message: panic_message(panic),
            },
            Err(_) => FsmError::ActionCancelled,
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "non-string panic payload".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_extracts_strings() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new(String::from("bang"))), "bang");
        assert_eq!(panic_message(Box::new(42u8)), "non-string panic payload");
    }

    #[tokio::test]
    async fn join_error_maps_to_panicked() {
        let err = tokio::task::spawn_blocking(|| panic!("exploded"))
            .await
            .unwrap_err();

        match FsmError::from_join(err) {
            FsmError::ActionPanicked { message } => assert_eq!(message, "exploded"),
            other => panic!("Expected ActionPanicked, got {other:?}"),
        }
    }

    #[test]
    fn action_errors_are_classified() {
        assert!(FsmError::ActionFailed(anyhow::anyhow!("x")).is_action_error());
        assert!(FsmError::ActionCancelled.is_action_error());
        assert!(!FsmError::StateNotConfigured {
            state: "S".to_string()
        }
        .is_action_error());
    }

    #[test]
    fn messages_name_state_and_trigger() {
        let err = FsmError::TriggerNotConfigured {
            state: "Idle".to_string(),
            trigger: "Start".to_string(),
            payload: "i32".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Idle"));
        assert!(message.contains("Start"));
        assert!(message.contains("i32"));
    }
}
