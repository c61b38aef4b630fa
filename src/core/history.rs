//! Transition records and bounded transition history.

use super::state::{State, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of one committed transition.
///
/// Produced once per state-changing trigger, after the entry hook of the
/// new state has run, and handed to the transition observer.
///
/// # Example
///
/// ```rust
/// use trigger_fsm::core::{State, Trigger, TriggerResult};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light { Red, Green }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Tick { Next }
///
/// impl Trigger for Tick {
///     fn name(&self) -> &str { "Next" }
/// }
///
/// let result = TriggerResult::new(Tick::Next, Light::Red, Light::Green);
/// assert_eq!(result.old_state, Light::Red);
/// assert_eq!(result.new_state, Light::Green);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TriggerResult<S: State, T: Trigger> {
    /// The trigger that caused the transition
    pub trigger: T,
    /// The state being left
    pub old_state: S,
    /// The state committed by the transition
    pub new_state: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl<S: State, T: Trigger> TriggerResult<S, T> {
    pub fn new(trigger: T, old_state: S, new_state: S) -> Self {
        Self {
            trigger,
            old_state,
            new_state,
            timestamp: Utc::now(),
        }
    }

    /// Whether the transition re-entered the state it left.
    pub fn is_self_transition(&self) -> bool {
        self.old_state == self.new_state
    }
}

/// Ordered, bounded history of committed transitions.
///
/// Once `capacity` records are held, recording a new one evicts the oldest.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<S: State, T: Trigger> {
    capacity: usize,
    transitions: VecDeque<TriggerResult<S, T>>,
}

impl<S: State, T: Trigger> TransitionHistory<S, T> {
    /// Create an empty history keeping at most `capacity` records.
    /// A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, result: TriggerResult<S, T>) {
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(result);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the old state of the oldest retained record followed by
    /// the new state of every record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.old_state);
        }
        path.extend(self.transitions.iter().map(|t| &t.new_state));
        path
    }

    /// Time between the oldest and newest retained records.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TriggerResult<S, T>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&TriggerResult<S, T>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
