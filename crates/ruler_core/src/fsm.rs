//! State Machine Runtime
//!
//! Typed finite state machines for widget interaction states.
//! Supports:
//! - User-defined state enums with event-driven transitions
//! - Transition queries without side effects
//! - A bounded transition history for debugging and tests

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::{event_types, EventType};

/// Maximum number of transitions kept in the history
const HISTORY_LIMIT: usize = 64;

/// Trait for state types that handle event transitions
///
/// Implement this on a state enum to define how events move between states.
/// Returning `None` means the event is not accepted in that state.
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state transitions (for debugging)
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in its initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Send an event to the state machine, potentially triggering a transition
    ///
    /// Returns the new state if the event was accepted.
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let current = self.current_state;
        let Some(to_state) = current.on_event(event) else {
            tracing::trace!(
                "fsm: {:?} ignores {}",
                current,
                event_types::name(event)
            );
            return None;
        };

        self.current_state = to_state;

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((current, event, to_state));

        tracing::debug!(
            "fsm: {:?} --{}--> {:?}",
            current,
            event_types::name(event),
            to_state
        );

        Some(to_state)
    }

    /// Put the machine back into `state` without recording a transition
    pub fn reset(&mut self, state: S) {
        self.current_state = state;
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
