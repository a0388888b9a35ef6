//! Lifecycle state machines
//!
//! Flat state machines used by bindable components (entrance sequencers, scroll
//! scrubbers) to track their lifecycle. Supports:
//! - Plain transitions keyed by (state, event)
//! - Wildcard transitions that apply from every state (e.g. teardown)
//! - Transition history for diagnostics
//!
//! Components resend the same event at frame rate (a scrubber reports `MOVE` on
//! every scroll), so a transition back into the current state updates nothing and
//! is not recorded.

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// Matches any source state in a [`Transition`]
pub const ANY_STATE: StateId = StateId::MAX;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }

    /// A transition taken from whatever the current state is
    pub fn from_any(event: EventId, to: StateId) -> Self {
        Self::new(ANY_STATE, event, to)
    }

    fn matches(&self, state: StateId, event: EventId) -> bool {
        self.event == event && (self.from_state == state || self.from_state == ANY_STATE)
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Add a transition that applies from every state
    pub fn on_any(mut self, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::from_any(event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: Vec::new(),
        }
    }
}

/// A state machine instance
pub struct StateMachine {
    current_state: StateId,
    transitions: Vec<Transition>,
    history: Vec<(StateId, EventId, StateId)>,
}

impl StateMachine {
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
            history: Vec::new(),
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// State changes so far, oldest first. Self-transitions are not recorded.
    pub fn history(&self) -> &[(StateId, EventId, StateId)] {
        &self.history
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        let current = self.current_state;
        self.transitions.iter().any(|t| t.matches(current, event))
    }

    /// Send an event, returning the state after it was handled.
    ///
    /// Events with no matching transition leave the machine unchanged. Specific
    /// transitions take precedence over wildcard ones.
    pub fn send(&mut self, event: EventId) -> StateId {
        let current = self.current_state;

        let transition = self
            .transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)
            .or_else(|| self.transitions.iter().find(|t| t.matches(current, event)));

        let Some(to_state) = transition.map(|t| t.to_state) else {
            return current;
        };

        if to_state != current {
            self.current_state = to_state;
            self.history.push((current, event, to_state));
        }
        to_state
    }
}
