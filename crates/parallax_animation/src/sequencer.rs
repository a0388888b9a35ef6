//! Entrance sequencing
//!
//! An [`EntranceSequencer`] plays a timeline of staggered cohorts exactly once,
//! advancing it from frame ticks. Elapsed time only moves forward, so writes are
//! monotonic in progress.
//!
//! # Example
//!
//! ```rust
//! use parallax_animation::{
//!     AnimatableTarget, EntranceSequencer, Keyframe, Position, Property, SequencerState,
//!     StaggerGroup,
//! };
//! use parallax_core::{Event, EventDispatcher};
//!
//! let mut dispatcher = EventDispatcher::new();
//! let letters: Vec<_> = (0..3)
//!     .map(|i| AnimatableTarget::new(format!("letter-{i}")))
//!     .collect();
//!
//! let group = StaggerGroup::new(letters.clone(), Keyframe::opacity(0.0), Keyframe::opacity(1.0))?
//!     .each_ms(35.0)?
//!     .duration_ms(800.0)?;
//! let mut entrance = EntranceSequencer::from_groups([(group, Position::Append)])?;
//!
//! // The from state is applied on bind
//! entrance.bind(&mut dispatcher);
//! assert_eq!(letters[2].get(Property::Opacity), 0.0);
//!
//! dispatcher.dispatch(&Event::frame(1000.0));
//! assert_eq!(entrance.state(), SequencerState::Completed);
//! assert_eq!(letters[2].get(Property::Opacity), 1.0);
//! assert!(dispatcher.is_empty());
//! # Ok::<(), parallax_core::ConfigError>(())
//! ```

use crate::stagger::StaggerGroup;
use crate::timeline::{Position, Timeline};
use parallax_core::events::{event_types, EventDispatcher, Flow, ListenerId};
use parallax_core::fsm::{EventId, StateId, StateMachine};
use parallax_core::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const UNBOUND: StateId = 0;
const RUNNING: StateId = 1;
const COMPLETED: StateId = 2;
const TORN_DOWN: StateId = 3;

const START: EventId = 1;
const FINISH: EventId = 2;
const TEARDOWN: EventId = 3;

fn lifecycle() -> StateMachine {
    StateMachine::builder(UNBOUND)
        .on(UNBOUND, START, RUNNING)
        .on(RUNNING, START, RUNNING)
        .on(RUNNING, FINISH, COMPLETED)
        .on_any(TEARDOWN, TORN_DOWN)
        .build()
}

/// Lifecycle of an entrance sequencer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Unbound,
    Running,
    Completed,
    TornDown,
}

impl SequencerState {
    fn from_state_id(id: StateId) -> Self {
        match id {
            RUNNING => SequencerState::Running,
            COMPLETED => SequencerState::Completed,
            TORN_DOWN => SequencerState::TornDown,
            _ => SequencerState::Unbound,
        }
    }
}

struct SequenceState {
    timeline: Timeline,
    elapsed_ms: f32,
    fsm: StateMachine,
}

impl SequenceState {
    fn progress(&self) -> f32 {
        let total = self.timeline.duration_ms();
        if total <= 0.0 {
            return if self.elapsed_ms > 0.0 || self.fsm.is_in(COMPLETED) {
                1.0
            } else {
                0.0
            };
        }
        (self.elapsed_ms / total).min(1.0)
    }

    /// Advance by one frame. Returns true once the run is over.
    fn on_frame(&mut self, dt_ms: f32) -> bool {
        if !self.fsm.is_in(RUNNING) {
            return true;
        }
        // Negative or NaN deltas never move time backwards
        if dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        } else if self.timeline.duration_ms() <= 0.0 {
            self.elapsed_ms = f32::EPSILON;
        }

        let progress = self.progress();
        self.timeline.advance(progress);
        if progress < 1.0 {
            return false;
        }

        self.timeline.release_targets();
        self.fsm.send(FINISH);
        tracing::debug!(
            elapsed_ms = self.elapsed_ms,
            targets = self.timeline.len(),
            "entrance sequence completed"
        );
        true
    }
}

/// One-shot, frame-driven entrance animation
pub struct EntranceSequencer {
    state: Rc<RefCell<SequenceState>>,
    alive: Rc<Cell<bool>>,
    listener: Option<ListenerId>,
}

impl EntranceSequencer {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            state: Rc::new(RefCell::new(SequenceState {
                timeline,
                elapsed_ms: 0.0,
                fsm: lifecycle(),
            })),
            alive: Rc::new(Cell::new(false)),
            listener: None,
        }
    }

    /// Build the timeline from cohorts, each placed at its position
    pub fn from_groups<I>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (StaggerGroup, Position)>,
    {
        let mut timeline = Timeline::new();
        for (group, position) in groups {
            timeline.add_group(&group, position)?;
        }
        Ok(Self::new(timeline))
    }

    /// Apply the initial state and start playing on frame ticks.
    ///
    /// Binding while running restarts from the beginning with a single listener.
    /// A completed sequence does not run again, and a sequence with no targets stays
    /// unbound.
    pub fn bind(&mut self, dispatcher: &mut EventDispatcher) -> SequencerState {
        match self.state() {
            SequencerState::TornDown => {
                tracing::warn!("bind called on a torn down entrance sequencer");
                return SequencerState::TornDown;
            }
            SequencerState::Completed => {
                tracing::debug!("entrance sequence already played");
                return SequencerState::Completed;
            }
            SequencerState::Running => {
                tracing::debug!("entrance sequence rebound, restarting");
                self.release_listener(dispatcher);
            }
            SequencerState::Unbound => {}
        }

        {
            let mut state = self.state.borrow_mut();
            if state.timeline.is_empty() {
                tracing::debug!("entrance sequence has no targets, nothing to bind");
                return SequencerState::Unbound;
            }

            state.timeline.claim_targets();
            state.elapsed_ms = 0.0;
            state.timeline.advance(0.0);
            state.fsm.send(START);
            tracing::debug!(
                targets = state.timeline.len(),
                duration_ms = state.timeline.duration_ms(),
                "entrance sequence started"
            );
        }

        let alive = Rc::new(Cell::new(true));
        self.alive = alive.clone();

        let state = self.state.clone();
        self.listener = Some(dispatcher.register(event_types::FRAME, move |event| {
            if !alive.get() {
                return Flow::Detach;
            }
            let dt_ms = event.frame_delta().unwrap_or(0.0);
            if state.borrow_mut().on_frame(dt_ms) {
                Flow::Detach
            } else {
                Flow::Continue
            }
        }));

        SequencerState::Running
    }

    /// Stop playing and release all targets, leaving them where they are.
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self, dispatcher: &mut EventDispatcher) {
        if self.state() == SequencerState::TornDown {
            return;
        }
        self.release_listener(dispatcher);

        let mut state = self.state.borrow_mut();
        state.timeline.release_targets();
        state.fsm.send(TEARDOWN);
        tracing::debug!(
            elapsed_ms = state.elapsed_ms,
            "entrance sequence torn down"
        );
    }

    fn release_listener(&mut self, dispatcher: &mut EventDispatcher) {
        self.alive.set(false);
        if let Some(id) = self.listener.take() {
            dispatcher.unregister(id);
        }
    }

    pub fn state(&self) -> SequencerState {
        SequencerState::from_state_id(self.state.borrow().fsm.current_state())
    }

    /// Fraction of the sequence played so far
    pub fn progress(&self) -> f32 {
        self.state.borrow().progress()
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.state.borrow().elapsed_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.state.borrow().timeline.duration_ms()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().timeline.is_empty()
    }
}
