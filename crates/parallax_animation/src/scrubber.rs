//! Scroll scrubbing
//!
//! A [`ScrollScrubber`] drives tweens from the document scroll offset instead of a
//! clock. The offset is mapped through a trigger region to a raw progress in [0, 1];
//! with smoothing enabled the applied progress trails the raw one through an
//! exponential lag filter that keeps converging on frame ticks after scrolling stops.
//!
//! # Example
//!
//! ```rust
//! use parallax_animation::{
//!     AnimatableTarget, Keyframe, Property, ScrollBinding, ScrollScrubber, TriggerLayout,
//!     TriggerRegion, Tween,
//! };
//! use parallax_core::{Event, EventDispatcher, Rect, Size};
//! use std::rc::Rc;
//!
//! struct Page;
//!
//! impl TriggerLayout for Page {
//!     fn reference_bounds(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 1280.0, 800.0)
//!     }
//!
//!     fn viewport(&self) -> Size {
//!         Size::new(1280.0, 800.0)
//!     }
//! }
//!
//! let mut dispatcher = EventDispatcher::new();
//! let visual = AnimatableTarget::new("visual");
//!
//! let binding = ScrollBinding::with_scrub_lag(TriggerRegion::default(), 1000.0, 16.0)?;
//! let mut scrubber = ScrollScrubber::new(binding, Rc::new(Page));
//! scrubber.add(Tween::to(visual.clone(), Keyframe::translate(240.0, 90.0))?);
//! scrubber.bind(&mut dispatcher);
//!
//! // Halfway through the region; the applied value trails behind
//! dispatcher.dispatch(&Event::scroll(400.0));
//! let x = visual.get(Property::X);
//! assert!(x > 0.0 && x < 120.0);
//!
//! // Later, on unmount
//! scrubber.teardown(&mut dispatcher);
//! assert!(dispatcher.is_empty());
//! # Ok::<(), parallax_core::ConfigError>(())
//! ```

use crate::target::{AnimatableTarget, TargetId, WriterId};
use crate::trigger::{ResolvedRegion, TriggerLayout, TriggerRegion};
use crate::tween::{clamp_progress, Tween};
use parallax_core::events::{event_types, EventDispatcher, Flow, ListenerId};
use parallax_core::fsm::{EventId, StateId, StateMachine};
use parallax_core::{ConfigError, Result};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Gap below which the smoothed value snaps to the raw one
const SETTLE_EPSILON: f32 = 1e-4;

// Lifecycle states
const UNBOUND: StateId = 0;
const IDLE: StateId = 1;
const UPDATING: StateId = 2;
const TORN_DOWN: StateId = 3;

// Lifecycle events
const BIND: EventId = 1;
const MOVE: EventId = 2;
const SETTLE: EventId = 3;
const TEARDOWN: EventId = 4;

fn lifecycle() -> StateMachine {
    StateMachine::builder(UNBOUND)
        .on(UNBOUND, BIND, IDLE)
        .on(IDLE, BIND, IDLE)
        .on(UPDATING, BIND, IDLE)
        .on(IDLE, MOVE, UPDATING)
        .on(UPDATING, MOVE, UPDATING)
        .on(UPDATING, SETTLE, IDLE)
        .on_any(TEARDOWN, TORN_DOWN)
        .build()
}

/// Lifecycle of a scroll scrubber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrubberState {
    Unbound,
    /// Bound, applied progress has caught up with the scroll position
    Idle,
    /// Bound, applied progress is still converging
    Updating,
    TornDown,
}

impl ScrubberState {
    fn from_state_id(id: StateId) -> Self {
        match id {
            IDLE => ScrubberState::Idle,
            UPDATING => ScrubberState::Updating,
            TORN_DOWN => ScrubberState::TornDown,
            _ => ScrubberState::Unbound,
        }
    }
}

/// Trigger region plus smoothing for a scroll-bound animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBinding {
    region: TriggerRegion,
    smoothing: f32,
}

impl ScrollBinding {
    /// `smoothing` is the share of the remaining gap kept per update: 0 follows the
    /// scroll position exactly, values towards 1 lag further behind.
    pub fn new(region: TriggerRegion, smoothing: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&smoothing) {
            return Err(ConfigError::InvalidSmoothing(smoothing));
        }
        Ok(Self { region, smoothing })
    }

    /// Follow the scroll position with no lag
    pub fn immediate(region: TriggerRegion) -> Self {
        Self {
            region,
            smoothing: 0.0,
        }
    }

    /// Derive the smoothing factor from a catch-up time.
    ///
    /// With updates every `frame_ms`, the gap shrinks by `e` every `lag_ms`.
    /// A lag of zero disables smoothing.
    pub fn with_scrub_lag(region: TriggerRegion, lag_ms: f32, frame_ms: f32) -> Result<Self> {
        if !lag_ms.is_finite() || lag_ms < 0.0 {
            return Err(ConfigError::InvalidDuration(lag_ms));
        }
        if !frame_ms.is_finite() || frame_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration(frame_ms));
        }
        if lag_ms == 0.0 {
            return Ok(Self::immediate(region));
        }
        Self::new(region, (-frame_ms / lag_ms).exp())
    }

    pub fn region(&self) -> TriggerRegion {
        self.region
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }
}

/// Exponential lag filter over a progress value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedProgress {
    factor: f32,
    applied: f32,
}

impl SmoothedProgress {
    pub fn new(factor: f32, initial: f32) -> Self {
        Self {
            factor,
            applied: initial,
        }
    }

    /// Move towards `raw` by `1 - factor` of the remaining gap
    pub fn update(&mut self, raw: f32) -> f32 {
        let raw = clamp_progress(raw);
        if self.factor <= 0.0 || !self.applied.is_finite() {
            self.applied = raw;
        } else {
            self.applied += (raw - self.applied) * (1.0 - self.factor);
            if (raw - self.applied).abs() < SETTLE_EPSILON {
                self.applied = raw;
            }
        }
        self.applied
    }

    pub fn value(&self) -> f32 {
        self.applied
    }

    pub fn reset(&mut self, value: f32) {
        self.applied = clamp_progress(value);
    }

    pub fn is_settled(&self, raw: f32) -> bool {
        self.applied == raw
    }
}

struct ScrubEntry {
    tween: Tween,
    progress: SmoothedProgress,
}

/// State shared between the scrubber and its listeners
struct ScrubState {
    binding: ScrollBinding,
    layout: Rc<dyn TriggerLayout>,
    region: ResolvedRegion,
    scroll_offset: f32,
    raw: f32,
    entries: FxHashMap<TargetId, ScrubEntry>,
    writer: WriterId,
    fsm: StateMachine,
}

impl ScrubState {
    fn resolve_region(&mut self) {
        self.region = self
            .binding
            .region
            .resolve(self.layout.reference_bounds(), self.layout.viewport());
        self.raw = self.region.progress(self.scroll_offset);
    }

    /// One filter update for every bound target
    fn step(&mut self) {
        let mut settled = true;
        for entry in self.entries.values_mut() {
            let applied = entry.progress.update(self.raw);
            entry.tween.advance_as(Some(self.writer), applied);
            settled &= entry.progress.is_settled(self.raw);
        }
        self.fsm.send(if settled { SETTLE } else { MOVE });
    }

    /// Jump every target straight to the raw progress
    fn snap(&mut self) {
        for entry in self.entries.values_mut() {
            entry.progress.reset(self.raw);
            entry.tween.advance_as(Some(self.writer), self.raw);
        }
    }

    fn on_scroll(&mut self, offset: f32) {
        self.scroll_offset = offset;
        self.raw = self.region.progress(offset);
        self.step();
    }

    fn on_resize(&mut self) {
        self.resolve_region();
        self.step();
    }

    fn on_frame(&mut self) {
        if self.fsm.is_in(UPDATING) {
            self.step();
        }
    }

    fn is_bound(&self) -> bool {
        self.fsm.is_in(IDLE) || self.fsm.is_in(UPDATING)
    }
}

/// Binds tweens to the scroll position through one trigger region
pub struct ScrollScrubber {
    state: Rc<RefCell<ScrubState>>,
    alive: Rc<Cell<bool>>,
    listeners: SmallVec<[ListenerId; 3]>,
}

impl ScrollScrubber {
    pub fn new(binding: ScrollBinding, layout: Rc<dyn TriggerLayout>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ScrubState {
                binding,
                layout,
                region: ResolvedRegion::default(),
                scroll_offset: 0.0,
                raw: 0.0,
                entries: FxHashMap::default(),
                writer: WriterId::next(),
                fsm: lifecycle(),
            })),
            alive: Rc::new(Cell::new(false)),
            listeners: SmallVec::new(),
        }
    }

    /// Bind a tween's target to this scrubber.
    ///
    /// Adding a target that is already bound replaces its previous tween and keeps
    /// the smoothed progress where it was. Returns true when a binding was replaced.
    pub fn add(&mut self, tween: Tween) -> bool {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let id = tween.target().id();
        let bound = state.is_bound();

        let previous = state.entries.remove(&id);
        let replaced = previous.is_some();
        let initial = previous.map_or(state.raw, |entry| entry.progress.value());
        if replaced {
            tracing::debug!(
                element = %tween.target().label(),
                "scroll binding replaced for target"
            );
        }

        if bound {
            if let Some(displaced) = tween.target().claim(state.writer) {
                tracing::debug!(
                    element = %tween.target().label(),
                    ?displaced,
                    "scrubber took over target from another writer"
                );
            }
            tween.advance_as(Some(state.writer), initial);
        }

        let progress = SmoothedProgress::new(state.binding.smoothing, initial);
        state.entries.insert(id, ScrubEntry { tween, progress });
        replaced
    }

    /// Unbind one target, leaving it at its last applied values
    pub fn remove(&mut self, target: &AnimatableTarget) -> bool {
        let mut state = self.state.borrow_mut();
        match state.entries.remove(&target.id()) {
            Some(entry) => {
                entry.tween.target().release(state.writer);
                true
            }
            None => false,
        }
    }

    /// Start listening for scroll, resize and frame events.
    ///
    /// Binding again replaces the previous listeners. A scrubber with no targets
    /// stays unbound.
    pub fn bind(&mut self, dispatcher: &mut EventDispatcher) -> ScrubberState {
        if self.state() == ScrubberState::TornDown {
            tracing::warn!("bind called on a torn down scroll scrubber");
            return ScrubberState::TornDown;
        }
        self.release_listeners(dispatcher);

        {
            let mut state = self.state.borrow_mut();
            if state.entries.is_empty() {
                tracing::debug!("scroll scrubber has no targets, nothing to bind");
                return ScrubberState::from_state_id(state.fsm.current_state());
            }

            state.scroll_offset = state.layout.scroll_offset();
            state.resolve_region();
            for entry in state.entries.values() {
                if let Some(displaced) = entry.tween.target().claim(state.writer) {
                    tracing::debug!(
                        element = %entry.tween.target().label(),
                        ?displaced,
                        "scrubber took over target from another writer"
                    );
                }
            }
            state.snap();
            state.fsm.send(BIND);

            tracing::debug!(
                targets = state.entries.len(),
                start = state.region.start,
                end = state.region.end,
                smoothing = state.binding.smoothing,
                "scroll scrubber bound"
            );
        }

        let alive = Rc::new(Cell::new(true));
        self.alive = alive.clone();

        let (state, flag) = (self.state.clone(), alive.clone());
        self.listeners
            .push(dispatcher.register(event_types::SCROLL, move |event| {
                if !flag.get() {
                    return Flow::Detach;
                }
                if let Some(offset) = event.scroll_offset() {
                    state.borrow_mut().on_scroll(offset);
                }
                Flow::Continue
            }));

        let (state, flag) = (self.state.clone(), alive.clone());
        self.listeners
            .push(dispatcher.register(event_types::RESIZE, move |_| {
                if !flag.get() {
                    return Flow::Detach;
                }
                state.borrow_mut().on_resize();
                Flow::Continue
            }));

        let (state, flag) = (self.state.clone(), alive);
        self.listeners
            .push(dispatcher.register(event_types::FRAME, move |_| {
                if !flag.get() {
                    return Flow::Detach;
                }
                state.borrow_mut().on_frame();
                Flow::Continue
            }));

        self.state()
    }

    /// Remove all listeners and release every target.
    ///
    /// Targets keep their last applied values. Safe to call more than once.
    pub fn teardown(&mut self, dispatcher: &mut EventDispatcher) {
        if self.state() == ScrubberState::TornDown {
            return;
        }
        self.release_listeners(dispatcher);

        let mut state = self.state.borrow_mut();
        for entry in state.entries.values() {
            entry.tween.target().release(state.writer);
        }
        state.fsm.send(TEARDOWN);
        tracing::debug!(targets = state.entries.len(), "scroll scrubber torn down");
    }

    fn release_listeners(&mut self, dispatcher: &mut EventDispatcher) {
        self.alive.set(false);
        for id in self.listeners.drain(..) {
            dispatcher.unregister(id);
        }
    }

    pub fn state(&self) -> ScrubberState {
        ScrubberState::from_state_id(self.state.borrow().fsm.current_state())
    }

    /// Progress implied by the current scroll offset
    pub fn raw_progress(&self) -> f32 {
        self.state.borrow().raw
    }

    /// Smoothed progress currently applied to a target
    pub fn applied_progress(&self, target: &AnimatableTarget) -> Option<f32> {
        self.state
            .borrow()
            .entries
            .get(&target.id())
            .map(|entry| entry.progress.value())
    }

    /// Trigger region resolved at the last bind or resize
    pub fn region(&self) -> ResolvedRegion {
        self.state.borrow().region
    }

    pub fn writer(&self) -> WriterId {
        self.state.borrow().writer
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::{Keyframe, Property};
    use parallax_core::{Event, Rect, Size};

    struct FixedLayout {
        bounds: Cell<Rect>,
        viewport: Size,
    }

    impl TriggerLayout for FixedLayout {
        fn reference_bounds(&self) -> Rect {
            self.bounds.get()
        }

        fn viewport(&self) -> Size {
            self.viewport
        }
    }

    /// Region resolves to [100, 500] with the default "top top" / "bottom top" edges
    fn layout() -> Rc<FixedLayout> {
        Rc::new(FixedLayout {
            bounds: Cell::new(Rect::new(0.0, 100.0, 1280.0, 400.0)),
            viewport: Size::new(1280.0, 800.0),
        })
    }

    fn slide(label: &str) -> Tween {
        Tween::new(
            AnimatableTarget::new(label),
            Keyframe::new().with_x(0.0),
            Keyframe::new().with_x(100.0),
        )
        .unwrap()
    }

    #[test]
    fn test_binding_validation() {
        let region = TriggerRegion::default();
        assert!(ScrollBinding::new(region, 0.0).is_ok());
        assert!(ScrollBinding::new(region, 1.0).is_ok());
        assert_eq!(
            ScrollBinding::new(region, 1.5),
            Err(ConfigError::InvalidSmoothing(1.5))
        );
        assert!(ScrollBinding::new(region, f32::NAN).is_err());
        assert!(ScrollBinding::with_scrub_lag(region, 1000.0, 0.0).is_err());
    }

    #[test]
    fn test_scrub_lag_factor() {
        let binding =
            ScrollBinding::with_scrub_lag(TriggerRegion::default(), 1000.0, 16.0).unwrap();
        assert!((binding.smoothing() - (-0.016f32).exp()).abs() < 1e-6);

        let instant = ScrollBinding::with_scrub_lag(TriggerRegion::default(), 0.0, 16.0).unwrap();
        assert_eq!(instant.smoothing(), 0.0);
    }

    #[test]
    fn test_smoothing_gap_shrinks_geometrically() {
        let k = 0.5;
        let mut filter = SmoothedProgress::new(k, 0.0);
        let raw = 1.0;

        let mut previous_gap = raw - filter.value();
        for n in 1..=6 {
            filter.update(raw);
            let gap = raw - filter.value();
            assert!((gap - k.powi(n)).abs() < 1e-6, "gap after {n} updates");
            assert!(gap < previous_gap);
            previous_gap = gap;
        }
    }

    #[test]
    fn test_no_smoothing_follows_raw() {
        let mut filter = SmoothedProgress::new(0.0, 0.0);
        assert_eq!(filter.update(0.7), 0.7);
        assert_eq!(filter.update(0.2), 0.2);
    }

    #[test]
    fn test_filter_recovers_from_non_finite_values() {
        let mut filter = SmoothedProgress::new(0.5, f32::NAN);
        assert_eq!(filter.update(0.5), 0.5);
        assert!(filter.is_settled(0.5));

        assert_eq!(filter.update(f32::NAN), 0.25);
        filter.reset(f32::INFINITY);
        assert_eq!(filter.value(), 1.0);
    }

    #[test]
    fn test_nan_scroll_does_not_stick() {
        let mut dispatcher = EventDispatcher::new();
        let tween = slide("visual");
        let target = tween.target().clone();

        let mut scrubber =
            ScrollScrubber::new(ScrollBinding::new(TriggerRegion::default(), 0.5).unwrap(), layout());
        scrubber.add(tween);
        scrubber.bind(&mut dispatcher);

        dispatcher.dispatch(&Event::scroll(f32::NAN));
        assert_eq!(scrubber.raw_progress(), 0.0);
        assert_eq!(target.get(Property::X), 0.0);

        dispatcher.dispatch(&Event::scroll(300.0));
        for _ in 0..200 {
            dispatcher.dispatch(&Event::frame(16.0));
        }
        assert_eq!(scrubber.applied_progress(&target), Some(0.5));
        assert_eq!(target.get(Property::X), 50.0);
        assert_eq!(scrubber.state(), ScrubberState::Idle);
    }

    #[test]
    fn test_lifecycle_history_stays_bounded() {
        let mut dispatcher = EventDispatcher::new();
        let mut scrubber =
            ScrollScrubber::new(ScrollBinding::new(TriggerRegion::default(), 0.9).unwrap(), layout());
        scrubber.add(slide("visual"));
        scrubber.bind(&mut dispatcher);

        for i in 0..10_000 {
            dispatcher.dispatch(&Event::scroll(100.0 + (i % 400) as f32));
            dispatcher.dispatch(&Event::frame(16.0));
        }
        assert_eq!(scrubber.state(), ScrubberState::Updating);
        // Bound, then moving; repeated moves are not recorded
        assert_eq!(scrubber.state.borrow().fsm.history().len(), 2);
    }

    #[test]
    fn test_scroll_drives_progress() {
        let mut dispatcher = EventDispatcher::new();
        let tween = slide("visual");
        let target = tween.target().clone();

        let mut scrubber = ScrollScrubber::new(
            ScrollBinding::immediate(TriggerRegion::default()),
            layout(),
        );
        scrubber.add(tween);
        assert_eq!(scrubber.bind(&mut dispatcher), ScrubberState::Idle);
        assert_eq!(scrubber.region(), ResolvedRegion::new(100.0, 500.0));

        dispatcher.dispatch(&Event::scroll(300.0));
        assert_eq!(scrubber.raw_progress(), 0.5);
        assert_eq!(target.get(Property::X), 50.0);

        dispatcher.dispatch(&Event::scroll(50.0));
        assert_eq!(target.get(Property::X), 0.0);

        dispatcher.dispatch(&Event::scroll(900.0));
        assert_eq!(target.get(Property::X), 100.0);

        // Scrolling back reverses
        dispatcher.dispatch(&Event::scroll(200.0));
        assert_eq!(target.get(Property::X), 25.0);
    }

    #[test]
    fn test_smoothed_scrub_converges_on_frames() {
        let mut dispatcher = EventDispatcher::new();
        let tween = slide("glow");
        let target = tween.target().clone();

        let mut scrubber =
            ScrollScrubber::new(ScrollBinding::new(TriggerRegion::default(), 0.5).unwrap(), layout());
        scrubber.add(tween);
        scrubber.bind(&mut dispatcher);

        dispatcher.dispatch(&Event::scroll(500.0));
        assert_eq!(scrubber.state(), ScrubberState::Updating);
        assert_eq!(scrubber.applied_progress(&target), Some(0.5));

        dispatcher.dispatch(&Event::frame(16.0));
        assert_eq!(scrubber.applied_progress(&target), Some(0.75));

        for _ in 0..40 {
            dispatcher.dispatch(&Event::frame(16.0));
        }
        assert_eq!(scrubber.state(), ScrubberState::Idle);
        assert_eq!(target.get(Property::X), 100.0);
    }

    #[test]
    fn test_resize_re_resolves_region() {
        let mut dispatcher = EventDispatcher::new();
        let layout = layout();
        let tween = slide("bg");
        let target = tween.target().clone();

        let mut scrubber = ScrollScrubber::new(
            ScrollBinding::immediate(TriggerRegion::default()),
            layout.clone(),
        );
        scrubber.add(tween);
        scrubber.bind(&mut dispatcher);
        dispatcher.dispatch(&Event::scroll(300.0));
        assert_eq!(target.get(Property::X), 50.0);

        // Element grows to 800px tall: region becomes [100, 900]
        layout.bounds.set(Rect::new(0.0, 100.0, 1280.0, 800.0));
        dispatcher.dispatch(&Event::resize(1280.0, 800.0));
        assert_eq!(scrubber.region(), ResolvedRegion::new(100.0, 900.0));
        assert_eq!(target.get(Property::X), 25.0);
    }

    #[test]
    fn test_rebinding_same_target_replaces() {
        let mut dispatcher = EventDispatcher::new();
        let target = AnimatableTarget::new("visual");
        let mut scrubber = ScrollScrubber::new(
            ScrollBinding::immediate(TriggerRegion::default()),
            layout(),
        );

        let first = Tween::new(
            target.clone(),
            Keyframe::new().with_x(0.0),
            Keyframe::new().with_x(100.0),
        )
        .unwrap();
        let second = Tween::new(
            target.clone(),
            Keyframe::new().with_x(0.0),
            Keyframe::new().with_x(-100.0),
        )
        .unwrap();

        assert!(!scrubber.add(first));
        scrubber.bind(&mut dispatcher);
        assert!(scrubber.add(second));
        assert_eq!(scrubber.len(), 1);

        dispatcher.dispatch(&Event::scroll(300.0));
        assert_eq!(target.get(Property::X), -50.0);

        // Binding twice keeps a single set of listeners
        scrubber.bind(&mut dispatcher);
        assert_eq!(dispatcher.listener_count(event_types::SCROLL), 1);
        assert_eq!(dispatcher.len(), 3);
    }

    #[test]
    fn test_teardown_stops_mutation() {
        let mut dispatcher = EventDispatcher::new();
        let tween = slide("visual");
        let target = tween.target().clone();

        let mut scrubber =
            ScrollScrubber::new(ScrollBinding::new(TriggerRegion::default(), 0.5).unwrap(), layout());
        scrubber.add(tween);
        scrubber.bind(&mut dispatcher);
        dispatcher.dispatch(&Event::scroll(300.0));
        let frozen = target.get(Property::X);

        scrubber.teardown(&mut dispatcher);
        scrubber.teardown(&mut dispatcher);
        assert_eq!(scrubber.state(), ScrubberState::TornDown);
        assert!(dispatcher.is_empty());

        dispatcher.dispatch(&Event::scroll(500.0));
        dispatcher.dispatch(&Event::resize(1280.0, 400.0));
        dispatcher.dispatch(&Event::frame(16.0));
        assert_eq!(target.get(Property::X), frozen);
        assert_eq!(target.writer(), None);

        assert_eq!(scrubber.bind(&mut dispatcher), ScrubberState::TornDown);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_empty_scrubber_stays_unbound() {
        let mut dispatcher = EventDispatcher::new();
        let mut scrubber = ScrollScrubber::new(
            ScrollBinding::immediate(TriggerRegion::default()),
            layout(),
        );

        assert_eq!(scrubber.bind(&mut dispatcher), ScrubberState::Unbound);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_second_scrubber_takes_over_target() {
        let mut dispatcher = EventDispatcher::new();
        let target = AnimatableTarget::new("shared");
        let tween = |to: f32| {
            Tween::new(
                target.clone(),
                Keyframe::new().with_x(0.0),
                Keyframe::new().with_x(to),
            )
            .unwrap()
        };

        let mut first = ScrollScrubber::new(
            ScrollBinding::immediate(TriggerRegion::default()),
            layout(),
        );
        first.add(tween(100.0));
        first.bind(&mut dispatcher);

        let mut second = ScrollScrubber::new(
            ScrollBinding::immediate(TriggerRegion::default()),
            layout(),
        );
        second.add(tween(10.0));
        second.bind(&mut dispatcher);

        // Only the newest binding writes
        dispatcher.dispatch(&Event::scroll(500.0));
        assert_eq!(target.get(Property::X), 10.0);
        assert_eq!(target.writer(), Some(second.writer()));
    }
}
