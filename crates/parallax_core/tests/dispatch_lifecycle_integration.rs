//! Integration tests for event dispatch + lifecycle state machines
//!
//! These tests verify that:
//! - A component can drive its lifecycle machine from dispatched events
//! - Listeners gated by a liveness flag stop acting once torn down
//! - Self-detaching listeners and explicit unregistration compose

use parallax_core::events::{event_types, Event, EventDispatcher, Flow};
use parallax_core::fsm::StateMachine;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const IDLE: u32 = 0;
const ACTIVE: u32 = 1;
const DONE: u32 = 2;
const TORN_DOWN: u32 = 3;

const SCROLLED: u32 = 1;
const FINISHED: u32 = 2;
const TEARDOWN: u32 = 3;

fn machine() -> StateMachine {
    StateMachine::builder(IDLE)
        .on(IDLE, SCROLLED, ACTIVE)
        .on(ACTIVE, SCROLLED, ACTIVE)
        .on(ACTIVE, FINISHED, DONE)
        .on_any(TEARDOWN, TORN_DOWN)
        .build()
}

/// Scroll events move a shared machine, frame events finish it
#[test]
fn test_events_drive_lifecycle() {
    let mut dispatcher = EventDispatcher::new();
    let fsm = Rc::new(RefCell::new(machine()));

    let scroll_fsm = fsm.clone();
    dispatcher.register(event_types::SCROLL, move |_| {
        scroll_fsm.borrow_mut().send(SCROLLED);
        Flow::Continue
    });

    let frame_fsm = fsm.clone();
    dispatcher.register(event_types::FRAME, move |_| {
        if frame_fsm.borrow_mut().send(FINISHED) == DONE {
            Flow::Detach
        } else {
            Flow::Continue
        }
    });

    // Frame before any scroll has no transition and stays registered
    dispatcher.dispatch(&Event::frame(16.0));
    assert!(fsm.borrow().is_in(IDLE));
    assert_eq!(dispatcher.listener_count(event_types::FRAME), 1);

    dispatcher.dispatch(&Event::scroll(120.0));
    assert!(fsm.borrow().is_in(ACTIVE));

    dispatcher.dispatch(&Event::frame(16.0));
    assert!(fsm.borrow().is_in(DONE));
    assert_eq!(dispatcher.listener_count(event_types::FRAME), 0);

    fsm.borrow_mut().send(TEARDOWN);
    assert!(fsm.borrow().is_in(TORN_DOWN));
    assert_eq!(fsm.borrow().history().len(), 3);
}

/// A dead liveness flag makes a listener skip its work and detach itself
#[test]
fn test_liveness_flag_gates_listener() {
    let mut dispatcher = EventDispatcher::new();
    let alive = Rc::new(Cell::new(true));
    let applied = Rc::new(Cell::new(0.0f32));

    let (flag, sink) = (alive.clone(), applied.clone());
    let id = dispatcher.register(event_types::SCROLL, move |event| {
        if !flag.get() {
            return Flow::Detach;
        }
        if let Some(offset) = event.scroll_offset() {
            sink.set(offset);
        }
        Flow::Continue
    });

    dispatcher.dispatch(&Event::scroll(40.0));
    assert_eq!(applied.get(), 40.0);

    alive.set(false);
    dispatcher.dispatch(&Event::scroll(80.0));
    assert_eq!(applied.get(), 40.0);
    assert!(!dispatcher.is_registered(id));
    assert!(!dispatcher.unregister(id));
}

/// Resize listeners see the new viewport
#[test]
fn test_resize_payload() {
    let mut dispatcher = EventDispatcher::new();
    let seen = Rc::new(Cell::new((0.0f32, 0.0f32)));

    let sink = seen.clone();
    dispatcher.register(event_types::RESIZE, move |event| {
        if let parallax_core::EventData::Resize { width, height } = event.data {
            sink.set((width, height));
        }
        Flow::Continue
    });

    dispatcher.dispatch(&Event::resize(1280.0, 720.0).with_timestamp(7));
    assert_eq!(seen.get(), (1280.0, 720.0));
}
