//! Parallax Core Runtime
//!
//! This crate provides the foundational primitives shared by the Parallax animation
//! engine and the page composition layer:
//!
//! - **Geometry**: points, sizes and rectangles in document space
//! - **Event Dispatch**: frame, scroll and resize events with removable listeners
//! - **State Machines**: flat lifecycle machines for bindable components
//! - **Errors**: construction-time configuration errors
//!
//! # Example
//!
//! ```rust
//! use parallax_core::events::{event_types, Event, EventDispatcher, Flow};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut dispatcher = EventDispatcher::new();
//! let last_offset = Rc::new(Cell::new(0.0f32));
//!
//! let sink = last_offset.clone();
//! let id = dispatcher.register(event_types::SCROLL, move |event| {
//!     if let Some(offset) = event.scroll_offset() {
//!         sink.set(offset);
//!     }
//!     Flow::Continue
//! });
//!
//! dispatcher.dispatch(&Event::scroll(240.0));
//! assert_eq!(last_offset.get(), 240.0);
//!
//! dispatcher.unregister(id);
//! dispatcher.dispatch(&Event::scroll(10.0));
//! assert_eq!(last_offset.get(), 240.0);
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use error::{ConfigError, Result};
pub use events::{Event, EventData, EventDispatcher, EventType, Flow, ListenerId};
pub use fsm::{EventId, StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
