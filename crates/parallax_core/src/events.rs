//! Event dispatch system
//!
//! All animation advancement happens on one UI loop: the host dispatches frame ticks,
//! scroll offsets and viewport resizes, and bound components react to them through
//! listeners registered here. Registration hands back a [`ListenerId`] so that teardown
//! can remove exactly what was added.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Display refresh tick
    pub const FRAME: EventType = 1;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
}

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Frame {
        /// Milliseconds since the previous frame
        dt_ms: f32,
    },
    Scroll {
        /// Absolute vertical scroll offset of the document
        offset_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0,
        }
    }

    /// A frame tick carrying the elapsed time since the last one
    pub fn frame(dt_ms: f32) -> Self {
        Self::new(event_types::FRAME, EventData::Frame { dt_ms })
    }

    /// A scroll event carrying the absolute document offset
    pub fn scroll(offset_y: f32) -> Self {
        Self::new(event_types::SCROLL, EventData::Scroll { offset_y })
    }

    /// A viewport resize
    pub fn resize(width: f32, height: f32) -> Self {
        Self::new(event_types::RESIZE, EventData::Resize { width, height })
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Frame delta in milliseconds, if this is a frame event
    pub fn frame_delta(&self) -> Option<f32> {
        match self.data {
            EventData::Frame { dt_ms } => Some(dt_ms),
            _ => None,
        }
    }

    /// Scroll offset, if this is a scroll event
    pub fn scroll_offset(&self) -> Option<f32> {
        match self.data {
            EventData::Scroll { offset_y } => Some(offset_y),
            _ => None,
        }
    }
}

/// What a listener wants after handling an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Stay registered
    Continue,
    /// Remove this listener once the current dispatch finishes
    Detach,
}

/// Event handler function type
pub type EventHandler = Box<dyn FnMut(&Event) -> Flow>;

struct Listener {
    event_type: EventType,
    handler: EventHandler,
}

/// Dispatches events to registered listeners
///
/// Listeners for one event type run in registration order. The dispatcher is owned by
/// the host's UI loop and is not shared across threads.
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    by_type: FxHashMap<EventType, SmallVec<[ListenerId; 4]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_type: FxHashMap::default(),
        }
    }

    /// Register a listener for an event type
    pub fn register<F>(&mut self, event_type: EventType, handler: F) -> ListenerId
    where
        F: FnMut(&Event) -> Flow + 'static,
    {
        let id = self.listeners.insert(Listener {
            event_type,
            handler: Box::new(handler),
        });
        self.by_type.entry(event_type).or_default().push(id);
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_type.get_mut(&listener.event_type) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_type.remove(&listener.event_type);
            }
        }
        true
    }

    /// Whether a listener is still registered
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Number of listeners for an event type
    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.by_type.get(&event_type).map_or(0, |ids| ids.len())
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Dispatch an event to every listener of its type.
    ///
    /// Returns the number of listeners that ran.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let Some(ids) = self.by_type.get(&event.event_type) else {
            return 0;
        };

        let mut detached: SmallVec<[ListenerId; 4]> = SmallVec::new();
        let mut ran = 0;
        for id in ids.iter() {
            if let Some(listener) = self.listeners.get_mut(*id) {
                ran += 1;
                if (listener.handler)(event) == Flow::Detach {
                    detached.push(*id);
                }
            }
        }

        for id in detached {
            tracing::trace!(?id, event_type = event.event_type, "listener detached");
            self.unregister(id);
        }
        ran
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
