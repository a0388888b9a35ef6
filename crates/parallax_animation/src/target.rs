//! Animatable targets
//!
//! An [`AnimatableTarget`] is the engine's handle to a visual element owned by the
//! page. Cloning the handle shares the same element. Each target remembers which
//! engine instance currently writes to it, so that two engines never race on the
//! same element.

use crate::keyframe::{Keyframe, Property};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_WRITER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

/// Identity of an engine instance allowed to write targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WriterId(u64);

impl WriterId {
    /// Allocate a fresh writer identity
    pub fn next() -> Self {
        WriterId(NEXT_WRITER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

struct TargetState {
    label: String,
    values: [f32; Property::COUNT],
    writer: Option<WriterId>,
}

/// Shared handle to an animated element
#[derive(Clone)]
pub struct AnimatableTarget {
    id: TargetId,
    state: Rc<RefCell<TargetState>>,
}

impl AnimatableTarget {
    /// Create a target at rest (no offset, full opacity, unit scale)
    pub fn new(label: impl Into<String>) -> Self {
        let mut values = [0.0; Property::COUNT];
        for property in Property::ALL {
            values[property.index()] = property.rest_value();
        }
        Self {
            id: TargetId(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed)),
            state: Rc::new(RefCell::new(TargetState {
                label: label.into(),
                values,
                writer: None,
            })),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn label(&self) -> String {
        self.state.borrow().label.clone()
    }

    pub fn get(&self, property: Property) -> f32 {
        self.state.borrow().values[property.index()]
    }

    /// Set a property directly, bypassing writer ownership.
    ///
    /// Intended for the page layer's static setup before any engine binds.
    pub fn set(&self, property: Property, value: f32) {
        self.state.borrow_mut().values[property.index()] = value;
    }

    /// Current values of every property
    pub fn snapshot(&self) -> Keyframe {
        let state = self.state.borrow();
        Property::ALL
            .into_iter()
            .fold(Keyframe::new(), |kf, p| kf.with(p, state.values[p.index()]))
    }

    /// Current values of the properties set on `keyframe`
    pub fn capture(&self, keyframe: &Keyframe) -> Keyframe {
        let state = self.state.borrow();
        keyframe
            .iter()
            .fold(Keyframe::new(), |kf, (p, _)| kf.with(p, state.values[p.index()]))
    }

    /// The writer currently bound to this target
    pub fn writer(&self) -> Option<WriterId> {
        self.state.borrow().writer
    }

    /// Make `writer` the only engine allowed to write this target.
    ///
    /// Returns the previous owner if a different writer was displaced.
    pub fn claim(&self, writer: WriterId) -> Option<WriterId> {
        let mut state = self.state.borrow_mut();
        let previous = state.writer.replace(writer);
        previous.filter(|prev| *prev != writer)
    }

    /// Give up ownership. Only the current owner can release.
    pub fn release(&self, writer: WriterId) -> bool {
        let mut state = self.state.borrow_mut();
        if state.writer == Some(writer) {
            state.writer = None;
            true
        } else {
            false
        }
    }

    /// Whether `writer` may write this target: either it owns it, or nobody does
    pub fn is_writable_by(&self, writer: Option<WriterId>) -> bool {
        let owner = self.state.borrow().writer;
        owner.is_none() || owner == writer
    }

    /// Write every property of `values` if `writer` is allowed to.
    ///
    /// Returns false, leaving the target untouched, when another writer owns it.
    pub fn write(&self, writer: Option<WriterId>, values: &Keyframe) -> bool {
        let mut state = self.state.borrow_mut();
        if state.writer.is_some() && state.writer != writer {
            return false;
        }
        for (property, value) in values.iter() {
            state.values[property.index()] = value;
        }
        true
    }

    /// Whether two handles refer to the same element
    pub fn ptr_eq(&self, other: &AnimatableTarget) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for AnimatableTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AnimatableTarget")
            .field("id", &self.id)
            .field("label", &state.label)
            .field("values", &state.values)
            .field("writer", &state.writer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_target_is_at_rest() {
        let target = AnimatableTarget::new("visual");
        assert_eq!(target.get(Property::X), 0.0);
        assert_eq!(target.get(Property::Scale), 1.0);
        assert_eq!(target.get(Property::Opacity), 1.0);
        assert_eq!(target.label(), "visual");
    }

    #[test]
    fn test_clones_share_state() {
        let target = AnimatableTarget::new("glow");
        let alias = target.clone();

        alias.set(Property::Y, 60.0);
        assert_eq!(target.get(Property::Y), 60.0);
        assert!(target.ptr_eq(&alias));
        assert_eq!(target.id(), alias.id());
    }

    #[test]
    fn test_single_writer() {
        let target = AnimatableTarget::new("letter");
        let first = WriterId::next();
        let second = WriterId::next();

        assert_eq!(target.claim(first), None);
        assert!(target.write(Some(first), &Keyframe::opacity(0.2)));

        // A second engine takes over; the first one's writes are ignored
        assert_eq!(target.claim(second), Some(first));
        assert!(!target.write(Some(first), &Keyframe::opacity(0.9)));
        assert!(target.write(Some(second), &Keyframe::opacity(0.4)));
        assert_eq!(target.get(Property::Opacity), 0.4);

        // Releasing needs the current owner
        assert!(!target.release(first));
        assert!(target.release(second));
        assert!(target.is_writable_by(None));
    }

    #[test]
    fn test_capture_reads_matching_properties() {
        let target = AnimatableTarget::new("bg");
        target.set(Property::Y, 12.0);

        let captured = target.capture(&Keyframe::new().with_y(80.0));
        assert_eq!(captured, Keyframe::new().with_y(12.0));
    }
}
