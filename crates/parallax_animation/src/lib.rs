//! Parallax Animation System
//!
//! Progress-driven tweens and timelines, driven either by frame ticks or by the
//! document scroll offset.
//!
//! # Features
//!
//! - **Tweens**: interpolate a target's properties between two keyframes
//! - **Timelines**: place tweens at absolute or overlapping offsets, sample by progress
//! - **Stagger Groups**: per-index delays across a cohort of targets
//! - **Entrance Sequencer**: one-shot, frame-driven reveal of staggered cohorts
//! - **Scroll Scrubber**: bind tweens to a scroll trigger region with optional lag
//! - **Glyph Formatter**: split headlines into per-glyph animation targets

pub mod easing;
pub mod glyph;
pub mod keyframe;
pub mod scrubber;
pub mod sequencer;
pub mod stagger;
pub mod target;
pub mod timeline;
pub mod trigger;
pub mod tween;

pub use easing::Easing;
pub use glyph::{Glyph, GlyphFormatter};
pub use keyframe::{Keyframe, Property, PropertySet};
pub use scrubber::{ScrollBinding, ScrollScrubber, ScrubberState, SmoothedProgress};
pub use sequencer::{EntranceSequencer, SequencerState};
pub use stagger::{StaggerDirection, StaggerGroup};
pub use target::{AnimatableTarget, TargetId, WriterId};
pub use timeline::{Position, Timeline, TimelineEntryId};
pub use trigger::{Anchor, ResolvedRegion, TriggerEdge, TriggerLayout, TriggerRegion};
pub use tween::Tween;
