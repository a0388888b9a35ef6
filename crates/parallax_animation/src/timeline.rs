//! Timeline orchestration for multiple tweens
//!
//! Entries are placed one after another by default, or at an explicit position:
//! an absolute time, an offset from the previous entry's end (negative offsets
//! overlap), or aligned with the previous entry's start. Sampling a timeline is a
//! pure function of its progress, so it can be scrubbed as well as played.

use crate::stagger::StaggerGroup;
use crate::target::{AnimatableTarget, WriterId};
use crate::tween::{clamp_progress, Tween};
use parallax_core::{ConfigError, Result};
use slotmap::{new_key_type, SlotMap};
use std::str::FromStr;

new_key_type! {
    pub struct TimelineEntryId;
}

/// Where an entry starts on the timeline
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Position {
    /// Right after the previous entry ends
    #[default]
    Append,
    /// Offset in milliseconds from the previous entry's end (`"-=250"`, `"+=100"`)
    Relative(f32),
    /// Same start as the previous entry (`"<"`)
    WithPrevious,
    /// Absolute time in milliseconds (`"400"`)
    At(f32),
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || ConfigError::InvalidPosition(s.to_string());
        let parse_ms = |v: &str| {
            v.trim()
                .parse::<f32>()
                .ok()
                .filter(|ms| ms.is_finite())
                .ok_or_else(invalid)
        };

        match raw {
            "" | ">" => Ok(Position::Append),
            "<" => Ok(Position::WithPrevious),
            _ => {
                if let Some(v) = raw.strip_prefix("-=") {
                    Ok(Position::Relative(-parse_ms(v)?))
                } else if let Some(v) = raw.strip_prefix("+=") {
                    Ok(Position::Relative(parse_ms(v)?))
                } else {
                    let at = parse_ms(raw)?;
                    if at < 0.0 {
                        return Err(invalid());
                    }
                    Ok(Position::At(at))
                }
            }
        }
    }
}

/// An entry in a timeline
struct TimelineEntry {
    /// Start in milliseconds from timeline start
    start_ms: f32,
    tween: Tween,
}

impl TimelineEntry {
    fn local_progress(&self, time_ms: f32) -> f32 {
        let local = time_ms - self.start_ms;
        let duration = self.tween.duration();
        if duration <= 0.0 {
            return if local >= 0.0 { 1.0 } else { 0.0 };
        }
        clamp_progress(local / duration)
    }

    fn end_ms(&self) -> f32 {
        self.start_ms + self.tween.duration()
    }
}

/// A timeline that orchestrates multiple tweens
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    order: Vec<TimelineEntryId>,
    writer: WriterId,
    prev_start: f32,
    prev_end: f32,
    current_time: f32,
    duration_ms: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            writer: WriterId::next(),
            prev_start: 0.0,
            prev_end: 0.0,
            current_time: 0.0,
            duration_ms: 0.0,
        }
    }

    fn resolve_start(&self, position: Position) -> f32 {
        let start = match position {
            Position::Append => self.prev_end,
            Position::Relative(offset) => self.prev_end + offset,
            Position::WithPrevious => self.prev_start,
            Position::At(at) => at,
        };
        start.max(0.0)
    }

    fn insert(&mut self, start_ms: f32, tween: Tween) -> TimelineEntryId {
        let entry = TimelineEntry { start_ms, tween };
        self.duration_ms = self.duration_ms.max(entry.end_ms());
        let id = self.entries.insert(entry);
        self.order.push(id);
        id
    }

    /// Add a tween at a position
    pub fn add(&mut self, tween: Tween, position: Position) -> TimelineEntryId {
        let start = self.resolve_start(position);
        let end = start + tween.duration();
        let id = self.insert(start, tween);
        self.prev_start = start;
        self.prev_end = end;
        id
    }

    /// Add every target of a stagger group, starting the group at `position`.
    ///
    /// The group counts as a single entry for the next relative position.
    pub fn add_group(
        &mut self,
        group: &StaggerGroup,
        position: Position,
    ) -> Result<Vec<TimelineEntryId>> {
        let start = self.resolve_start(position);
        let tweens = group.tweens()?;

        let ids = tweens
            .into_iter()
            .map(|(delay, tween)| self.insert(start + delay, tween))
            .collect();

        self.prev_start = start;
        self.prev_end = start + group.span_ms();
        Ok(ids)
    }

    /// Sample every entry at `progress` of the total duration.
    ///
    /// Idempotent: the resulting target state depends only on `progress`.
    pub fn advance(&mut self, progress: f32) {
        let time = clamp_progress(progress) * self.duration_ms;
        self.advance_to(time);
    }

    /// Sample every entry at an absolute time in milliseconds
    pub fn advance_to(&mut self, time_ms: f32) {
        let time = if time_ms.is_nan() {
            0.0
        } else {
            time_ms.clamp(0.0, self.duration_ms)
        };
        self.current_time = time;
        self.apply_at(time);
    }

    fn apply_at(&self, time_ms: f32) {
        for id in &self.order {
            if let Some(entry) = self.entries.get(*id) {
                entry
                    .tween
                    .advance_as(Some(self.writer), entry.local_progress(time_ms));
            }
        }
    }

    /// Make this timeline the writer of all its targets.
    ///
    /// Returns how many targets were taken over from another writer.
    pub fn claim_targets(&self) -> usize {
        let mut displaced = 0;
        for target in self.targets() {
            if let Some(previous) = target.claim(self.writer) {
                tracing::debug!(
                    element = %target.label(),
                    ?previous,
                    "timeline took over target from another writer"
                );
                displaced += 1;
            }
        }
        displaced
    }

    /// Release ownership of all targets this timeline still owns
    pub fn release_targets(&self) {
        for target in self.targets() {
            target.release(self.writer);
        }
    }

    pub fn targets(&self) -> impl Iterator<Item = &AnimatableTarget> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(*id))
            .map(|entry| entry.tween.target())
    }

    pub fn writer(&self) -> WriterId {
        self.writer
    }

    /// Local progress of one entry at the current time
    pub fn entry_progress(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries
            .get(id)
            .map(|entry| entry.local_progress(self.current_time))
    }

    /// Start time of one entry
    pub fn entry_start(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id).map(|entry| entry.start_ms)
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Current time as a fraction of the duration
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return if self.entries.is_empty() { 0.0 } else { 1.0 };
        }
        self.current_time / self.duration_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
