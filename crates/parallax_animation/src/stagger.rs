//! Stagger groups
//!
//! A cohort of targets animated with the same keyframes, each one starting a fixed
//! increment after the previous. For a group with increment `s` and per-target
//! duration `d`, target `i` plays over `[i*s, i*s + d]` relative to the group start.

use crate::easing::Easing;
use crate::keyframe::Keyframe;
use crate::target::AnimatableTarget;
use crate::tween::{clamp_progress, Tween};
use parallax_core::{ConfigError, Result};

/// Direction for stagger animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// Animate first to last
    #[default]
    Forward,
    /// Animate last to first
    Reverse,
    /// Animate from center outward
    FromCenter,
}

/// Ordered targets sharing one reveal, offset per index
#[derive(Clone, Debug)]
pub struct StaggerGroup {
    targets: Vec<AnimatableTarget>,
    from: Keyframe,
    to: Keyframe,
    easing: Easing,
    each_ms: f32,
    duration_ms: f32,
    direction: StaggerDirection,
    limit: Option<usize>,
}

impl StaggerGroup {
    /// Create a group. `from` and `to` must animate the same properties.
    pub fn new(targets: Vec<AnimatableTarget>, from: Keyframe, to: Keyframe) -> Result<Self> {
        let from_set = from.properties();
        let to_set = to.properties();
        if from_set != to_set {
            return Err(ConfigError::MismatchedProperties {
                target: format!("stagger group of {}", targets.len()),
                only_in_from: from_set.difference(to_set).to_string(),
                only_in_to: to_set.difference(from_set).to_string(),
            });
        }
        if from_set.is_empty() {
            return Err(ConfigError::EmptyKeyframe(format!(
                "stagger group of {}",
                targets.len()
            )));
        }

        Ok(Self {
            targets,
            from,
            to,
            easing: Easing::Linear,
            each_ms: 0.0,
            duration_ms: 0.0,
            direction: StaggerDirection::Forward,
            limit: None,
        })
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay added per index
    pub fn each_ms(mut self, each_ms: f32) -> Result<Self> {
        self.each_ms = checked_ms(each_ms)?;
        Ok(self)
    }

    /// Duration of every target's own tween
    pub fn duration_ms(mut self, duration_ms: f32) -> Result<Self> {
        self.duration_ms = checked_ms(duration_ms)?;
        Ok(self)
    }

    /// Stagger from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Stagger from center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Cap the effective index so that items past `n` start together
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn targets(&self) -> &[AnimatableTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn direction(&self) -> StaggerDirection {
        self.direction
    }

    /// Calculate the start delay for a specific index
    pub fn delay_for_index(&self, index: usize) -> f32 {
        let total = self.targets.len();
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                index.abs_diff(center)
            }
        };

        let capped_index = match self.limit {
            Some(limit) => effective_index.min(limit),
            None => effective_index,
        };

        self.each_ms * capped_index as f32
    }

    /// Time from the group start until the last target finishes
    pub fn span_ms(&self) -> f32 {
        (0..self.targets.len())
            .map(|i| self.delay_for_index(i) + self.duration_ms)
            .fold(0.0, f32::max)
    }

    /// Progress of target `index` at `time_ms` after the group start
    pub fn local_progress(&self, index: usize, time_ms: f32) -> f32 {
        let local = time_ms - self.delay_for_index(index);
        if self.duration_ms <= 0.0 {
            return if local >= 0.0 { 1.0 } else { 0.0 };
        }
        clamp_progress(local / self.duration_ms)
    }

    /// Expand into one tween per target paired with its start delay
    pub fn tweens(&self) -> Result<Vec<(f32, Tween)>> {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let tween = Tween::new(target.clone(), self.from, self.to)?
                    .easing(self.easing)
                    .duration_ms(self.duration_ms)?;
                Ok((self.delay_for_index(i), tween))
            })
            .collect()
    }
}

fn checked_ms(value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDuration(value))
    }
}
