//! Tweens
//!
//! A [`Tween`] interpolates one target's properties between two keyframes. Sampling
//! is a pure function of progress, so the same tween can be driven by a clock or by
//! the scroll position.

use crate::easing::Easing;
use crate::keyframe::Keyframe;
use crate::target::{AnimatableTarget, WriterId};
use parallax_core::{ConfigError, Result};

/// Interpolation of one target between two keyframes
#[derive(Clone, Debug)]
pub struct Tween {
    target: AnimatableTarget,
    from: Keyframe,
    to: Keyframe,
    easing: Easing,
    duration_ms: f32,
}

impl Tween {
    /// Create a tween. `from` and `to` must animate the same properties.
    pub fn new(target: AnimatableTarget, from: Keyframe, to: Keyframe) -> Result<Self> {
        let from_set = from.properties();
        let to_set = to.properties();

        if from_set != to_set {
            return Err(ConfigError::MismatchedProperties {
                target: target.label(),
                only_in_from: from_set.difference(to_set).to_string(),
                only_in_to: to_set.difference(from_set).to_string(),
            });
        }
        if from_set.is_empty() {
            return Err(ConfigError::EmptyKeyframe(target.label()));
        }

        Ok(Self {
            target,
            from,
            to,
            easing: Easing::Linear,
            duration_ms: 0.0,
        })
    }

    /// Tween from the target's current values to `to`
    pub fn to(target: AnimatableTarget, to: Keyframe) -> Result<Self> {
        let from = target.capture(&to);
        Self::new(target, from, to)
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the duration used when placed on a timeline
    pub fn duration_ms(mut self, duration_ms: f32) -> Result<Self> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(ConfigError::InvalidDuration(duration_ms));
        }
        self.duration_ms = duration_ms;
        Ok(self)
    }

    pub fn target(&self) -> &AnimatableTarget {
        &self.target
    }

    pub fn from_keyframe(&self) -> &Keyframe {
        &self.from
    }

    pub fn to_keyframe(&self) -> &Keyframe {
        &self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration_ms
    }

    /// Interpolated values at `progress`, clamped to [0, 1] before easing
    pub fn sample(&self, progress: f32) -> Keyframe {
        let eased = self.easing.apply(clamp_progress(progress));
        self.from.lerp(&self.to, eased)
    }

    /// Write the values at `progress` to the target.
    ///
    /// Returns false if the target is owned by another engine.
    pub fn advance(&self, progress: f32) -> bool {
        self.advance_as(None, progress)
    }

    pub(crate) fn advance_as(&self, writer: Option<WriterId>, progress: f32) -> bool {
        self.target.write(writer, &self.sample(progress))
    }
}

/// Clamp progress into [0, 1]; NaN maps to 0
#[inline]
pub(crate) fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::Property;

    fn visual_tween(easing: Easing) -> Tween {
        let target = AnimatableTarget::new("visual");
        Tween::new(
            target,
            Keyframe::new().with_x(0.0).with_rotate(0.0),
            Keyframe::new().with_x(240.0).with_rotate(12.0),
        )
        .unwrap()
        .easing(easing)
    }

    #[test]
    fn test_interpolation_formula() {
        for easing in [Easing::Linear, Easing::EaseOutQuart, Easing::EaseInOutSine] {
            let tween = visual_tween(easing);
            for i in 0..=10 {
                let p = i as f32 / 10.0;
                tween.advance(p);
                let expected = 240.0 * easing.apply(p);
                assert!((tween.target().get(Property::X) - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let tween = visual_tween(Easing::EaseOutBack);

        assert_eq!(tween.sample(-0.5), tween.sample(0.0));
        assert_eq!(tween.sample(1.7), tween.sample(1.0));
        assert_eq!(tween.sample(f32::NAN), tween.sample(0.0));
    }

    #[test]
    fn test_advance_is_idempotent() {
        let tween = visual_tween(Easing::EaseOutCubic);

        tween.advance(0.37);
        let first = tween.target().snapshot();
        tween.advance(0.37);
        assert_eq!(tween.target().snapshot(), first);
    }

    #[test]
    fn test_mismatched_properties_rejected() {
        let target = AnimatableTarget::new("letter");
        let err = Tween::new(
            target,
            Keyframe::new().with_y(18.0).with_blur(6.0),
            Keyframe::new().with_y(0.0).with_opacity(1.0),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::MismatchedProperties {
                target: "letter".to_string(),
                only_in_from: "blur".to_string(),
                only_in_to: "opacity".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_keyframes_rejected() {
        let target = AnimatableTarget::new("empty");
        assert!(matches!(
            Tween::new(target, Keyframe::new(), Keyframe::new()),
            Err(ConfigError::EmptyKeyframe(_))
        ));
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let tween = visual_tween(Easing::Linear);
        assert!(tween.clone().duration_ms(-1.0).is_err());
        assert!(tween.clone().duration_ms(f32::INFINITY).is_err());
        assert_eq!(tween.duration_ms(600.0).unwrap().duration(), 600.0);
    }

    #[test]
    fn test_to_captures_rest_state() {
        let target = AnimatableTarget::new("glow");
        let tween = Tween::to(target, Keyframe::new().with_x(-160.0).with_scale(1.15)).unwrap();

        assert_eq!(
            *tween.from_keyframe(),
            Keyframe::new().with_x(0.0).with_scale(1.0)
        );
    }

    #[test]
    fn test_untouched_properties_survive() {
        let tween = visual_tween(Easing::Linear);
        tween.target().set(Property::Opacity, 0.3);

        tween.advance(1.0);
        assert_eq!(tween.target().get(Property::Opacity), 0.3);
    }
}
