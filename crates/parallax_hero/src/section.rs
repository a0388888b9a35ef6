//! Hero section composition
//!
//! [`HeroSection`] owns the section's animation targets and wires them to an
//! entrance sequence and a scroll scrubber on mount:
//!
//! - headline glyphs and stat cards reveal once, staggered, on frame ticks
//! - the visual, the glow and the background drift with the scroll position
//!
//! Every motion parameter is validated and turned into tweens when the section is
//! built, so mounting never fails on bad configuration.

use crate::config::{CohortMotion, HeroConfig, ScrollMotion};
use crate::error::Result;
use parallax_animation::{
    AnimatableTarget, Easing, EntranceSequencer, Glyph, GlyphFormatter, Keyframe, Position,
    Property, ScrollBinding, ScrollScrubber, ScrubberState, SequencerState, StaggerGroup,
    TriggerLayout, Tween,
};
use parallax_core::EventDispatcher;
use smallvec::SmallVec;
use std::rc::Rc;

/// Components bound for the current mount
struct MountedMotion {
    entrance: EntranceSequencer,
    scrubber: ScrollScrubber,
}

/// The hero section: targets, motion plan and mount state
pub struct HeroSection {
    config: HeroConfig,
    glyphs: Vec<Glyph>,
    letters: Vec<AnimatableTarget>,
    stat_cards: Vec<AnimatableTarget>,
    headline: AnimatableTarget,
    stats: AnimatableTarget,
    visual: AnimatableTarget,
    glow: AnimatableTarget,
    background: AnimatableTarget,
    entrance_plan: Vec<(StaggerGroup, Position)>,
    drift: SmallVec<[Tween; 3]>,
    binding: ScrollBinding,
    mounted: Option<MountedMotion>,
}

impl HeroSection {
    /// Build the section's targets and motion plan
    pub fn new(config: HeroConfig) -> Result<Self> {
        config.validate()?;
        let motion = &config.motion;

        let glyphs = GlyphFormatter::new()
            .letter_gap(motion.letter_gap)
            .format(&config.content.headline);
        let letters: Vec<_> = (0..glyphs.len())
            .map(|i| AnimatableTarget::new(format!("letter-{i}")))
            .collect();
        let stat_cards: Vec<_> = (0..config.content.stats.len())
            .map(|i| AnimatableTarget::new(format!("stat-{i}")))
            .collect();

        // Containers stay hidden until mount
        let headline = AnimatableTarget::new("headline");
        headline.set(Property::Opacity, 0.0);
        let stats = AnimatableTarget::new("stats");
        stats.set(Property::Opacity, 0.0);

        let visual = AnimatableTarget::new("visual");
        let glow = AnimatableTarget::new("glow");
        let background = AnimatableTarget::new("background");

        let easing = motion.easing()?;
        let entrance_plan = vec![
            cohort(letters.clone(), &motion.letters, easing)?,
            cohort(stat_cards.clone(), &motion.stats, easing)?,
        ];
        let drift = SmallVec::from_iter([
            drift_tween(&visual, &motion.visual)?,
            drift_tween(&glow, &motion.glow)?,
            drift_tween(&background, &motion.background)?,
        ]);
        let binding = motion.trigger.binding()?;

        tracing::debug!(
            glyphs = glyphs.len(),
            stats = stat_cards.len(),
            smoothing = binding.smoothing(),
            "hero section built"
        );

        Ok(Self {
            config,
            glyphs,
            letters,
            stat_cards,
            headline,
            stats,
            visual,
            glow,
            background,
            entrance_plan,
            drift,
            binding,
            mounted: None,
        })
    }

    /// Reveal the containers, start the entrance and bind the scroll drift.
    ///
    /// Mounting an already mounted section tears the previous run down first.
    pub fn mount(
        &mut self,
        dispatcher: &mut EventDispatcher,
        layout: Rc<dyn TriggerLayout>,
    ) -> Result<()> {
        if self.mounted.is_some() {
            tracing::debug!("hero section already mounted, releasing previous run");
            self.unmount(dispatcher);
        }

        self.headline.set(Property::Opacity, 1.0);
        self.stats.set(Property::Opacity, 1.0);

        let mut entrance = EntranceSequencer::from_groups(self.entrance_plan.iter().cloned())?;
        let mut scrubber = ScrollScrubber::new(self.binding, layout);
        for tween in &self.drift {
            scrubber.add(tween.clone());
        }

        let entrance_state = entrance.bind(dispatcher);
        let scroll_state = scrubber.bind(dispatcher);
        tracing::info!(
            ?entrance_state,
            ?scroll_state,
            entrance_ms = entrance.duration_ms(),
            "hero section mounted"
        );

        self.mounted = Some(MountedMotion { entrance, scrubber });
        Ok(())
    }

    /// Tear down every listener, leaving targets where they are. Idempotent.
    pub fn unmount(&mut self, dispatcher: &mut EventDispatcher) {
        let Some(mut mounted) = self.mounted.take() else {
            tracing::debug!("hero section not mounted");
            return;
        };
        mounted.entrance.teardown(dispatcher);
        mounted.scrubber.teardown(dispatcher);
        tracing::info!("hero section unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn entrance_state(&self) -> Option<SequencerState> {
        self.mounted.as_ref().map(|m| m.entrance.state())
    }

    pub fn scroll_state(&self) -> Option<ScrubberState> {
        self.mounted.as_ref().map(|m| m.scrubber.state())
    }

    /// Raw scroll progress through the trigger region
    pub fn scroll_progress(&self) -> Option<f32> {
        self.mounted.as_ref().map(|m| m.scrubber.raw_progress())
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn letters(&self) -> &[AnimatableTarget] {
        &self.letters
    }

    pub fn stat_cards(&self) -> &[AnimatableTarget] {
        &self.stat_cards
    }

    pub fn headline(&self) -> &AnimatableTarget {
        &self.headline
    }

    pub fn stats(&self) -> &AnimatableTarget {
        &self.stats
    }

    pub fn visual(&self) -> &AnimatableTarget {
        &self.visual
    }

    pub fn glow(&self) -> &AnimatableTarget {
        &self.glow
    }

    pub fn background(&self) -> &AnimatableTarget {
        &self.background
    }

    /// Every target, back to front
    pub fn targets(&self) -> impl Iterator<Item = &AnimatableTarget> + '_ {
        [&self.background, &self.glow, &self.headline]
            .into_iter()
            .chain(self.letters.iter())
            .chain(std::iter::once(&self.stats))
            .chain(self.stat_cards.iter())
            .chain(std::iter::once(&self.visual))
    }

    /// Look up a target by label (`"visual"`, `"letter-3"`, `"stat-0"`, ...)
    pub fn target(&self, label: &str) -> Option<&AnimatableTarget> {
        self.targets().find(|target| target.label() == label)
    }

    /// Current values of every target, for the renderer
    pub fn snapshot(&self) -> Vec<(String, Keyframe)> {
        self.targets()
            .map(|target| (target.label(), target.snapshot()))
            .collect()
    }
}

fn cohort(
    targets: Vec<AnimatableTarget>,
    motion: &CohortMotion,
    default_easing: Easing,
) -> Result<(StaggerGroup, Position)> {
    let group = StaggerGroup::new(targets, motion.from.to_keyframe(), motion.to.to_keyframe())?
        .easing(motion.easing(default_easing)?)
        .each_ms(motion.stagger_ms)?
        .duration_ms(motion.duration_ms)?;
    Ok((group, motion.position()?))
}

/// Drift from the target's rest state, captured before anything moves it
fn drift_tween(target: &AnimatableTarget, motion: &ScrollMotion) -> Result<Tween> {
    Ok(Tween::to(target.clone(), motion.to.to_keyframe())?.easing(motion.easing()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageLayout;
    use parallax_core::{Event, Size};

    fn layout() -> Rc<PageLayout> {
        Rc::new(PageLayout::full_viewport(Size::new(1280.0, 800.0)))
    }

    #[test]
    fn test_builds_targets_from_content() {
        let section = HeroSection::new(HeroConfig::default()).unwrap();

        // 14 letters plus two word gaps of two separators each
        assert_eq!(section.glyphs().len(), 18);
        assert_eq!(section.letters().len(), 18);
        assert_eq!(section.stat_cards().len(), 3);
        assert_eq!(section.headline().get(Property::Opacity), 0.0);
        assert_eq!(section.snapshot().len(), 18 + 3 + 5);
        assert!(section.target("stat-2").is_some());
        assert!(section.target("letter-18").is_none());
    }

    #[test]
    fn test_mount_reveals_containers_and_hides_letters() {
        let mut dispatcher = EventDispatcher::new();
        let mut section = HeroSection::new(HeroConfig::default()).unwrap();
        section.mount(&mut dispatcher, layout()).unwrap();

        assert_eq!(section.headline().get(Property::Opacity), 1.0);
        assert_eq!(section.stats().get(Property::Opacity), 1.0);
        assert_eq!(section.letters()[0].get(Property::Opacity), 0.0);
        assert_eq!(section.letters()[0].get(Property::Y), 18.0);
        assert_eq!(section.stat_cards()[0].get(Property::Blur), 4.0);
        assert_eq!(section.entrance_state(), Some(SequencerState::Running));
        assert_eq!(section.scroll_state(), Some(ScrubberState::Idle));
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let mut dispatcher = EventDispatcher::new();
        let mut section = HeroSection::new(HeroConfig::default()).unwrap();
        section.mount(&mut dispatcher, layout()).unwrap();
        dispatcher.dispatch(&Event::frame(100.0));

        section.unmount(&mut dispatcher);
        section.unmount(&mut dispatcher);
        assert!(!section.is_mounted());
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_remount_replays_entrance() {
        let mut dispatcher = EventDispatcher::new();
        let mut section = HeroSection::new(HeroConfig::default()).unwrap();
        let layout = layout();

        section.mount(&mut dispatcher, layout.clone()).unwrap();
        for _ in 0..200 {
            dispatcher.dispatch(&Event::frame(16.0));
        }
        assert_eq!(section.entrance_state(), Some(SequencerState::Completed));

        section.mount(&mut dispatcher, layout).unwrap();
        assert_eq!(section.entrance_state(), Some(SequencerState::Running));
        assert_eq!(section.letters()[0].get(Property::Opacity), 0.0);
        // FRAME from the new entrance and scrubber, SCROLL and RESIZE from the scrubber
        assert_eq!(dispatcher.len(), 4);
    }
}
