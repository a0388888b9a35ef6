//! Hero configuration file handling
//!
//! A hero section is described by its static content and its motion parameters.
//! Everything has a default, so an empty file yields the stock hero:
//!
//! ```toml
//! [content]
//! headline = "WELCOME ITZ FIZZ"
//!
//! [[content.stats]]
//! value = "98%"
//! label = "Retention Boost"
//!
//! [motion]
//! easing = "power3.out"
//!
//! [motion.trigger]
//! start = "top top"
//! end = "bottom top"
//! scrub_lag_ms = 1000.0
//! ```

use crate::error::{HeroError, Result};
use parallax_animation::{Easing, Keyframe, Position, ScrollBinding, StaggerGroup, TriggerRegion};
use parallax_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level hero configuration (hero.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HeroConfig {
    #[serde(default)]
    pub content: HeroContent,
    #[serde(default)]
    pub motion: MotionConfig,
}

/// Static content supplied by the host page
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeroContent {
    #[serde(default = "default_headline")]
    pub headline: String,
    /// Reference to the visual asset, passed through to the renderer
    #[serde(default = "default_visual_asset")]
    pub visual_asset: String,
    #[serde(default = "default_stats")]
    pub stats: Vec<StatEntry>,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            headline: default_headline(),
            stats: default_stats(),
            visual_asset: default_visual_asset(),
        }
    }
}

/// One stat card
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatEntry {
    pub value: String,
    pub label: String,
}

impl StatEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

fn default_headline() -> String {
    "WELCOME ITZ FIZZ".to_string()
}

fn default_stats() -> Vec<StatEntry> {
    vec![
        StatEntry::new("98%", "Retention Boost"),
        StatEntry::new("2.4x", "Faster Delivery"),
        StatEntry::new("45%", "Cost Reduction"),
    ]
}

fn default_visual_asset() -> String {
    "assets/car.png".to_string()
}

/// Property values for one keyframe; unset properties are not animated
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct PropsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
}

impl PropsConfig {
    pub fn to_keyframe(&self) -> Keyframe {
        let mut keyframe = Keyframe::new();
        if let Some(x) = self.x {
            keyframe = keyframe.with_x(x);
        }
        if let Some(y) = self.y {
            keyframe = keyframe.with_y(y);
        }
        if let Some(rotate) = self.rotate {
            keyframe = keyframe.with_rotate(rotate);
        }
        if let Some(scale) = self.scale {
            keyframe = keyframe.with_scale(scale);
        }
        if let Some(opacity) = self.opacity {
            keyframe = keyframe.with_opacity(opacity);
        }
        if let Some(blur) = self.blur {
            keyframe = keyframe.with_blur(blur);
        }
        keyframe
    }
}

/// A staggered cohort in the entrance sequence
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CohortMotion {
    /// Delay between consecutive items
    pub stagger_ms: f32,
    /// Duration of each item's reveal
    pub duration_ms: f32,
    /// Timeline position, e.g. `"-=250"`; empty appends
    #[serde(default)]
    pub position: String,
    /// Overrides the motion-wide easing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    pub from: PropsConfig,
    pub to: PropsConfig,
}

impl CohortMotion {
    pub fn position(&self) -> Result<Position> {
        Ok(self.position.parse()?)
    }

    pub fn easing(&self, default: Easing) -> Result<Easing> {
        match &self.easing {
            Some(name) => Ok(name.parse()?),
            None => Ok(default),
        }
    }
}

fn default_letters() -> CohortMotion {
    CohortMotion {
        from: PropsConfig {
            y: Some(18.0),
            opacity: Some(0.0),
            blur: Some(6.0),
            ..Default::default()
        },
        to: PropsConfig {
            y: Some(0.0),
            opacity: Some(1.0),
            blur: Some(0.0),
            ..Default::default()
        },
        stagger_ms: 35.0,
        duration_ms: 800.0,
        position: String::new(),
        easing: None,
    }
}

fn default_stats_motion() -> CohortMotion {
    CohortMotion {
        from: PropsConfig {
            y: Some(14.0),
            opacity: Some(0.0),
            blur: Some(4.0),
            ..Default::default()
        },
        to: PropsConfig {
            y: Some(0.0),
            opacity: Some(1.0),
            blur: Some(0.0),
            ..Default::default()
        },
        stagger_ms: 120.0,
        duration_ms: 600.0,
        position: "-=250".to_string(),
        easing: None,
    }
}

/// A scroll-scrubbed drift from the element's rest state
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrollMotion {
    #[serde(default = "default_scroll_easing")]
    pub easing: String,
    pub to: PropsConfig,
}

impl ScrollMotion {
    fn new(to: PropsConfig) -> Self {
        Self {
            to,
            easing: default_scroll_easing(),
        }
    }

    pub fn easing(&self) -> Result<Easing> {
        Ok(self.easing.parse()?)
    }
}

fn default_scroll_easing() -> String {
    "none".to_string()
}

fn default_visual() -> ScrollMotion {
    ScrollMotion::new(PropsConfig {
        x: Some(240.0),
        y: Some(90.0),
        rotate: Some(12.0),
        scale: Some(0.92),
        ..Default::default()
    })
}

fn default_glow() -> ScrollMotion {
    ScrollMotion::new(PropsConfig {
        x: Some(-160.0),
        y: Some(60.0),
        scale: Some(1.15),
        opacity: Some(0.9),
        ..Default::default()
    })
}

fn default_background() -> ScrollMotion {
    ScrollMotion::new(PropsConfig {
        y: Some(80.0),
        ..Default::default()
    })
}

/// Scroll trigger region and lag
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TriggerConfig {
    #[serde(default = "default_trigger_start")]
    pub start: String,
    #[serde(default = "default_trigger_end")]
    pub end: String,
    /// Catch-up time of the scrubbed progress; 0 follows the scroll exactly
    #[serde(default = "default_scrub_lag_ms")]
    pub scrub_lag_ms: f32,
    /// Expected frame interval used to turn the lag into a per-frame factor
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            start: default_trigger_start(),
            end: default_trigger_end(),
            scrub_lag_ms: default_scrub_lag_ms(),
            frame_ms: default_frame_ms(),
        }
    }
}

impl TriggerConfig {
    pub fn region(&self) -> Result<TriggerRegion> {
        Ok(TriggerRegion::parse(&self.start, &self.end)?)
    }

    pub fn binding(&self) -> Result<ScrollBinding> {
        Ok(ScrollBinding::with_scrub_lag(
            self.region()?,
            self.scrub_lag_ms,
            self.frame_ms,
        )?)
    }
}

fn default_trigger_start() -> String {
    "top top".to_string()
}

fn default_trigger_end() -> String {
    "bottom top".to_string()
}

fn default_scrub_lag_ms() -> f32 {
    1000.0
}

fn default_frame_ms() -> f32 {
    1000.0 / 60.0
}

/// Motion parameters for the entrance and the scroll drift
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Easing for entrance cohorts without their own
    #[serde(default = "default_easing")]
    pub easing: String,
    /// Space out every headline glyph instead of only widening word gaps
    #[serde(default)]
    pub letter_gap: bool,
    #[serde(default = "default_letters")]
    pub letters: CohortMotion,
    #[serde(default = "default_stats_motion")]
    pub stats: CohortMotion,
    #[serde(default = "default_visual")]
    pub visual: ScrollMotion,
    #[serde(default = "default_glow")]
    pub glow: ScrollMotion,
    #[serde(default = "default_background")]
    pub background: ScrollMotion,
    #[serde(default)]
    pub trigger: TriggerConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            easing: default_easing(),
            letter_gap: false,
            letters: default_letters(),
            stats: default_stats_motion(),
            visual: default_visual(),
            glow: default_glow(),
            background: default_background(),
            trigger: TriggerConfig::default(),
        }
    }
}

impl MotionConfig {
    pub fn easing(&self) -> Result<Easing> {
        Ok(self.easing.parse()?)
    }
}

fn default_easing() -> String {
    "power3.out".to_string()
}

impl HeroConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: HeroConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or from `hero.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("hero.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| HeroError::Io {
            path: config_path.clone(),
            source,
        })?;

        tracing::debug!(path = %config_path.display(), "loading hero config");
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check content and every motion parameter.
    ///
    /// Keyframe mismatches, unknown easings, bad positions and trigger edges are all
    /// reported here so that nothing fails once the section is running.
    pub fn validate(&self) -> Result<()> {
        let content = &self.content;
        if content.headline.trim().is_empty() {
            return Err(HeroError::EmptyContent("headline"));
        }
        if content.stats.is_empty() {
            return Err(HeroError::EmptyContent("stats"));
        }
        if content
            .stats
            .iter()
            .any(|stat| stat.value.trim().is_empty() || stat.label.trim().is_empty())
        {
            return Err(HeroError::EmptyContent("stat entry"));
        }

        let motion = &self.motion;
        let easing = motion.easing()?;
        for cohort in [&motion.letters, &motion.stats] {
            cohort.easing(easing)?;
            cohort.position()?;
            StaggerGroup::new(Vec::new(), cohort.from.to_keyframe(), cohort.to.to_keyframe())?
                .each_ms(cohort.stagger_ms)?
                .duration_ms(cohort.duration_ms)?;
        }
        for (name, drift) in [
            ("visual", &motion.visual),
            ("glow", &motion.glow),
            ("background", &motion.background),
        ] {
            drift.easing()?;
            if drift.to.to_keyframe().is_empty() {
                return Err(ConfigError::EmptyKeyframe(name.to_string()).into());
            }
        }
        motion.trigger.binding()?;
        Ok(())
    }
}
