//! Headless hero scenarios
//!
//! A [`HeroStage`] stands in for the host page: it owns the event dispatcher, the
//! page layout and the section, and turns scenario steps into mount, frame, scroll
//! and resize events. Scenarios are JSON:
//!
//! ```json
//! { "steps": [
//!     { "type": "mount" },
//!     { "type": "wait", "ms": 2500 },
//!     { "type": "scroll", "offset": 400 },
//!     { "type": "tick", "frames": 600 },
//!     { "type": "assert_property", "target": "visual", "property": "x", "value": 120 }
//! ] }
//! ```

use crate::config::HeroConfig;
use crate::error::{HeroError, Result};
use crate::layout::PageLayout;
use crate::section::HeroSection;
use parallax_animation::{Property, TriggerLayout};
use parallax_core::{Event, EventDispatcher, Rect, Size};
use serde::Deserialize;
use std::path::Path;
use std::rc::Rc;

/// Sequence of headless steps
#[derive(Debug, Clone, Deserialize)]
pub struct HeroScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeroScenario {
    /// Load a scenario from JSON text
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| HeroError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

/// One scenario step
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Mount,
    Unmount,
    /// Dispatch `frames` frame events of `dt_ms` each
    Tick {
        frames: u32,
        #[serde(default)]
        dt_ms: Option<f32>,
    },
    /// Let `ms` pass in frame-sized steps
    Wait { ms: f32 },
    Scroll { offset: f32 },
    /// Resize the viewport, optionally resizing the section with it
    Resize {
        width: f32,
        height: f32,
        #[serde(default)]
        section_height: Option<f32>,
    },
    AssertProperty {
        target: String,
        property: String,
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
}

fn default_tolerance() -> f32 {
    1e-3
}

/// Summary of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScenarioReport {
    pub steps: usize,
    pub frames: u64,
    pub elapsed_ms: f32,
}

/// Headless host for one hero section
pub struct HeroStage {
    dispatcher: EventDispatcher,
    layout: Rc<PageLayout>,
    section: HeroSection,
    frame_ms: f32,
    frames: u64,
    elapsed_ms: f32,
}

impl HeroStage {
    pub fn new(config: HeroConfig, layout: PageLayout) -> Result<Self> {
        let frame_ms = config.motion.trigger.frame_ms;
        Ok(Self {
            dispatcher: EventDispatcher::new(),
            layout: Rc::new(layout),
            section: HeroSection::new(config)?,
            frame_ms,
            frames: 0,
            elapsed_ms: 0.0,
        })
    }

    pub fn mount(&mut self) -> Result<()> {
        let layout: Rc<dyn TriggerLayout> = self.layout.clone();
        self.section.mount(&mut self.dispatcher, layout)
    }

    pub fn unmount(&mut self) {
        self.section.unmount(&mut self.dispatcher);
    }

    /// Dispatch one frame event
    pub fn tick(&mut self, dt_ms: f32) {
        self.dispatcher.dispatch(&Event::frame(dt_ms));
        self.frames += 1;
        self.elapsed_ms += dt_ms;
    }

    /// Run evenly spaced frames, about one frame interval apart, until `ms` have passed
    pub fn wait(&mut self, ms: f32) {
        if ms.is_nan() || ms <= 0.0 {
            return;
        }
        // Within a thousandth of a whole frame count is that many frames
        let frames = (ms / self.frame_ms - 1e-3).ceil().max(1.0) as u32;
        let dt_ms = ms / frames as f32;
        for _ in 0..frames {
            self.tick(dt_ms);
        }
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.layout.set_scroll_offset(offset);
        self.dispatcher.dispatch(&Event::scroll(offset));
    }

    pub fn resize(&mut self, viewport: Size, section_height: Option<f32>) {
        self.layout.set_viewport(viewport);
        if let Some(height) = section_height {
            let section = self.layout.section();
            self.layout.set_section(Rect::new(
                section.x(),
                section.y(),
                viewport.width,
                height,
            ));
        }
        self.dispatcher
            .dispatch(&Event::resize(viewport.width, viewport.height));
    }

    /// Current value of one property of a labelled target
    pub fn property(&self, target: &str, property: Property) -> Result<f32> {
        self.section
            .target(target)
            .map(|t| t.get(property))
            .ok_or_else(|| HeroError::UnknownTarget(target.to_string()))
    }

    pub fn section(&self) -> &HeroSection {
        &self.section
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Execute every step, stopping at the first failed assertion
    pub fn run(&mut self, scenario: &HeroScenario) -> Result<ScenarioReport> {
        for (step_index, step) in scenario.steps.iter().enumerate() {
            tracing::trace!(step_index, ?step, "scenario step");
            match step {
                ScenarioStep::Mount => self.mount()?,
                ScenarioStep::Unmount => self.unmount(),
                ScenarioStep::Tick { frames, dt_ms } => {
                    let dt_ms = dt_ms.unwrap_or(self.frame_ms);
                    for _ in 0..*frames {
                        self.tick(dt_ms);
                    }
                }
                ScenarioStep::Wait { ms } => self.wait(*ms),
                ScenarioStep::Scroll { offset } => self.scroll_to(*offset),
                ScenarioStep::Resize {
                    width,
                    height,
                    section_height,
                } => self.resize(Size::new(*width, *height), *section_height),
                ScenarioStep::AssertProperty {
                    target,
                    property,
                    value,
                    tolerance,
                } => {
                    let actual = self.property(target, property.parse()?)?;
                    if (actual - value).abs() > *tolerance {
                        return Err(HeroError::AssertionFailed {
                            step: step_index,
                            message: format!(
                                "{target}.{property} is {actual}, expected {value} ± {tolerance}"
                            ),
                        });
                    }
                }
            }
        }

        Ok(ScenarioReport {
            steps: scenario.steps.len(),
            frames: self.frames,
            elapsed_ms: self.elapsed_ms,
        })
    }
}
