//! Parallax Hero Section
//!
//! Composes the animation engine into a landing-page hero: a headline whose glyphs
//! rise in one after another, stat cards that follow with a slight overlap, and a
//! visual, glow and background that drift as the page scrolls.
//!
//! # Example
//!
//! ```rust
//! use parallax_core::{Event, EventDispatcher, Size};
//! use parallax_hero::{HeroConfig, HeroSection, PageLayout};
//! use std::rc::Rc;
//!
//! let mut dispatcher = EventDispatcher::new();
//! let layout = Rc::new(PageLayout::full_viewport(Size::new(1280.0, 800.0)));
//!
//! let mut hero = HeroSection::new(HeroConfig::default())?;
//! hero.mount(&mut dispatcher, layout.clone())?;
//!
//! // The host forwards frames and scroll offsets
//! dispatcher.dispatch(&Event::frame(16.0));
//! layout.set_scroll_offset(200.0);
//! dispatcher.dispatch(&Event::scroll(200.0));
//!
//! hero.unmount(&mut dispatcher);
//! assert!(dispatcher.is_empty());
//! # Ok::<(), parallax_hero::HeroError>(())
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod scenario;
pub mod section;

pub use config::{
    CohortMotion, HeroConfig, HeroContent, MotionConfig, PropsConfig, ScrollMotion, StatEntry,
    TriggerConfig,
};
pub use error::{HeroError, Result};
pub use layout::PageLayout;
pub use scenario::{HeroScenario, HeroStage, ScenarioReport, ScenarioStep};
pub use section::HeroSection;
