//! End-to-end tests for the hero section
//!
//! These tests verify that:
//! - The stock configuration plays the entrance to its final state
//! - Scroll drift follows the trigger region, with and without lag
//! - Unmount freezes every target and leaves no listeners behind
//! - JSON scenarios and TOML overrides drive the same paths

use parallax_animation::{Property, ScrubberState, SequencerState};
use parallax_core::Size;
use parallax_hero::{HeroConfig, HeroError, HeroScenario, HeroStage, PageLayout};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn viewport() -> Size {
    Size::new(1280.0, 800.0)
}

fn stage_with(config: HeroConfig) -> HeroStage {
    init_tracing();
    HeroStage::new(config, PageLayout::full_viewport(viewport())).unwrap()
}

fn immediate_config() -> HeroConfig {
    let mut config = HeroConfig::default();
    config.motion.trigger.scrub_lag_ms = 0.0;
    config
}

#[test]
fn test_entrance_reaches_final_state() {
    let mut stage = stage_with(HeroConfig::default());
    stage.mount().unwrap();

    // Letters finish at 17 * 35 + 800 = 1395 ms, stats at 1145 + 2 * 120 + 600 = 1985 ms
    stage.wait(1000.0);
    let section = stage.section();
    assert_eq!(section.entrance_state(), Some(SequencerState::Running));
    assert_eq!(section.letters()[0].get(Property::Opacity), 1.0);
    assert!(section.letters()[17].get(Property::Opacity) < 1.0);

    stage.wait(1000.0);
    let section = stage.section();
    assert_eq!(section.entrance_state(), Some(SequencerState::Completed));
    for target in section.letters().iter().chain(section.stat_cards()) {
        assert_eq!(target.get(Property::Opacity), 1.0);
        assert_eq!(target.get(Property::Y), 0.0);
        assert_eq!(target.get(Property::Blur), 0.0);
    }
}

#[test]
fn test_stats_overlap_letters() {
    let mut stage = stage_with(HeroConfig::default());
    stage.mount().unwrap();

    // Stats start 250 ms before the letters finish
    stage.wait(1140.0);
    assert_eq!(stage.property("stat-0", Property::Opacity).unwrap(), 0.0);
    stage.wait(100.0);
    assert!(stage.property("stat-0", Property::Opacity).unwrap() > 0.0);
    assert!(stage.property("letter-17", Property::Opacity).unwrap() < 1.0);
}

#[test]
fn test_scroll_drift_without_lag() {
    let mut stage = stage_with(immediate_config());
    stage.mount().unwrap();

    // Region is [0, 800] for a hero filling the viewport
    stage.scroll_to(400.0);
    assert_eq!(stage.property("visual", Property::X).unwrap(), 120.0);
    assert_eq!(stage.property("visual", Property::Rotate).unwrap(), 6.0);
    assert_eq!(stage.property("background", Property::Y).unwrap(), 40.0);
    assert!((stage.property("glow", Property::Scale).unwrap() - 1.075).abs() < 1e-5);

    stage.scroll_to(2000.0);
    assert_eq!(stage.property("visual", Property::Y).unwrap(), 90.0);
    assert!((stage.property("glow", Property::Opacity).unwrap() - 0.9).abs() < 1e-6);

    // Scrolling back up reverses the drift
    stage.scroll_to(0.0);
    assert_eq!(stage.property("visual", Property::X).unwrap(), 0.0);
    assert_eq!(stage.property("glow", Property::Opacity).unwrap(), 1.0);
}

#[test]
fn test_scroll_lag_converges() {
    let mut stage = stage_with(HeroConfig::default());
    stage.mount().unwrap();

    stage.scroll_to(800.0);
    let first = stage.property("visual", Property::X).unwrap();
    assert!(first > 0.0 && first < 10.0);
    assert_eq!(stage.section().scroll_state(), Some(ScrubberState::Updating));

    // Catch-up time is one second; ten seconds settles well inside 1e-4
    stage.wait(10_000.0);
    assert_eq!(stage.property("visual", Property::X).unwrap(), 240.0);
    assert_eq!(stage.section().scroll_state(), Some(ScrubberState::Idle));
}

#[test]
fn test_resize_re_resolves_region() {
    let mut stage = stage_with(immediate_config());
    stage.mount().unwrap();
    stage.scroll_to(400.0);
    assert_eq!(stage.property("background", Property::Y).unwrap(), 40.0);

    // Hero grows to 1600px: 400px is now a quarter of the way through
    stage.resize(viewport(), Some(1600.0));
    assert_eq!(stage.property("background", Property::Y).unwrap(), 20.0);
}

#[test]
fn test_unmount_freezes_targets() {
    let mut stage = stage_with(immediate_config());
    stage.mount().unwrap();
    stage.wait(300.0);
    stage.scroll_to(200.0);

    let before = stage.section().snapshot();
    stage.unmount();
    stage.unmount();
    assert!(stage.dispatcher().is_empty());

    stage.wait(3000.0);
    stage.scroll_to(800.0);
    stage.resize(Size::new(640.0, 480.0), Some(480.0));
    assert_eq!(stage.section().snapshot(), before);
}

#[test]
fn test_json_scenario() {
    let mut stage = stage_with(immediate_config());
    let scenario = HeroScenario::from_json(
        r#"{ "steps": [
            { "type": "mount" },
            { "type": "assert_property", "target": "headline", "property": "opacity", "value": 1 },
            { "type": "assert_property", "target": "letter-0", "property": "y", "value": 18 },
            { "type": "wait", "ms": 2500 },
            { "type": "assert_property", "target": "stat-2", "property": "opacity", "value": 1 },
            { "type": "scroll", "offset": 200 },
            { "type": "assert_property", "target": "visual", "property": "x", "value": 60 },
            { "type": "unmount" },
            { "type": "scroll", "offset": 800 },
            { "type": "assert_property", "target": "visual", "property": "x", "value": 60 }
        ] }"#,
    )
    .unwrap();

    let report = stage.run(&scenario).unwrap();
    assert_eq!(report.steps, 10);
    assert_eq!(report.frames, 150);
}

#[test]
fn test_toml_override() {
    let config = HeroConfig::from_toml_str(
        r#"
        [content]
        headline = "Go"

        [[content.stats]]
        value = "1"
        label = "One"

        [motion]
        letter_gap = true

        [motion.visual]
        to = { x = 100.0 }

        [motion.trigger]
        scrub_lag_ms = 0.0
        "#,
    )
    .unwrap();

    let mut stage = stage_with(config);
    assert_eq!(stage.section().glyphs().len(), 3);
    assert_eq!(stage.section().stat_cards().len(), 1);

    stage.mount().unwrap();
    stage.scroll_to(400.0);
    assert_eq!(stage.property("visual", Property::X).unwrap(), 50.0);
    assert_eq!(stage.property("visual", Property::Rotate).unwrap(), 0.0);
}

#[test]
fn test_empty_headline_is_rejected() {
    let err = HeroConfig::from_toml_str(
        r#"
        [content]
        headline = ""
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, HeroError::EmptyContent("headline")));
}
