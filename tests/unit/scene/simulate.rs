use super::*;
use crate::{
    animation::ease::Ease,
    animation::keyframes::Keyframes,
    effect::presets::Preset,
    foundation::core::{Axis, Fps, Point, Size},
    scene::model::{EffectSource, SceneEffect, SceneRegion},
};

fn scene(effects: Vec<(&str, Preset)>) -> SceneSpec {
    SceneSpec {
        fps: Fps::new(60, 1).unwrap(),
        duration: 41,
        viewport: Size::new(1200.0, 800.0),
        document: Size::new(1200.0, 4800.0),
        regions: ["gallery", "chapter"]
            .into_iter()
            .map(|id| SceneRegion {
                id: id.to_string(),
                axis: Axis::Y,
                start: 1000.0,
                end: 3000.0,
            })
            .collect(),
        scroll: Keyframes::ramp(0.0, 4000.0, 40, Ease::Linear),
        pointer: None,
        effects: effects
            .into_iter()
            .map(|(node, preset)| SceneEffect {
                node: node.to_string(),
                effect: EffectSource::Preset {
                    preset,
                    region: None,
                },
            })
            .collect(),
    }
}

#[test]
fn gallery_track_follows_scroll() {
    let report = run_scene(&scene(vec![("track", Preset::HorizontalGallery)])).unwrap();
    assert_eq!(report.frames.len(), 41);

    let at = |frame| report.style(frame, "track").unwrap().translate_x.amount();
    assert_eq!(at(0), "0%");
    assert_eq!(at(10), "0%");
    assert_eq!(at(20), "-37.5%");
    assert_eq!(at(30), "-75%");
    assert_eq!(at(40), "-75%");
}

#[test]
fn chapter_peaks_mid_region() {
    let report = run_scene(&scene(vec![("chapter", Preset::ChapterTransition)])).unwrap();
    let mid = report.style(20, "chapter").unwrap();
    assert!((mid.opacity - 1.0).abs() < 1e-12);
    assert!((mid.scale - 1.0).abs() < 1e-12);

    let start = report.style(10, "chapter").unwrap();
    assert_eq!(start.opacity, 0.0);
    assert!((start.scale - 0.9).abs() < 1e-12);
}

#[test]
fn velocity_skew_settles_when_scrolling_stops() {
    let mut spec = scene(vec![("text", Preset::VelocitySkew)]);
    spec.scroll = Keyframes::ramp(0.0, 1000.0, 20, Ease::Linear);
    spec.duration = 300;
    let report = run_scene(&spec).unwrap();

    let moving = report.style(15, "text").unwrap().skew_y_deg;
    assert!(moving > 0.0, "scrolling down skews positively: {moving}");
    let settled = report.last().unwrap().nodes[0].style.skew_y_deg;
    assert!(settled.abs() < 1e-3, "{settled}");
}

#[test]
fn pointer_script_drives_orbs() {
    let mut spec = scene(vec![("orb", Preset::FloatingOrbs)]);
    spec.pointer = Some(Keyframes::constant(Point::new(600.0, 800.0)));
    spec.duration = 3;
    let report = run_scene(&spec).unwrap();
    for frame in 0..3 {
        let orb = report.style(frame, "orb").unwrap();
        assert_eq!(orb.translate_y.amount(), "40px");
    }
}

#[test]
fn css_report_has_one_line_per_node_per_tick() {
    let mut spec = scene(vec![
        ("track", Preset::HorizontalGallery),
        ("chapter", Preset::ChapterTransition),
    ]);
    spec.duration = 4;
    let css = run_scene(&spec).unwrap().to_css();
    assert_eq!(css.lines().count(), 8);
    assert!(css.lines().next().unwrap().contains("track { transform: translateX(0%)"));
}

#[test]
fn invalid_scene_is_rejected_before_running() {
    let mut spec = scene(vec![("track", Preset::HorizontalGallery)]);
    spec.duration = 0;
    assert!(run_scene(&spec).is_err());
}

#[test]
fn oversized_scene_fails_without_running() {
    let mut spec = scene(vec![("track", Preset::HorizontalGallery)]);
    spec.duration = u64::MAX;
    let err = run_scene(&spec).unwrap_err().to_string();
    assert!(err.contains("duration"), "{err}");
}
