// Host-side tests for the ring/caption animator.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod segments {
    include!("../src/core/segments.rs");
}
mod visual {
    include!("../src/core/visual.rs");
}

use constants::*;
use segments::{Segment, SegmentKind, SegmentTable};
use visual::{hsl_to_rgb, SceneState};

const DT_60HZ: f32 = 1.0 / 60.0;

fn interior_segment(group_start: usize) -> Segment {
    Segment {
        lo: 0.0,
        hi: f32::INFINITY,
        kind: SegmentKind::Interior,
        group_start: Some(group_start),
        fade_in: (1, 2),
        fade_out: (0, 1),
        relax_left: group_start.checked_sub(GROUP_SIZE),
        relax_right: Some(group_start + GROUP_SIZE),
    }
}

fn settle(scene: &mut SceneState, seg: &Segment, frames: usize) {
    for _ in 0..frames {
        scene.update(seg, DT_60HZ);
    }
}

#[test]
fn active_window_converges_to_the_arch() {
    let mut scene = SceneState::new();
    let seg = interior_segment(40);
    settle(&mut scene, &seg, 400);

    let span = (GROUP_SIZE - 1) as f32;
    for i in 0..GROUP_SIZE {
        let expected = (i as f32 / span * std::f32::consts::PI).sin() * 2.0 * ARCH_AMPLITUDE;
        let got = scene.rings[40 + i].y;
        assert!((got - expected).abs() < 1e-3, "ring {i}: {got} vs {expected}");
    }
    // Zero at the window edges, peak near the center.
    assert!(scene.rings[40].y.abs() < 1e-3);
    assert!(scene.rings[40 + GROUP_SIZE - 1].y.abs() < 1e-3);
    assert!(scene.rings[49].y > 1.5);
}

#[test]
fn interior_window_colors_in_the_cool_regime() {
    let mut scene = SceneState::new();
    let seg = interior_segment(0);
    settle(&mut scene, &seg, 400);

    let center = scene.rings[9].color;
    assert!(center.z > center.x, "cool regime is blue-leaning: {center:?}");
    // Window edge has zero saturation: a neutral gray at lightness 0.49.
    let edge = scene.rings[0].color;
    assert!((edge.x - edge.z).abs() < 1e-2, "edge should be neutral: {edge:?}");
}

#[test]
fn intro_window_colors_in_the_warm_regime() {
    let mut scene = SceneState::new();
    let table = SegmentTable::builtin();
    let intro = *table.resolve(0.0);
    assert_eq!(intro.kind, SegmentKind::Intro);
    settle(&mut scene, &intro, 400);

    let center = scene.rings[9].color;
    assert!(center.x > center.z, "warm regime is red-leaning: {center:?}");
}

#[test]
fn terminal_window_colors_without_lifting() {
    let mut scene = SceneState::new();
    let table = SegmentTable::builtin();
    let terminal = *table.resolve(60.0);
    assert_eq!(terminal.kind, SegmentKind::Terminal);
    settle(&mut scene, &terminal, 400);

    let start = terminal.group_start.unwrap();
    let center = &scene.rings[start + 9];
    assert!(center.color.x > center.color.z);
    assert_eq!(center.y, 0.0, "terminal window must not lift");
}

#[test]
fn end_of_strip_window_truncates_to_existing_rings() {
    // The terminal window starts at ring 200 of 210, so only half of it
    // exists; the animator must color what is there and stop at the edge.
    let mut scene = SceneState::new();
    let table = SegmentTable::builtin();
    let terminal = *table.resolve(60.0);
    assert_eq!(terminal.group_start, Some(200));
    settle(&mut scene, &terminal, 400);

    assert_eq!(scene.rings.len(), RING_COUNT);
    let last = &scene.rings[RING_COUNT - 1];
    assert!(last.color.x > last.color.z, "last ring must still color warm");
}

#[test]
fn caption_fade_in_attaches_before_the_rise() {
    let mut scene = SceneState::new();
    let table = SegmentTable::builtin();
    let intro = *table.resolve(0.0);

    scene.update(&intro, DT_60HZ);
    for i in 20..23 {
        assert!(scene.captions[i].attached, "caption {i} must attach on frame one");
        assert!(scene.captions[i].opacity > 0.0);
    }
    settle(&mut scene, &intro, 400);
    for i in 20..23 {
        assert!(scene.captions[i].opacity > 0.9);
        assert!(scene.captions[i].opacity <= 1.0);
    }
}

#[test]
fn caption_fade_out_decays_snaps_and_detaches() {
    let mut scene = SceneState::new();
    scene.captions[17].attached = true;
    scene.captions[17].opacity = 1.0;

    // Terminal segment fades out captions [17, 19).
    let table = SegmentTable::builtin();
    let terminal = *table.resolve(60.0);
    assert_eq!(terminal.fade_out, (17, 19));

    let mut frames = 0;
    while scene.captions[17].attached {
        scene.update(&terminal, DT_60HZ);
        frames += 1;
        assert!(frames <= 130, "geometric decay must reach the floor");
        let op = scene.captions[17].opacity;
        assert!((0.0..=1.0).contains(&op));
    }
    // 0.95^n <= 0.01 needs n >= 90 at the reference rate.
    assert!(frames >= 80, "decay finished implausibly fast ({frames} frames)");
    assert_eq!(scene.captions[17].opacity, 0.0, "must snap to exactly zero");
}

#[test]
fn relaxed_window_decays_toward_negated_target() {
    let mut scene = SceneState::new();
    settle(&mut scene, &interior_segment(0), 400);
    let lifted = scene.rings[9].y;
    assert!(lifted > 1.5);

    // The next segment's left relax window covers rings [0, 20); their last
    // targets persist, so they settle toward the negation, not zero.
    settle(&mut scene, &interior_segment(20), 1_000);
    let relaxed = scene.rings[9].y;
    assert!(
        (relaxed + scene.rings[9].target_y).abs() < 1e-2,
        "expected -target, got {relaxed} (target {})",
        scene.rings[9].target_y
    );
    assert!(relaxed < -1.5);
}

#[test]
fn sway_stays_within_its_amplitude() {
    let mut scene = SceneState::new();
    let seg = interior_segment(0);
    for _ in 0..600 {
        scene.update(&seg, DT_60HZ);
        assert!(scene.sway_x.abs() <= SWAY_AMOUNT + 1e-6);
    }
}

#[test]
fn hsl_conversion_matches_reference_values() {
    let red = hsl_to_rgb(0.0, 1.0, 0.5);
    assert!((red.x - 1.0).abs() < 1e-5 && red.y.abs() < 1e-5 && red.z.abs() < 1e-5);

    let azure = hsl_to_rgb(204.0 / 360.0, 1.0, 0.5);
    assert!(azure.x.abs() < 1e-5);
    assert!((azure.y - 0.6).abs() < 1e-5);
    assert!((azure.z - 1.0).abs() < 1e-5);

    let gray = hsl_to_rgb(0.3, 0.0, 0.49);
    assert!((gray.x - 0.49).abs() < 1e-6);
    assert_eq!(gray.x, gray.y);
    assert_eq!(gray.y, gray.z);
}

#[test]
fn scenario_intro_at_rest() {
    // Raw accumulator zero resolves to the intro segment, raises the intro
    // captions and colors the first window warm.
    let table = SegmentTable::builtin();
    let seg = *table.resolve(0.0);
    assert_eq!(seg.kind, SegmentKind::Intro);
    assert_eq!(seg.fade_in, (20, 23));

    let mut scene = SceneState::new();
    settle(&mut scene, &seg, 200);
    assert!(scene.captions[20].opacity > 0.8);
    let center = scene.rings[9].color;
    assert!(center.x > center.z);
}
