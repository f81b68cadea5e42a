// Host-side tests for the scroll-position -> effect-parameter mapping.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod automation {
    include!("../src/core/automation.rs");
}

use automation::*;

fn domain_samples() -> impl Iterator<Item = f32> {
    (0..=1200).map(|i| i as f32 * 0.05)
}

#[test]
fn pan_stays_in_range_and_repeats_every_period() {
    for x in domain_samples() {
        let pan = triangle_pan(x);
        assert!((-1.0..=1.0).contains(&pan), "pan out of range at x={x}");
        if x + PAN_PERIOD <= FX_DOMAIN_MAX {
            let next = triangle_pan(x + PAN_PERIOD);
            assert!((pan - next).abs() < 1e-4, "pan not periodic at x={x}");
        }
    }
}

#[test]
fn pan_gains_snap_exactly_at_triangle_extremes() {
    for x in [0.0, 30.0, 60.0] {
        let p = pan_frame(x);
        assert!(p.snapped);
        assert_eq!((p.left, p.right), (1.0, 0.0), "hard left at x={x}");
    }
    for x in [15.0, 45.0] {
        let p = pan_frame(x);
        assert!(p.snapped);
        assert_eq!((p.left, p.right), (0.0, 1.0), "hard right at x={x}");
    }
}

#[test]
fn pan_gains_stay_within_device_safe_bounds() {
    for x in domain_samples() {
        let p = pan_frame(x);
        assert!((0.0..=1.0).contains(&p.left));
        assert!((0.0..=1.0).contains(&p.right));
        // Linear (not equal-power) law: the louder channel is always full.
        assert!(p.left.max(p.right) > 1.0 - 1e-6);
    }
}

#[test]
fn at_most_two_reverb_weights_are_nonzero() {
    for x in domain_samples() {
        let r = reverb_frame(x);
        let nonzero = [r.small, r.large, r.medium]
            .iter()
            .filter(|w| **w > 0.0)
            .count();
        assert!(nonzero <= 2, "three live reverb voices at x={x}");
        assert!(r.small >= 0.0 && r.large >= 0.0 && r.medium >= 0.0);
    }
}

#[test]
fn large_reverb_weight_peaks_at_forty_five() {
    let peak = reverb_frame(45.0).large;
    for x in domain_samples() {
        assert!(reverb_frame(x).large <= peak + 1e-6, "wLarge exceeds peak at x={x}");
    }
    assert!(peak > 0.69, "peak weight should reach its authored maximum");
}

#[test]
fn reverb_weights_vary_continuously() {
    let step = 0.05;
    let mut prev = reverb_frame(0.0);
    let mut x = step;
    while x <= FX_DOMAIN_MAX {
        let cur = reverb_frame(x);
        assert!((cur.small - prev.small).abs() < 0.01, "small jumps at x={x}");
        assert!((cur.large - prev.large).abs() < 0.01, "large jumps at x={x}");
        assert!((cur.medium - prev.medium).abs() < 0.01, "medium jumps at x={x}");
        prev = cur;
        x += step;
    }
}

#[test]
fn delay_envelope_peaks_at_its_center() {
    let peak = delay_frame(27.5);
    assert!((peak.wet - 0.6).abs() < 1e-6);
    for x in domain_samples() {
        let d = delay_frame(x);
        assert!(d.wet <= peak.wet + 1e-6);
        assert!((0.05..=0.7).contains(&d.time_sec));
        assert!((0.2..=0.4).contains(&d.feedback));
        assert!(d.tone_hz >= peak.tone_hz - 1e-3, "tone darkest at the peak");
    }
}

#[test]
fn compression_dips_between_its_two_bumps() {
    let c30 = compressor_frame(30.0);
    let c45 = compressor_frame(45.0);
    let c60 = compressor_frame(60.0);
    assert!(c45.strength < c30.strength);
    assert!(c45.strength < c60.strength);
    // Full strength at the bump centers maps to the hard end of the range.
    assert!((c30.threshold_db - -34.0).abs() < 1e-4);
    assert!((c30.ratio - 7.0).abs() < 1e-4);
}

#[test]
fn compression_mapping_tracks_strength() {
    for x in domain_samples() {
        let c = compressor_frame(x);
        assert!((0.0..=1.0).contains(&c.strength));
        assert!(c.threshold_db <= -16.0 && c.threshold_db >= -34.0);
        assert!((2.0..=7.0).contains(&c.ratio));
        assert!((0.25..=0.85).contains(&c.wet));
        assert!((1.0..=1.6).contains(&c.makeup));
        assert!(c.attack_sec > 0.0 && c.release_sec > c.attack_sec);
    }
}

#[test]
fn frames_clamp_out_of_domain_coordinates() {
    assert_eq!(fx_frame(-12.0), fx_frame(0.0));
    assert_eq!(fx_frame(1e6), fx_frame(FX_DOMAIN_MAX));
}

#[test]
fn frames_are_idempotent_per_coordinate() {
    for x in [0.0, 12.34, 27.5, 45.0, 59.99] {
        assert_eq!(fx_frame(x), fx_frame(x));
    }
}
