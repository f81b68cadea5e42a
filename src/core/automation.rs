// Pure scroll-position -> effect-parameter mapping.
//
// Everything here is a pure function of the clamped coordinate: the same
// input always yields the same `FxFrame`, so the per-frame caller can apply
// it unconditionally. The audio domain is clamped independently of the
// visual segment table; the two domains are configured separately and are
// not assumed to line up.

// Coordinate domain
pub const FX_DOMAIN_MAX: f32 = 60.0;

// Stereo pan: triangle wave, two full left-right sweeps over the domain.
pub const PAN_PERIOD: f32 = 30.0;
pub const PAN_SNAP_EPSILON: f32 = 1e-6;
pub const PAN_RAMP_TAU: f64 = 0.02;

// Delay send envelope
const DELAY_BUMP_CENTER: f32 = 27.5;
const DELAY_BUMP_WIDTH: f32 = 6.0;
const DELAY_WET_MAX: f32 = 0.6;
const DELAY_BASE_TIME: f32 = 0.35;
const DELAY_TIME_WOBBLE: f32 = 0.08; // +-0.04s around base, in phase with the bump
const DELAY_TIME_MIN: f32 = 0.05;
const DELAY_TIME_MAX: f32 = 0.7;
const DELAY_FEEDBACK_MIN: f32 = 0.2;
const DELAY_FEEDBACK_MAX: f32 = 0.4;
const DELAY_TONE_OPEN_HZ: f32 = 6500.0;
const DELAY_TONE_DARK_HZ: f32 = 1400.0;
pub const DELAY_RAMP_TAU: f64 = 0.05;

// Reverb crossfade bands: small dominant, then small->large, then
// large->medium, covering the whole domain contiguously.
const REVERB_BAND_SMALL_END: f32 = 15.0;
const REVERB_BAND_LARGE_PEAK: f32 = 45.0;
const REVERB_SMALL_FLOOR: f32 = 0.15;
const REVERB_SMALL_PEAK: f32 = 0.5;
const REVERB_LARGE_PEAK: f32 = 0.7;
const REVERB_MEDIUM_PEAK: f32 = 0.5;
const REVERB_PREDELAY_MIN: f32 = 0.01;
const REVERB_PREDELAY_MAX: f32 = 0.045;
const REVERB_TONE_OPEN_HZ: f32 = 8000.0;
const REVERB_TONE_DARK_HZ: f32 = 3200.0;
pub const REVERB_RAMP_TAU: f64 = 0.08;

// Parallel compression, driven by the stronger of two bumps.
const COMP_BUMP_CENTER_A: f32 = 30.0;
const COMP_BUMP_CENTER_B: f32 = 60.0;
const COMP_BUMP_WIDTH: f32 = 5.5;
const COMP_THRESHOLD_SOFT_DB: f32 = -16.0;
const COMP_THRESHOLD_HARD_DB: f32 = -34.0;
const COMP_RATIO_SOFT: f32 = 2.0;
const COMP_RATIO_HARD: f32 = 7.0;
const COMP_ATTACK_SOFT: f32 = 0.015;
const COMP_ATTACK_HARD: f32 = 0.005;
const COMP_RELEASE_SOFT: f32 = 0.18;
const COMP_RELEASE_HARD: f32 = 0.12;
const COMP_SHELF_GAIN_MAX_DB: f32 = 5.0;
const COMP_WET_MIN: f32 = 0.25;
const COMP_WET_MAX: f32 = 0.85;
const COMP_MAKEUP_MIN: f32 = 1.0;
const COMP_MAKEUP_MAX: f32 = 1.6;
pub const COMP_SHELF_FREQ_HZ: f32 = 200.0;
pub const COMP_RAMP_TAU: f64 = 0.05;

/// Per-channel pan gains. `snapped` marks the triangle extremes where the
/// gains are exact {0,1} and must be set immediately instead of ramped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanFrame {
    pub pan: f32,
    pub left: f32,
    pub right: f32,
    pub snapped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DelayFrame {
    pub wet: f32,
    pub feedback: f32,
    pub time_sec: f32,
    pub tone_hz: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReverbFrame {
    pub small: f32,
    pub large: f32,
    pub medium: f32,
    pub predelay_sec: f32,
    pub tone_hz: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressorFrame {
    pub strength: f32,
    pub threshold_db: f32,
    pub ratio: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
    pub shelf_gain_db: f32,
    pub wet: f32,
    pub makeup: f32,
}

/// One frame's worth of parameter targets for the whole effect graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FxFrame {
    pub pan: PanFrame,
    pub delay: DelayFrame,
    pub reverb: ReverbFrame,
    pub compressor: CompressorFrame,
}

/// Gaussian-shaped envelope peaking at `center`.
#[inline]
pub fn gauss(x: f32, center: f32, width: f32) -> f32 {
    let t = (x - center) / width;
    (-0.5 * t * t).exp()
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Triangle wave in [-1, 1] with period `PAN_PERIOD`: -1 at the period
/// boundaries, +1 at the half period.
#[inline]
pub fn triangle_pan(x: f32) -> f32 {
    let t = (x % PAN_PERIOD) / PAN_PERIOD;
    (1.0 - 4.0 * (t - 0.5).abs()).clamp(-1.0, 1.0)
}

pub fn pan_frame(x: f32) -> PanFrame {
    let pan = triangle_pan(x);
    if pan <= -1.0 + PAN_SNAP_EPSILON {
        PanFrame {
            pan,
            left: 1.0,
            right: 0.0,
            snapped: true,
        }
    } else if pan >= 1.0 - PAN_SNAP_EPSILON {
        PanFrame {
            pan,
            left: 0.0,
            right: 1.0,
            snapped: true,
        }
    } else {
        // Independent linear channel gains, not equal-power.
        PanFrame {
            pan,
            left: if pan <= 0.0 { 1.0 } else { 1.0 - pan },
            right: if pan >= 0.0 { 1.0 } else { 1.0 + pan },
            snapped: false,
        }
    }
}

pub fn delay_frame(x: f32) -> DelayFrame {
    let bump = gauss(x, DELAY_BUMP_CENTER, DELAY_BUMP_WIDTH);
    DelayFrame {
        wet: lerp(0.0, DELAY_WET_MAX, bump),
        feedback: lerp(DELAY_FEEDBACK_MIN, DELAY_FEEDBACK_MAX, bump),
        time_sec: (DELAY_BASE_TIME + (bump - 0.5) * DELAY_TIME_WOBBLE)
            .clamp(DELAY_TIME_MIN, DELAY_TIME_MAX),
        tone_hz: lerp(DELAY_TONE_OPEN_HZ, DELAY_TONE_DARK_HZ, bump),
    }
}

pub fn reverb_frame(x: f32) -> ReverbFrame {
    let (small, large, medium) = if x < REVERB_BAND_SMALL_END {
        let k = x / REVERB_BAND_SMALL_END;
        (lerp(REVERB_SMALL_FLOOR, REVERB_SMALL_PEAK, k), 0.0, 0.0)
    } else if x < REVERB_BAND_LARGE_PEAK {
        let k = (x - REVERB_BAND_SMALL_END) / (REVERB_BAND_LARGE_PEAK - REVERB_BAND_SMALL_END);
        (
            lerp(REVERB_SMALL_PEAK, 0.0, k),
            lerp(0.0, REVERB_LARGE_PEAK, k),
            0.0,
        )
    } else {
        let k = (x - REVERB_BAND_LARGE_PEAK) / (FX_DOMAIN_MAX - REVERB_BAND_LARGE_PEAK);
        (
            0.0,
            lerp(REVERB_LARGE_PEAK, 0.0, k),
            lerp(0.0, REVERB_MEDIUM_PEAK, k),
        )
    };
    // Predelay and tone follow the large voice's share of its peak weight.
    let largeness = large / REVERB_LARGE_PEAK;
    ReverbFrame {
        small,
        large,
        medium,
        predelay_sec: lerp(REVERB_PREDELAY_MIN, REVERB_PREDELAY_MAX, largeness),
        tone_hz: lerp(REVERB_TONE_OPEN_HZ, REVERB_TONE_DARK_HZ, largeness),
    }
}

pub fn compressor_frame(x: f32) -> CompressorFrame {
    let strength = gauss(x, COMP_BUMP_CENTER_A, COMP_BUMP_WIDTH)
        .max(gauss(x, COMP_BUMP_CENTER_B, COMP_BUMP_WIDTH));
    CompressorFrame {
        strength,
        threshold_db: lerp(COMP_THRESHOLD_SOFT_DB, COMP_THRESHOLD_HARD_DB, strength),
        ratio: lerp(COMP_RATIO_SOFT, COMP_RATIO_HARD, strength),
        attack_sec: lerp(COMP_ATTACK_SOFT, COMP_ATTACK_HARD, strength),
        release_sec: lerp(COMP_RELEASE_SOFT, COMP_RELEASE_HARD, strength),
        shelf_gain_db: lerp(0.0, COMP_SHELF_GAIN_MAX_DB, strength),
        wet: lerp(COMP_WET_MIN, COMP_WET_MAX, strength),
        makeup: lerp(COMP_MAKEUP_MIN, COMP_MAKEUP_MAX, strength),
    }
}

/// Map a camera coordinate to the full bank of effect parameter targets.
/// Out-of-domain input clamps; equal inputs produce equal frames.
pub fn fx_frame(position: f32) -> FxFrame {
    let x = position.clamp(0.0, FX_DOMAIN_MAX);
    FxFrame {
        pan: pan_frame(x),
        delay: delay_frame(x),
        reverb: reverb_frame(x),
        compressor: compressor_frame(x),
    }
}
