// Shared tuning constants for the pure engine core.
//
// These express intended behavior (counts, spans, time constants) and keep
// magic numbers out of the per-frame code.

// Scene layout
pub const RING_COUNT: usize = 210; // fixed element count, created once at startup
pub const RING_SPACING: f32 = 0.3; // world-units between adjacent rings on x

// Active window
pub const GROUP_SIZE: usize = 20; // consecutive rings lifted per segment
pub const ARCH_AMPLITUDE: f32 = 0.8; // peak lift is 2 * amplitude at window center

// Caption sprites: 20 regular + 3 intro
pub const SPRITE_COUNT: usize = 23;

// Scroll input
pub const SCROLL_SENSITIVITY: f32 = 0.5; // raw accumulator units per wheel delta
pub const SCROLL_SPAN_PER_RING: f32 = 15.0; // raw accumulator units per ring
pub const SCROLL_SCALE_FACTOR: f32 = 10.0; // raw -> smoothed position divisor
pub const POSITION_TO_WORLD_SCALE: f32 = 5.0; // smoothed position -> camera coordinate divisor

// Smoothing time constant shared by scroll easing, ring lift/color and
// caption fades. Chosen so a single 60 Hz frame moves 5% of the remaining
// distance (the historical per-frame rate), expressed in wall-clock time so
// behavior is frame-rate independent.
pub const SMOOTH_TAU_SEC: f32 = 0.325;

// Captions below this opacity while fading out snap to exactly 0 and detach.
pub const SPRITE_SNAP_THRESHOLD: f32 = 0.01;

// Ambient motion
pub const SWAY_SPEED: f32 = 1.0; // rad/sec of horizontal group sway
pub const SWAY_AMOUNT: f32 = 0.01; // world-units of sway amplitude
pub const RING_SPIN_RATE: f32 = 0.006; // rad/sec of idle ring rotation

/// Upper clamp for the raw scroll accumulator.
#[inline]
pub fn max_scroll() -> f32 {
    SCROLL_SPAN_PER_RING * (RING_COUNT - 1) as f32
}

/// Time-based exponential smoothing coefficient for a frame of `dt_sec`.
#[inline]
pub fn smoothing_alpha(dt_sec: f32) -> f32 {
    1.0 - (-dt_sec / SMOOTH_TAU_SEC).exp()
}
