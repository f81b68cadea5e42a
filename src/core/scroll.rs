use super::constants::*;

/// Accumulates raw wheel/touch deltas into a clamped scalar and smooths it
/// into the camera coordinate that drives both the visual segment machine
/// and the audio automation.
///
/// The raw accumulator moves instantly on input; the smoothed position lags
/// it through an exponential low-pass and never overshoots. All methods run
/// synchronously inside the frame callback.
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    raw: f32,
    smoothed: f32,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input event's vertical delta.
    pub fn accumulate(&mut self, delta_y: f32) {
        self.raw = (self.raw + delta_y * SCROLL_SENSITIVITY).clamp(0.0, max_scroll());
    }

    /// Advance the low-pass filter by one frame and return the camera
    /// coordinate for this frame.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        let alpha = smoothing_alpha(dt_sec);
        self.smoothed += (self.raw / SCROLL_SCALE_FACTOR - self.smoothed) * alpha;
        self.camera_coordinate()
    }

    #[inline]
    pub fn camera_coordinate(&self) -> f32 {
        self.smoothed / POSITION_TO_WORLD_SCALE
    }

    #[inline]
    pub fn raw(&self) -> f32 {
        self.raw
    }

    #[inline]
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }
}
