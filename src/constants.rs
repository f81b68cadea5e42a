// Host-page wiring constants for the wasm frontend.

// Asset paths, relative to the serving root.
pub const SOURCE_CLIP_URL: &str = "static/audio/source.mp3";
pub const IR_SMALL_URL: &str = "static/ir/small.wav";
pub const IR_LARGE_URL: &str = "static/ir/large.wav";
pub const IR_MEDIUM_URL: &str = "static/ir/medium.wav";

// DOM ids
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const CAPTION_ID_PREFIX: &str = "caption-";

// Toggle button labels per playback state
pub const LABEL_ENABLE: &str = "Enable Audio \u{266c}";
pub const LABEL_DISABLE: &str = "Disable Audio \u{266c}";

// Touch deltas read smaller than wheel deltas; scale them up so a swipe
// covers comparable distance.
pub const TOUCH_DELTA_SCALE: f32 = 2.0;

// Long host pauses (tab switch, debugger) must not teleport the easing.
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
