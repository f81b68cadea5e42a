use super::constants::*;
use super::segments::{Segment, SegmentKind};
use glam::Vec3;

/// Rest color of an inactive ring (soft sage, matches the authored material).
pub const RING_REST_COLOR: Vec3 = Vec3::new(0.773, 0.824, 0.694);

// Hue is in turns, matching the HSL convention used by the color authoring.
const WARM_HUE: f32 = 0.0;
const COOL_HUE: f32 = 204.0 / 360.0;

/// One ring element. Created once at startup; `y` and `color` relax toward
/// their targets through the shared exponential smoothing.
#[derive(Clone, Debug)]
pub struct Ring {
    pub base_x: f32,
    pub y: f32,
    pub target_y: f32,
    pub color: Vec3,
    pub target_color: Vec3,
    pub spin: f32,
}

/// One caption sprite. Created hidden; attached to the render set when its
/// fade-in begins and detached once fully faded out.
#[derive(Clone, Debug, Default)]
pub struct Caption {
    pub opacity: f32,
    pub attached: bool,
}

/// The mutable visual state the external renderer draws each frame.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub rings: Vec<Ring>,
    pub captions: Vec<Caption>,
    pub sway_x: f32,
    elapsed: f32,
}

impl SceneState {
    pub fn new() -> Self {
        let rings = (0..RING_COUNT)
            .map(|i| Ring {
                base_x: i as f32 * RING_SPACING,
                y: 0.0,
                target_y: 0.0,
                color: RING_REST_COLOR,
                target_color: RING_REST_COLOR,
                spin: 0.0,
            })
            .collect();
        let captions = vec![Caption::default(); SPRITE_COUNT];
        Self {
            rings,
            captions,
            sway_x: 0.0,
            elapsed: 0.0,
        }
    }

    /// Advance every ring and caption one frame toward the state the active
    /// segment asks for.
    pub fn update(&mut self, seg: &Segment, dt_sec: f32) {
        self.elapsed += dt_sec;
        self.sway_x = (self.elapsed * SWAY_SPEED).sin() * SWAY_AMOUNT;
        let alpha = smoothing_alpha(dt_sec);

        for ring in &mut self.rings {
            ring.spin += RING_SPIN_RATE * dt_sec;
        }

        if let Some(start) = seg.group_start {
            self.animate_window(start, seg.kind, alpha);
        }
        // Neighboring windows settle while this segment is active. The decay
        // runs toward the negation of each ring's last target, not a fixed
        // rest of zero; kept as observed in the authored scene.
        if let Some(left) = seg.relax_left {
            self.relax_window(left, alpha);
        }
        if let Some(right) = seg.relax_right {
            self.relax_window(right, alpha);
        }

        self.fade_captions(seg, alpha);
    }

    fn animate_window(&mut self, start: usize, kind: SegmentKind, alpha: f32) {
        let half = (GROUP_SIZE - 1) as f32 / 2.0;
        for i in 0..GROUP_SIZE {
            let Some(ring) = self.rings.get_mut(start + i) else {
                break;
            };
            let distance = ((i as f32) - half).abs() / half;
            ring.target_color = match kind {
                SegmentKind::Intro | SegmentKind::Terminal => {
                    hsl_to_rgb(WARM_HUE, 1.0 - 0.6 * distance, 0.5)
                }
                SegmentKind::Interior => hsl_to_rgb(COOL_HUE, 0.86 * (1.0 - distance), 0.49),
            };
            ring.color = ring.color.lerp(ring.target_color, alpha);

            // The terminal window colors in place without lifting.
            if kind != SegmentKind::Terminal {
                let angle = i as f32 / (GROUP_SIZE - 1) as f32 * std::f32::consts::PI;
                ring.target_y = angle.sin() * 2.0 * ARCH_AMPLITUDE;
                ring.y += (ring.target_y - ring.y) * alpha;
            }
        }
    }

    fn relax_window(&mut self, start: usize, alpha: f32) {
        for ring in self.rings.iter_mut().skip(start).take(GROUP_SIZE) {
            ring.y -= (ring.target_y + ring.y) * alpha;
        }
    }

    fn fade_captions(&mut self, seg: &Segment, alpha: f32) {
        let (in_lo, in_hi) = seg.fade_in;
        let (out_lo, out_hi) = seg.fade_out;
        for (i, caption) in self.captions.iter_mut().enumerate() {
            if i >= in_lo && i < in_hi {
                // Attach before the rise begins so the renderer sees the
                // sprite from its first visible frame.
                caption.attached = true;
                caption.opacity += (1.0 - caption.opacity) * alpha;
            } else {
                caption.opacity -= caption.opacity * alpha;
                let fading_out = i >= out_lo && i < out_hi;
                if fading_out && caption.opacity <= SPRITE_SNAP_THRESHOLD {
                    caption.opacity = 0.0;
                    caption.attached = false;
                }
            }
            caption.opacity = caption.opacity.clamp(0.0, 1.0);
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert HSL (hue in turns, saturation and lightness in [0,1]) to linear
/// RGB in [0,1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_component(p, q, h + 1.0 / 3.0),
        hue_component(p, q, h),
        hue_component(p, q, h - 1.0 / 3.0),
    )
}

fn hue_component(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
