/// Color/lift regime of a segment. Intro and terminal segments color in the
/// warm regime; the terminal one colors without lifting its window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Intro,
    Interior,
    Terminal,
}

/// One half-open `[lo, hi)` slice of the camera coordinate domain.
///
/// `group_start` is the first ring of the 20-wide active window (absent for
/// the transitional slice just after the intro, which only fades captions).
/// `fade_in` / `fade_out` are half-open caption index ranges; `relax_left` /
/// `relax_right` name the neighboring window starts that settle back down
/// while this segment is active.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub lo: f32,
    pub hi: f32,
    pub kind: SegmentKind,
    pub group_start: Option<usize>,
    pub fade_in: (usize, usize),
    pub fade_out: (usize, usize),
    pub relax_left: Option<usize>,
    pub relax_right: Option<usize>,
}

impl Segment {
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.lo <= x && x < self.hi
    }
}

// Hand-tuned breakpoint table. The spacing is irregular on purpose: each row
// matches one stretch of authored content, not a formula. Rows must stay
// sorted and contiguous; the last row is unbounded above.
const ROWS: &[Segment] = &[
    Segment {
        lo: 0.0,
        hi: 0.35,
        kind: SegmentKind::Intro,
        group_start: Some(0),
        fade_in: (20, 23),
        fade_out: (0, 20),
        relax_left: None,
        relax_right: None,
    },
    Segment {
        lo: 0.35,
        hi: 1.0,
        kind: SegmentKind::Interior,
        group_start: None,
        fade_in: (0, 1),
        fade_out: (20, 23),
        relax_left: None,
        relax_right: Some(0),
    },
    Segment {
        lo: 1.0,
        hi: 5.72,
        kind: SegmentKind::Interior,
        group_start: Some(0),
        fade_in: (1, 2),
        fade_out: (0, 1),
        relax_left: None,
        relax_right: Some(20),
    },
    Segment {
        lo: 5.72,
        hi: 12.0,
        kind: SegmentKind::Interior,
        group_start: Some(20),
        fade_in: (2, 3),
        fade_out: (1, 2),
        relax_left: Some(0),
        relax_right: Some(40),
    },
    Segment {
        lo: 12.0,
        hi: 17.75,
        kind: SegmentKind::Interior,
        group_start: Some(40),
        fade_in: (3, 5),
        fade_out: (2, 3),
        relax_left: Some(20),
        relax_right: Some(60),
    },
    Segment {
        lo: 17.75,
        hi: 24.0,
        kind: SegmentKind::Interior,
        group_start: Some(60),
        fade_in: (5, 7),
        fade_out: (3, 5),
        relax_left: Some(40),
        relax_right: Some(80),
    },
    Segment {
        lo: 24.0,
        hi: 29.75,
        kind: SegmentKind::Interior,
        group_start: Some(80),
        fade_in: (7, 9),
        fade_out: (5, 7),
        relax_left: Some(60),
        relax_right: Some(100),
    },
    Segment {
        lo: 29.75,
        hi: 36.0,
        kind: SegmentKind::Interior,
        group_start: Some(100),
        fade_in: (9, 11),
        fade_out: (7, 9),
        relax_left: Some(80),
        relax_right: Some(120),
    },
    Segment {
        lo: 36.0,
        hi: 41.7,
        kind: SegmentKind::Interior,
        group_start: Some(120),
        fade_in: (11, 13),
        fade_out: (9, 11),
        relax_left: Some(100),
        relax_right: Some(140),
    },
    Segment {
        lo: 41.7,
        hi: 48.0,
        kind: SegmentKind::Interior,
        group_start: Some(140),
        fade_in: (13, 15),
        fade_out: (11, 13),
        relax_left: Some(120),
        relax_right: Some(160),
    },
    Segment {
        lo: 48.0,
        hi: 53.7,
        kind: SegmentKind::Interior,
        group_start: Some(160),
        fade_in: (15, 17),
        fade_out: (13, 15),
        relax_left: Some(140),
        relax_right: Some(180),
    },
    Segment {
        lo: 53.7,
        hi: 59.42,
        kind: SegmentKind::Interior,
        group_start: Some(180),
        fade_in: (17, 19),
        fade_out: (15, 17),
        relax_left: Some(160),
        relax_right: Some(200),
    },
    Segment {
        lo: 59.42,
        hi: f32::INFINITY,
        kind: SegmentKind::Terminal,
        group_start: Some(200),
        fade_in: (19, 20),
        fade_out: (17, 19),
        relax_left: Some(180),
        relax_right: None,
    },
];

/// Ordered breakpoint table mapping a camera coordinate to its segment.
///
/// Resolution is a pure function of position: half-open intervals make exact
/// boundary values unambiguous, so no hysteresis band is needed.
#[derive(Clone, Debug)]
pub struct SegmentTable {
    rows: Vec<Segment>,
}

impl SegmentTable {
    /// The authored table used by the scene.
    pub fn builtin() -> Self {
        Self::new(ROWS.to_vec())
    }

    /// Build from an arbitrary irregular table. Rows must be sorted and
    /// contiguous; the caller owns the tuning.
    pub fn new(rows: Vec<Segment>) -> Self {
        debug_assert!(!rows.is_empty());
        debug_assert!(rows.windows(2).all(|w| w[0].hi == w[1].lo));
        Self { rows }
    }

    /// Resolve the segment containing `x`. Out-of-domain coordinates clamp
    /// to the nearest end, never fail.
    pub fn resolve(&self, x: f32) -> &Segment {
        let x = x.max(0.0);
        self.rows
            .iter()
            .find(|s| x < s.hi)
            .unwrap_or_else(|| &self.rows[self.rows.len() - 1])
    }

    /// Index of the segment containing `x`.
    pub fn resolve_index(&self, x: f32) -> usize {
        let x = x.max(0.0);
        self.rows
            .iter()
            .position(|s| x < s.hi)
            .unwrap_or(self.rows.len() - 1)
    }

    pub fn rows(&self) -> &[Segment] {
        &self.rows
    }
}
