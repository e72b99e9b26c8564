//! Synthetic building footprints (rectangles with bumps, rounded corners, rotundas).
//!
//! Purpose
//! - Deterministic, realistic inputs for benches, property tests and the CLI
//!   `sample` command.
//!
//! Model
//! - `Rectilinear`: a CCW `width × depth` rectangle. Bumps are spread evenly
//!   along the two long sides; each is a random `BumpKind`. Optionally the
//!   north-east corner is replaced by a quarter arc of short chords.
//! - `Round`: a circle of `segments` chords with mild angular jitter.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! With the default config every bump edge is short and every gap between
//! bumps is long, so each bump encodes to exactly one small-feature match.
//! Concave bumps are never placed back to back: the wall between them would
//! read as a convex rectangle.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::detect::FeatureClass;
use crate::polygon::{Polygon, PolygonError};

/// Footprint family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FootprintShape {
    Rectilinear {
        bumps: usize,
        /// Chord count of the rounded north-east corner, if any.
        rounded_corner: Option<usize>,
    },
    Round {
        segments: usize,
    },
}

/// Bump placed on a straight side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BumpKind {
    ConvexRectangular,
    ConcaveRectangular,
    ConvexTriangular,
    ConcaveTriangular,
}

impl BumpKind {
    pub const ALL: [BumpKind; 4] = [
        BumpKind::ConvexRectangular,
        BumpKind::ConcaveRectangular,
        BumpKind::ConvexTriangular,
        BumpKind::ConcaveTriangular,
    ];

    pub const CONVEX: [BumpKind; 2] = [BumpKind::ConvexRectangular, BumpKind::ConvexTriangular];

    pub fn is_concave(self) -> bool {
        matches!(
            self,
            BumpKind::ConcaveRectangular | BumpKind::ConcaveTriangular
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BumpKind::ConvexRectangular => "convex_rectangular",
            BumpKind::ConcaveRectangular => "concave_rectangular",
            BumpKind::ConvexTriangular => "convex_triangular",
            BumpKind::ConcaveTriangular => "concave_triangular",
        }
    }

    pub fn class(self) -> FeatureClass {
        match self {
            BumpKind::ConvexRectangular | BumpKind::ConcaveRectangular => {
                FeatureClass::Rectangular
            }
            BumpKind::ConvexTriangular | BumpKind::ConcaveTriangular => FeatureClass::Triangular,
        }
    }
}

/// Sampler configuration. Ranges are `(min, max)`; equal bounds are fixed values.
#[derive(Clone, Copy, Debug)]
pub struct FootprintCfg {
    pub shape: FootprintShape,
    pub width: (f64, f64),
    pub depth: (f64, f64),
    /// Bump width along the side.
    pub bump_width: (f64, f64),
    /// Rectangular bump depth; triangles use their own depth rule.
    pub bump_depth: (f64, f64),
    /// Minimum straight run left between bumps and corners.
    pub min_gap: f64,
    pub corner_radius: (f64, f64),
}

impl Default for FootprintCfg {
    fn default() -> Self {
        Self {
            shape: FootprintShape::Rectilinear {
                bumps: 4,
                rounded_corner: None,
            },
            width: (24.0, 40.0),
            depth: (10.0, 18.0),
            bump_width: (1.0, 2.5),
            bump_depth: (0.8, 2.0),
            min_gap: 4.0,
            corner_radius: (2.0, 4.0),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One drawn footprint with the bumps actually placed (in boundary order).
#[derive(Clone, Debug)]
pub struct Footprint {
    pub points: Vec<Vector2<f64>>,
    pub bumps: Vec<BumpKind>,
    pub polygon: Polygon,
}

#[inline]
fn uniform<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Draw one footprint.
pub fn draw_footprint(cfg: &FootprintCfg, tok: ReplayToken) -> Result<Footprint, PolygonError> {
    let mut rng = tok.to_std_rng();
    let (points, bumps) = match cfg.shape {
        FootprintShape::Round { segments } => (round_points(cfg, segments, &mut rng), Vec::new()),
        FootprintShape::Rectilinear {
            bumps,
            rounded_corner,
        } => rectilinear_points(cfg, bumps, rounded_corner, &mut rng),
    };
    let polygon = Polygon::from_points(&points)?;
    Ok(Footprint {
        points,
        bumps,
        polygon,
    })
}

fn round_points<R: Rng>(cfg: &FootprintCfg, segments: usize, rng: &mut R) -> Vec<Vector2<f64>> {
    let n = segments.max(3);
    let r = 0.5 * uniform(rng, cfg.width).min(uniform(rng, cfg.depth));
    let delta = std::f64::consts::TAU / n as f64;
    (0..n)
        .map(|k| {
            let th = k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * 0.1 * delta;
            Vector2::new(r * th.cos(), r * th.sin())
        })
        .collect()
}

/// Straight side from `a` to `b` carrying `bumps` bumps.
struct Side {
    a: Vector2<f64>,
    b: Vector2<f64>,
    bumps: usize,
}

fn rectilinear_points<R: Rng>(
    cfg: &FootprintCfg,
    bumps: usize,
    rounded_corner: Option<usize>,
    rng: &mut R,
) -> (Vec<Vector2<f64>>, Vec<BumpKind>) {
    let w = uniform(rng, cfg.width);
    let h = uniform(rng, cfg.depth).min(w);
    let rc = match rounded_corner {
        Some(_) => uniform(rng, cfg.corner_radius).min(0.25 * h),
        None => 0.0,
    };

    // Bumps go on the two long sides, bottom first.
    let slot_min = cfg.bump_width.1 + cfg.min_gap;
    let fit = |len: f64| ((len / slot_min).floor() as usize).saturating_sub(1);
    let bottom = bumps.div_ceil(2).min(fit(w));
    let top = (bumps - bumps.div_ceil(2)).min(fit(w - rc));

    let sides = [
        Side {
            a: Vector2::new(0.0, 0.0),
            b: Vector2::new(w, 0.0),
            bumps: bottom,
        },
        Side {
            a: Vector2::new(w, 0.0),
            b: Vector2::new(w, h - rc),
            bumps: 0,
        },
        Side {
            a: Vector2::new(w - rc, h),
            b: Vector2::new(0.0, h),
            bumps: top,
        },
        Side {
            a: Vector2::new(0.0, h),
            b: Vector2::new(0.0, 0.0),
            bumps: 0,
        },
    ];

    let mut points = Vec::new();
    let mut kinds = Vec::new();
    for (i, side) in sides.iter().enumerate() {
        points.push(side.a);
        let len = (side.b - side.a).norm();
        let u = (side.b - side.a) / len;
        // Outward normal: right of travel for a CCW boundary.
        let o = Vector2::new(u.y, -u.x);
        let mut prev_concave = false;
        for k in 0..side.bumps {
            // Two concave bumps in a row enclose a convex rectangle.
            let choices: &[BumpKind] = if prev_concave {
                &BumpKind::CONVEX
            } else {
                &BumpKind::ALL
            };
            let kind = choices[rng.gen_range(0..choices.len())];
            prev_concave = kind.is_concave();
            let t = len * (k + 1) as f64 / (side.bumps + 1) as f64;
            let half = 0.5 * uniform(rng, cfg.bump_width);
            push_bump(&mut points, kind, side.a + u * t, u, o, half, cfg, rng);
            kinds.push(kind);
        }
        // Arc between the east side and the north side.
        if i == 1 && rc > 0.0 {
            points.push(side.b);
            if let Some(segments) = rounded_corner {
                let c = Vector2::new(w - rc, h - rc);
                let m = segments.max(1);
                for j in 1..m {
                    let phi = j as f64 * std::f64::consts::FRAC_PI_2 / m as f64;
                    points.push(c + Vector2::new(phi.cos(), phi.sin()) * rc);
                }
            }
        }
    }
    (points, kinds)
}

#[allow(clippy::too_many_arguments)]
fn push_bump<R: Rng>(
    points: &mut Vec<Vector2<f64>>,
    kind: BumpKind,
    center: Vector2<f64>,
    u: Vector2<f64>,
    o: Vector2<f64>,
    half: f64,
    cfg: &FootprintCfg,
    rng: &mut R,
) {
    let p0 = center - u * half;
    let p1 = center + u * half;
    match kind {
        BumpKind::ConvexRectangular | BumpKind::ConcaveRectangular => {
            let sign = if kind == BumpKind::ConvexRectangular {
                1.0
            } else {
                -1.0
            };
            let d = o * (sign * uniform(rng, cfg.bump_depth));
            points.extend([p0, p0 + d, p1 + d, p1]);
        }
        BumpKind::ConvexTriangular | BumpKind::ConcaveTriangular => {
            let sign = if kind == BumpKind::ConvexTriangular {
                1.0
            } else {
                -1.0
            };
            // Depth between one and 1.8 half-widths keeps both slant turns
            // and the apex turn above sin(30°).
            let d = o * (sign * half * uniform(rng, (1.0, 1.8)));
            points.extend([p0, center + d, p1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let cfg = FootprintCfg::default();
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_footprint(&cfg, tok).unwrap();
        let b = draw_footprint(&cfg, tok).unwrap();
        assert_eq!(a.points, b.points);
        assert_eq!(a.bumps, b.bumps);
    }

    #[test]
    fn bump_vertex_counts() {
        let cfg = FootprintCfg::default();
        let fp = draw_footprint(&cfg, ReplayToken { seed: 3, index: 0 }).unwrap();
        assert_eq!(fp.bumps.len(), 4);
        let extra: usize = fp
            .bumps
            .iter()
            .map(|k| match k.class() {
                FeatureClass::Rectangular => 4,
                _ => 3,
            })
            .sum();
        assert_eq!(fp.points.len(), 4 + extra);
    }

    #[test]
    fn round_has_requested_segments() {
        let cfg = FootprintCfg {
            shape: FootprintShape::Round { segments: 24 },
            ..FootprintCfg::default()
        };
        let fp = draw_footprint(&cfg, ReplayToken { seed: 1, index: 2 }).unwrap();
        assert_eq!(fp.polygon.len(), 24);
        assert!(fp.bumps.is_empty());
    }

    #[test]
    fn rounded_corner_adds_arc_vertices() {
        let cfg = FootprintCfg {
            shape: FootprintShape::Rectilinear {
                bumps: 0,
                rounded_corner: Some(4),
            },
            ..FootprintCfg::default()
        };
        let fp = draw_footprint(&cfg, ReplayToken { seed: 5, index: 0 }).unwrap();
        // 4 corners, minus the replaced one, plus both tangent points and 3 inner arc points.
        assert_eq!(fp.points.len(), 4 + 1 + 3);
    }
}
