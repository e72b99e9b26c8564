//! Architectural feature detection on building footprints.
//!
//! A footprint is a closed polygon boundary. We classify runs of its edges as
//! curvy, rectangular bumps or triangular bumps, and tag every edge of a run
//! so downstream facade code can treat it as one unit.
//!
//! Pipeline
//! - `attributes`: per-edge `(length, sin_start, sin_end)`.
//! - `symbols`: edge alphabets for the curvy and small-feature detectors.
//! - `scan`: circular pattern automata with per-pass masking.
//! - `detect`: curvy runs, the small-feature gate, and the four bump passes.
//! - `annotate`: writes feature classes onto edges.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Prefer clarity over compatibility; breaking changes are fine when they
//!   improve the detectors.

pub mod annotate;
pub mod attributes;
pub mod cfg;
pub mod detect;
pub mod pipeline;
pub mod polygon;
pub mod sample;
pub mod scan;
pub mod symbols;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use annotate::annotate;
pub use cfg::{CfgError, FeatureCfg};
pub use detect::{
    detect_features, detect_features_report, DetectionReport, FeatureClass, FeatureSpan,
    SmallFeatures,
};
pub use nalgebra::Vector2 as Vec2;
pub use pipeline::{detect_and_annotate, process_footprints};
pub use polygon::{Edge, EdgeId, Polygon, PolygonError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::annotate::annotate;
    pub use crate::attributes::{extract_attributes, EdgeAttrs};
    pub use crate::cfg::FeatureCfg;
    pub use crate::detect::{
        detect_curvy, detect_features, detect_features_report, detect_small_features,
        small_feature_gate, DetectionReport, FeatureClass, FeatureSpan, SmallFeatures,
    };
    pub use crate::pipeline::{detect_and_annotate, process_footprints};
    pub use crate::polygon::{Edge, EdgeId, Polygon, PolygonError};
    pub use crate::sample::{draw_footprint, FootprintCfg, FootprintShape};
    pub use nalgebra::Vector2 as Vec2;
}

/// Signed turning sine from direction `a` to direction `b`.
///
/// Equals the signed area of the parallelogram spanned by `a` and `b`.
/// Positive for a left (counterclockwise) turn, negative for a right turn.
#[inline]
pub fn turning_sine(a: Vec2<f64>, b: Vec2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
