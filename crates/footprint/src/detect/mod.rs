//! Feature detectors and their combined entry points.
//!
//! Purpose
//! - `curvy`: long runs of short, gently turning edges (round corners,
//!   rotundas, curved facades).
//! - `small`: rectangular and triangular bumps, convex and concave, found by
//!   four prioritized passes behind a coarse length gate.
//!
//! Both detectors read only edge geometry, never tags, so annotation can
//! safely run afterwards on the same polygon.

mod curvy;
mod small;
mod types;

pub use curvy::{curvy_length_thresh, detect_curvy, CURVY_RUN, MIN_CURVY_RUN};
pub use small::{
    detect_small_features, length_counts, match_passes, small_feature_gate, Pass, PASSES,
};
pub use types::{DetectionReport, FeatureClass, FeatureSpan, SmallFeatures};

use crate::attributes::extract_attributes;
use crate::cfg::FeatureCfg;
use crate::polygon::Polygon;

/// Run both detectors and keep the small-feature gate outcome.
pub fn detect_features_report(polygon: &Polygon, cfg: &FeatureCfg) -> DetectionReport {
    let attrs = extract_attributes(polygon);
    let curvy = detect_curvy(&attrs, cfg).unwrap_or_default();
    let small = if small_feature_gate(&attrs, cfg) {
        match detect_small_features(&attrs, cfg) {
            Some(spans) => SmallFeatures::Found(spans),
            None => SmallFeatures::NoMatch,
        }
    } else {
        SmallFeatures::Skipped
    };
    tracing::debug!(
        edges = polygon.len(),
        curvy = curvy.len(),
        small = small.spans().len(),
        small_ran = small.ran(),
        "detect_features"
    );
    DetectionReport { curvy, small }
}

/// All feature spans: curvy first, then small features in pass order.
pub fn detect_features(polygon: &Polygon, cfg: &FeatureCfg) -> Vec<FeatureSpan> {
    detect_features_report(polygon, cfg).into_spans()
}
