//! Detection followed by annotation, for one footprint or many.

use crate::annotate::annotate;
use crate::cfg::FeatureCfg;
use crate::detect::{detect_features, FeatureSpan};
use crate::polygon::Polygon;

/// Detect on the untouched geometry, then tag the edges.
///
/// Existing tags are overwritten only where a new span covers them.
pub fn detect_and_annotate(polygon: &mut Polygon, cfg: &FeatureCfg) -> Vec<FeatureSpan> {
    let spans = detect_features(polygon, cfg);
    if !spans.is_empty() {
        annotate(polygon, &spans);
    }
    spans
}

/// Run `detect_and_annotate` over every footprint, returning spans per footprint.
///
/// Footprints are independent; callers that want parallelism can split the
/// slice into disjoint chunks.
pub fn process_footprints(footprints: &mut [Polygon], cfg: &FeatureCfg) -> Vec<Vec<FeatureSpan>> {
    let out: Vec<Vec<FeatureSpan>> = footprints
        .iter_mut()
        .map(|p| detect_and_annotate(p, cfg))
        .collect();
    tracing::debug!(
        footprints = footprints.len(),
        with_features = out.iter().filter(|s| !s.is_empty()).count(),
        "process_footprints"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FeatureClass;
    use crate::polygon::EdgeId;
    use crate::sample::{draw_footprint, FootprintCfg, FootprintShape, ReplayToken};
    use nalgebra::vector;

    fn bumped(index: u64) -> Polygon {
        draw_footprint(&FootprintCfg::default(), ReplayToken { seed: 11, index })
            .unwrap()
            .polygon
    }

    fn square() -> Polygon {
        Polygon::from_points(&[
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ])
        .unwrap()
    }

    #[test]
    fn tags_follow_spans_detected_on_clean_geometry() {
        let cfg = FeatureCfg::default();
        let mut p = bumped(0);
        let expected = detect_features(&p, &cfg);
        assert!(!expected.is_empty());
        // Stale tags must not influence detection.
        for i in 0..p.len() {
            p.edge_mut(EdgeId(i)).tag = Some(FeatureClass::Curvy);
        }
        p.clear_tags();
        let spans = detect_and_annotate(&mut p, &cfg);
        assert_eq!(spans, expected);
        let n = p.len();
        for (i, tag) in p.tags().iter().enumerate() {
            let covering = spans.iter().rev().find(|s| s.contains(EdgeId(i), n));
            assert_eq!(*tag, covering.map(|s| s.class), "edge {i}");
        }
    }

    #[test]
    fn detection_ignores_existing_tags() {
        let cfg = FeatureCfg::default();
        let clean = bumped(3);
        let mut tagged = clean.clone();
        tagged.edge_mut(EdgeId(0)).tag = Some(FeatureClass::Triangular);
        assert_eq!(
            detect_and_annotate(&mut tagged, &cfg),
            detect_features(&clean, &cfg)
        );
    }

    #[test]
    fn no_spans_leaves_tags_untouched() {
        let cfg = FeatureCfg::default();
        let mut p = square();
        p.edge_mut(EdgeId(2)).tag = Some(FeatureClass::Rectangular);
        let before = p.tags();
        assert!(detect_and_annotate(&mut p, &cfg).is_empty());
        assert_eq!(p.tags(), before);
    }

    #[test]
    fn batch_matches_one_at_a_time() {
        let cfg = FeatureCfg::default();
        let round = FootprintCfg {
            shape: FootprintShape::Round { segments: 24 },
            width: (6.0, 7.0),
            depth: (6.0, 7.0),
            ..FootprintCfg::default()
        };
        let rotunda = draw_footprint(&round, ReplayToken { seed: 2, index: 0 })
            .unwrap()
            .polygon;
        let mut batch = vec![bumped(1), square(), rotunda, bumped(2)];
        let mut single = batch.clone();

        let out = process_footprints(&mut batch, &cfg);
        assert_eq!(out.len(), 4);
        assert!(out[1].is_empty());
        for (i, p) in single.iter_mut().enumerate() {
            assert_eq!(detect_and_annotate(p, &cfg), out[i], "footprint {i}");
            assert_eq!(p.tags(), batch[i].tags(), "footprint {i}");
        }
    }
}
