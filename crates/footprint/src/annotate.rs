//! Writes detected feature classes onto polygon edges.

use crate::detect::FeatureSpan;
use crate::polygon::Polygon;

/// Tag every edge of every span, walking `next` from `start` to `end` inclusive.
///
/// A span with `start == end` tags the whole polygon once. Spans are applied
/// in order, so a later span overwrites an earlier one on shared edges.
/// Re-running with the same spans yields the same tags.
pub fn annotate(polygon: &mut Polygon, spans: &[FeatureSpan]) {
    let n = polygon.len();
    for span in spans {
        let mut cur = span.start;
        for _ in 0..span.edge_count(n) {
            polygon.edge_mut(cur).tag = Some(span.class);
            cur = polygon.next(cur);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FeatureClass;
    use crate::polygon::{Edge, EdgeId};
    use nalgebra::Vector2;

    fn ring(n: usize) -> Polygon {
        let edges = (0..n)
            .map(|i| {
                let th = i as f64 * std::f64::consts::TAU / n as f64;
                Edge::new(1.0, Vector2::new(th.cos(), th.sin()))
            })
            .collect();
        Polygon::from_edges(edges).unwrap()
    }

    fn span(start: usize, end: usize, class: FeatureClass) -> FeatureSpan {
        FeatureSpan {
            start: EdgeId(start),
            end: EdgeId(end),
            class,
        }
    }

    #[test]
    fn tags_inclusive_range() {
        let mut p = ring(8);
        annotate(&mut p, &[span(1, 3, FeatureClass::Rectangular)]);
        let tags = p.tags();
        assert_eq!(tags[0], None);
        assert!(tags[1..=3]
            .iter()
            .all(|t| *t == Some(FeatureClass::Rectangular)));
        assert!(tags[4..].iter().all(|t| t.is_none()));
    }

    #[test]
    fn wraps_past_last_edge() {
        let mut p = ring(6);
        annotate(&mut p, &[span(4, 1, FeatureClass::Triangular)]);
        let tagged: Vec<usize> = (0..6).filter(|&i| p.tags()[i].is_some()).collect();
        assert_eq!(tagged, vec![0, 1, 4, 5]);
    }

    #[test]
    fn whole_polygon_when_start_equals_end() {
        let mut p = ring(6);
        annotate(&mut p, &[span(2, 2, FeatureClass::Curvy)]);
        assert!(p.tags().iter().all(|t| *t == Some(FeatureClass::Curvy)));
    }

    #[test]
    fn annotation_is_idempotent() {
        let spans = [
            span(0, 2, FeatureClass::Curvy),
            span(2, 4, FeatureClass::Triangular),
        ];
        let mut once = ring(7);
        annotate(&mut once, &spans);
        let mut twice = once.clone();
        annotate(&mut twice, &spans);
        assert_eq!(once.tags(), twice.tags());
        // Later span wins on the shared edge.
        assert_eq!(once.tags()[2], Some(FeatureClass::Triangular));
    }
}
