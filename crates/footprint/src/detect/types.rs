//! Detection results.

use crate::polygon::EdgeId;

/// Architectural feature class written onto edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureClass {
    Curvy,
    Rectangular,
    Triangular,
}

impl FeatureClass {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureClass::Curvy => "curvy",
            FeatureClass::Rectangular => "rectangular",
            FeatureClass::Triangular => "triangular",
        }
    }
}

/// Run of edges `start..=end` (circular) classified as `class`.
///
/// `start == end` denotes the whole polygon, not a single edge. No detector
/// produces single-edge spans. Detectors emit whole-polygon spans as `0..=0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeatureSpan {
    pub start: EdgeId,
    pub end: EdgeId,
    pub class: FeatureClass,
}

impl FeatureSpan {
    #[inline]
    pub fn is_whole_polygon(&self) -> bool {
        self.start == self.end
    }

    /// Number of edges covered on a polygon with `n` edges.
    pub fn edge_count(&self, n: usize) -> usize {
        if self.is_whole_polygon() {
            n
        } else {
            (self.end.0 + n - self.start.0) % n + 1
        }
    }

    /// Covered edges in traversal order.
    pub fn edges(&self, n: usize) -> impl Iterator<Item = EdgeId> {
        let start = self.start.0;
        (0..self.edge_count(n)).map(move |k| EdgeId((start + k) % n))
    }

    pub fn contains(&self, id: EdgeId, n: usize) -> bool {
        self.is_whole_polygon() || (id.0 + n - self.start.0) % n < self.edge_count(n)
    }

    /// Same span re-indexed for a traversal that starts `k` edges later.
    ///
    /// Whole-polygon spans are returned unchanged.
    pub fn rotated(&self, k: usize, n: usize) -> Self {
        if self.is_whole_polygon() {
            return *self;
        }
        let shift = |id: EdgeId| EdgeId((id.0 + n - k % n) % n);
        Self {
            start: shift(self.start),
            end: shift(self.end),
            class: self.class,
        }
    }
}

/// Outcome of the small-feature stage.
#[derive(Clone, Debug, PartialEq)]
pub enum SmallFeatures {
    /// Gate closed; the passes did not run.
    Skipped,
    /// Passes ran and matched nothing.
    NoMatch,
    Found(Vec<FeatureSpan>),
}

impl SmallFeatures {
    pub fn ran(&self) -> bool {
        !matches!(self, SmallFeatures::Skipped)
    }

    pub fn spans(&self) -> &[FeatureSpan] {
        match self {
            SmallFeatures::Found(spans) => spans,
            _ => &[],
        }
    }
}

/// Both detector outputs for one polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionReport {
    pub curvy: Vec<FeatureSpan>,
    pub small: SmallFeatures,
}

impl DetectionReport {
    /// Curvy spans first, then small-feature spans in pass order.
    pub fn into_spans(self) -> Vec<FeatureSpan> {
        let mut spans = self.curvy;
        if let SmallFeatures::Found(small) = self.small {
            spans.extend(small);
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> FeatureSpan {
        FeatureSpan {
            start: EdgeId(start),
            end: EdgeId(end),
            class: FeatureClass::Triangular,
        }
    }

    #[test]
    fn rotated_reindexes_partial_spans() {
        assert_eq!(span(4, 1).rotated(2, 6), span(2, 5));
        assert_eq!(span(1, 3).rotated(0, 6), span(1, 3));
    }

    #[test]
    fn whole_polygon_is_fixed_under_rotation() {
        let whole = span(0, 0);
        for k in 0..6 {
            assert_eq!(whole.rotated(k, 6), whole);
        }
    }

    #[test]
    fn contains_follows_the_wrap() {
        let s = span(4, 1);
        let inside: Vec<usize> = (0..6).filter(|&i| s.contains(EdgeId(i), 6)).collect();
        assert_eq!(inside, vec![0, 1, 4, 5]);
        assert!((0..6).all(|i| span(2, 2).contains(EdgeId(i), 6)));
    }
}
