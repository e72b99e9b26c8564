//! Per-edge numeric attributes used by both detectors.

use crate::polygon::{EdgeId, Polygon};
use crate::turning_sine;

/// `(length, sin_start, sin_end)` for one edge.
///
/// `sin_start` is the turn from the previous edge into this one,
/// `sin_end` the turn from this edge into the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeAttrs {
    pub length: f64,
    pub sin_start: f64,
    pub sin_end: f64,
}

/// Attributes for every edge, indexed like `polygon.edges()`.
pub fn extract_attributes(polygon: &Polygon) -> Vec<EdgeAttrs> {
    let n = polygon.len();
    let sin_start: Vec<f64> = (0..n)
        .map(|i| {
            let id = EdgeId(i);
            let prev = polygon.edge(polygon.prev(id)).unit;
            turning_sine(prev, polygon.edge(id).unit)
        })
        .collect();
    (0..n)
        .map(|i| EdgeAttrs {
            length: polygon.edge(EdgeId(i)).length,
            sin_start: sin_start[i],
            sin_end: sin_start[(i + 1) % n],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn ccw_square_turns_left_everywhere() {
        let p = Polygon::from_points(&[
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 1.0],
            vector![0.0, 1.0],
        ])
        .unwrap();
        let attrs = extract_attributes(&p);
        assert_eq!(attrs.len(), 4);
        for a in &attrs {
            assert!((a.sin_start - 1.0).abs() < 1e-12);
            assert!((a.sin_end - 1.0).abs() < 1e-12);
        }
        assert!((attrs[0].length - 2.0).abs() < 1e-12);
        assert!((attrs[1].length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sin_end_is_next_sin_start() {
        // L-shaped footprint with one reflex corner at (1, 1).
        let p = Polygon::from_points(&[
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 1.0],
            vector![1.0, 1.0],
            vector![1.0, 2.0],
            vector![0.0, 2.0],
        ])
        .unwrap();
        let attrs = extract_attributes(&p);
        let n = attrs.len();
        for i in 0..n {
            assert_eq!(attrs[i].sin_end, attrs[(i + 1) % n].sin_start);
        }
        // Edge 3 runs (1,1) → (1,2): turning right into it from heading west.
        assert!((attrs[3].sin_start + 1.0).abs() < 1e-12);
    }
}
