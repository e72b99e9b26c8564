//! Closed footprint boundary as an edge arena.
//!
//! Edges live in one `Vec` in traversal order; `next`/`prev` are index
//! arithmetic modulo N, so the cyclic linkage never needs owned references.
//!
//! Invariants (enforced by the constructors)
//! - N ≥ 3.
//! - Every length is finite and ≥ 0; every direction is finite and unit length.
//! - `from_points` additionally rejects zero-length edges, since their
//!   direction is undefined.

use nalgebra::Vector2;
use std::fmt;

use crate::detect::FeatureClass;

/// Tolerance on `|unit| - 1` accepted by `Polygon::from_edges`.
const UNIT_EPS: f64 = 1e-6;

/// Index of an edge inside its polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// One directed boundary edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub length: f64,
    /// Direction of travel.
    pub unit: Vector2<f64>,
    /// Feature class written by `annotate`; `None` until then.
    pub tag: Option<FeatureClass>,
}

impl Edge {
    #[inline]
    pub fn new(length: f64, unit: Vector2<f64>) -> Self {
        Self {
            length,
            unit,
            tag: None,
        }
    }
}

/// Malformed polygon input.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonError {
    /// Fewer than three edges.
    TooFewEdges { n: usize },
    /// Edge starting at vertex `index` has zero length.
    DegenerateEdge { index: usize },
    /// Coordinate, length or direction at `index` is NaN or infinite (or a negative length).
    NonFinite { index: usize },
    /// Direction at `index` is not unit length.
    NotUnit { index: usize },
}

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonError::TooFewEdges { n } => {
                write!(f, "malformed polygon: need at least 3 edges, got {n}")
            }
            PolygonError::DegenerateEdge { index } => {
                write!(f, "malformed polygon: edge {index} has zero length")
            }
            PolygonError::NonFinite { index } => {
                write!(f, "malformed polygon: edge {index} has non-finite geometry")
            }
            PolygonError::NotUnit { index } => {
                write!(f, "malformed polygon: edge {index} direction is not unit length")
            }
        }
    }
}

impl std::error::Error for PolygonError {}

/// Closed polygon boundary with circular edge navigation.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    edges: Vec<Edge>,
}

impl Polygon {
    /// Build from vertices in boundary order. The closing edge `last → first`
    /// is implied; do not repeat the first vertex.
    pub fn from_points(points: &[Vector2<f64>]) -> Result<Self, PolygonError> {
        let n = points.len();
        if n < 3 {
            return Err(PolygonError::TooFewEdges { n });
        }
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            if !(p.x.is_finite() && p.y.is_finite() && q.x.is_finite() && q.y.is_finite()) {
                return Err(PolygonError::NonFinite { index: i });
            }
            let d = q - p;
            let length = d.norm();
            if length <= 0.0 {
                return Err(PolygonError::DegenerateEdge { index: i });
            }
            edges.push(Edge::new(length, d / length));
        }
        Ok(Self { edges })
    }

    /// Build from edges supplied by a geometry layer. Closure is not checked.
    pub fn from_edges(edges: Vec<Edge>) -> Result<Self, PolygonError> {
        let n = edges.len();
        if n < 3 {
            return Err(PolygonError::TooFewEdges { n });
        }
        for (index, e) in edges.iter().enumerate() {
            if !e.length.is_finite() || e.length < 0.0 {
                return Err(PolygonError::NonFinite { index });
            }
            if !(e.unit.x.is_finite() && e.unit.y.is_finite()) {
                return Err(PolygonError::NonFinite { index });
            }
            if (e.unit.norm() - 1.0).abs() > UNIT_EPS {
                return Err(PolygonError::NotUnit { index });
            }
        }
        Ok(Self { edges })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false for a constructed polygon; kept for clippy.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    /// Circular successor.
    #[inline]
    pub fn next(&self, id: EdgeId) -> EdgeId {
        EdgeId((id.0 + 1) % self.edges.len())
    }

    /// Circular predecessor.
    #[inline]
    pub fn prev(&self, id: EdgeId) -> EdgeId {
        let n = self.edges.len();
        EdgeId((id.0 + n - 1) % n)
    }

    /// Tags in edge order.
    pub fn tags(&self) -> Vec<Option<FeatureClass>> {
        self.edges.iter().map(|e| e.tag).collect()
    }

    /// Reset every tag to `None`.
    pub fn clear_tags(&mut self) {
        for e in &mut self.edges {
            e.tag = None;
        }
    }

    /// Same boundary with traversal starting at edge `k`.
    pub fn rotated(&self, k: usize) -> Self {
        let mut edges = self.edges.clone();
        let n = edges.len();
        edges.rotate_left(k % n);
        Self { edges }
    }
}
