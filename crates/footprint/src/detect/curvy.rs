//! Curvy runs: four or more short, gently turning edges in a row.

use crate::attributes::EdgeAttrs;
use crate::cfg::FeatureCfg;
use crate::scan::{scan, Element, Pattern};
use crate::symbols::{encode_curvy, is_low_angle, render, Symbol};

use super::types::{FeatureClass, FeatureSpan};

/// Shortest run of `C` edges reported as curvy.
pub const MIN_CURVY_RUN: usize = 4;

const CURVY: &[Symbol] = &[Symbol::Curvy];

/// `C{4,}`
pub const CURVY_RUN: Pattern = Pattern {
    alternatives: &[&[Element::at_least(CURVY, MIN_CURVY_RUN)]],
};

/// Length cutoff for curvy edges, or `None` if no edge is low-angle.
///
/// This is the mean *signed* `sin_start` of the low-angle edges scaled by
/// `curvy_length_factor`. Footprints traversed clockwise get a negative
/// cutoff and therefore never produce curvy runs.
pub fn curvy_length_thresh(attrs: &[EdgeAttrs], low_angle: &[bool], cfg: &FeatureCfg) -> Option<f64> {
    let (sum, count) = attrs
        .iter()
        .zip(low_angle)
        .filter(|(_, low)| **low)
        .fold((0.0, 0usize), |(s, c), (a, _)| (s + a.sin_start, c + 1));
    if count == 0 {
        return None;
    }
    Some(sum / count as f64 * cfg.curvy_length_factor)
}

/// Curvy spans; `None` when no edge is low-angle.
pub fn detect_curvy(attrs: &[EdgeAttrs], cfg: &FeatureCfg) -> Option<Vec<FeatureSpan>> {
    let low_angle: Vec<bool> = attrs.iter().map(|a| is_low_angle(a, cfg)).collect();
    let thresh = curvy_length_thresh(attrs, &low_angle, cfg)?;
    let symbols = encode_curvy(attrs, &low_angle, thresh);
    tracing::trace!(symbols = %render(&symbols), thresh, "curvy_symbols");
    let n = attrs.len();
    Some(
        scan(&CURVY_RUN, &symbols)
            .iter()
            .map(|m| m.to_span(n, FeatureClass::Curvy))
            .collect(),
    )
}
