//! Rectangular and triangular bumps.
//!
//! Four passes run in a fixed order over the small-feature alphabet. After
//! each pass its matches are masked with the pass digit, so a lower-priority
//! pass never claims edges an earlier pass already matched.

use crate::attributes::EdgeAttrs;
use crate::cfg::FeatureCfg;
use crate::scan::{mask, scan, Element, Pattern};
use crate::symbols::{encode_small, render, Symbol};

use super::types::{FeatureClass, FeatureSpan};

const RIGHT_LEFT: &[Symbol] = &[Symbol::RightLeft];
const LEFT_RIGHT: &[Symbol] = &[Symbol::LeftRight];
const SHORT_LEFT: &[Symbol] = &[Symbol::ShortLeft];
const LEFT_EDGE: &[Symbol] = &[Symbol::LongLeft, Symbol::ShortLeft];
const RIGHT_EDGE: &[Symbol] = &[Symbol::LongRight, Symbol::ShortRight];
const CONVEX_TAIL: &[Symbol] = &[Symbol::RightLeft, Symbol::LeftRight, Symbol::ShortLeft];
const CONCAVE_TAIL: &[Symbol] = &[Symbol::RightLeft, Symbol::LeftRight, Symbol::ShortRight];

/// One detection pass: pattern, emitted class, and mask digit.
#[derive(Clone, Copy, Debug)]
pub struct Pass {
    pub name: &'static str,
    pub pattern: Pattern,
    pub class: FeatureClass,
    pub mask: u8,
}

/// Passes in priority order.
pub const PASSES: [Pass; 4] = [
    // >[Ll]<
    Pass {
        name: "convex_rectangular",
        pattern: Pattern {
            alternatives: &[&[
                Element::one(RIGHT_LEFT),
                Element::one(LEFT_EDGE),
                Element::one(LEFT_RIGHT),
            ]],
        },
        class: FeatureClass::Rectangular,
        mask: 1,
    },
    // >[><l]+ | l<   (l< is what remains of a rectangle whose '>' was claimed)
    Pass {
        name: "convex_triangular",
        pattern: Pattern {
            alternatives: &[
                &[Element::one(RIGHT_LEFT), Element::at_least(CONVEX_TAIL, 1)],
                &[Element::one(SHORT_LEFT), Element::one(LEFT_RIGHT)],
            ],
        },
        class: FeatureClass::Triangular,
        mask: 2,
    },
    // <[Rr]>
    Pass {
        name: "concave_rectangular",
        pattern: Pattern {
            alternatives: &[&[
                Element::one(LEFT_RIGHT),
                Element::one(RIGHT_EDGE),
                Element::one(RIGHT_LEFT),
            ]],
        },
        class: FeatureClass::Rectangular,
        mask: 3,
    },
    // <[><r]+
    Pass {
        name: "concave_triangular",
        pattern: Pattern {
            alternatives: &[&[Element::one(LEFT_RIGHT), Element::at_least(CONCAVE_TAIL, 1)]],
        },
        class: FeatureClass::Triangular,
        mask: 4,
    },
];

/// Edge counts `(n_long, n_short)` split at `length_thresh`.
pub fn length_counts(attrs: &[EdgeAttrs], cfg: &FeatureCfg) -> (usize, usize) {
    let n_long = attrs
        .iter()
        .filter(|a| a.length >= cfg.length_thresh)
        .count();
    (n_long, attrs.len() - n_long)
}

/// Whether the small-feature passes are worth running.
///
/// Mostly-long footprints with one or two short edges would otherwise light
/// up on every stray vertex.
pub fn small_feature_gate(attrs: &[EdgeAttrs], cfg: &FeatureCfg) -> bool {
    let (n_long, n_short) = length_counts(attrs, cfg);
    (n_long > 0 && n_short > 2) || n_short > 5
}

/// Run the four passes on pre-encoded symbols, masking in place.
pub fn match_passes(symbols: &mut [Symbol]) -> Vec<FeatureSpan> {
    let n = symbols.len();
    let mut spans = Vec::new();
    for pass in &PASSES {
        let matches = scan(&pass.pattern, symbols);
        tracing::trace!(pass = pass.name, matches = matches.len(), "small_pass");
        spans.extend(matches.iter().map(|m| m.to_span(n, pass.class)));
        mask(symbols, &matches, pass.mask);
    }
    spans
}

/// Small-feature spans in pass order; `None` when nothing matched.
///
/// Does not check `small_feature_gate`; callers decide whether to run it.
pub fn detect_small_features(attrs: &[EdgeAttrs], cfg: &FeatureCfg) -> Option<Vec<FeatureSpan>> {
    let mut symbols = encode_small(attrs, cfg);
    tracing::trace!(symbols = %render(&symbols), "small_symbols");
    let spans = match_passes(&mut symbols);
    tracing::trace!(masked = %render(&symbols), "small_masked");
    (!spans.is_empty()).then_some(spans)
}
