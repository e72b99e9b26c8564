//! Circular pattern scanning over symbol sequences.
//!
//! A `Pattern` is a short list of alternatives, each a sequence of greedy
//! `Element`s. Alternatives are tried in order at a position and the first
//! one that matches wins; matches within a scan are leftmost and
//! non-overlapping.
//!
//! Wraparound
//! - The sequence is read as a ring. Scanning starts right after a *barrier*,
//!   a symbol no element of the pattern accepts. Barriers split the ring into
//!   independent linear segments, so every match is found exactly once at its
//!   true start, whatever edge the polygon traversal began with.
//! - Without a barrier, a pattern that can read the whole ring from some
//!   start yields one whole-ring match. Otherwise the scan starts at the
//!   least rotation of the ring, which moves with the symbols.
//! - A match never covers more than N symbols.
//!
//! Greedy elements never backtrack. This is exact as long as a variable
//! repetition is the last element of its alternative, which holds for every
//! pattern in `detect`.

use crate::detect::{FeatureClass, FeatureSpan};
use crate::polygon::EdgeId;
use crate::symbols::Symbol;

/// A symbol class repeated between `min` and `max` times (greedy).
#[derive(Clone, Copy, Debug)]
pub struct Element {
    pub class: &'static [Symbol],
    pub min: usize,
    pub max: Option<usize>,
}

impl Element {
    /// Exactly one symbol of `class`.
    pub const fn one(class: &'static [Symbol]) -> Self {
        Self {
            class,
            min: 1,
            max: Some(1),
        }
    }

    /// `min` or more symbols of `class`.
    pub const fn at_least(class: &'static [Symbol], min: usize) -> Self {
        Self {
            class,
            min,
            max: None,
        }
    }

    #[inline]
    fn accepts(&self, s: Symbol) -> bool {
        self.class.contains(&s)
    }
}

/// Ordered alternatives; each alternative is a sequence of elements.
#[derive(Clone, Copy, Debug)]
pub struct Pattern {
    pub alternatives: &'static [&'static [Element]],
}

impl Pattern {
    /// True if some element of some alternative accepts `s`.
    pub fn can_contain(&self, s: Symbol) -> bool {
        self.alternatives
            .iter()
            .any(|alt| alt.iter().any(|el| el.accepts(s)))
    }
}

/// Match on the ring: `len` symbols starting at index `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub len: usize,
}

impl Match {
    /// Ring indices covered, in traversal order.
    pub fn indices(&self, n: usize) -> impl Iterator<Item = usize> {
        let start = self.start;
        (0..self.len.min(n)).map(move |k| (start + k) % n)
    }

    /// Span with inclusive end.
    ///
    /// A match covering the ring becomes the whole-polygon span `0..=0`,
    /// whichever index it was found at.
    pub fn to_span(&self, n: usize, class: FeatureClass) -> FeatureSpan {
        let (start, end) = if self.len >= n {
            (0, 0)
        } else {
            (self.start, (self.start + self.len - 1) % n)
        };
        FeatureSpan {
            start: EdgeId(start),
            end: EdgeId(end),
            class,
        }
    }
}

/// Try one alternative at ring index `start`; returns the match length.
fn match_alternative(
    alt: &[Element],
    symbols: &[Symbol],
    consumed: &[bool],
    start: usize,
) -> Option<usize> {
    let n = symbols.len();
    let mut pos = 0;
    for el in alt {
        let mut count = 0;
        while el.max.map_or(true, |m| count < m) && pos < n {
            let idx = (start + pos) % n;
            if consumed[idx] || !el.accepts(symbols[idx]) {
                break;
            }
            count += 1;
            pos += 1;
        }
        if count < el.min {
            return None;
        }
    }
    (pos > 0).then_some(pos)
}

fn match_at(pattern: &Pattern, symbols: &[Symbol], consumed: &[bool], start: usize) -> Option<usize> {
    pattern
        .alternatives
        .iter()
        .find_map(|alt| match_alternative(alt, symbols, consumed, start))
}

/// All matches of `pattern` on the ring, sorted by start index.
pub fn scan(pattern: &Pattern, symbols: &[Symbol]) -> Vec<Match> {
    let n = symbols.len();
    if n == 0 {
        return Vec::new();
    }
    let mut consumed = vec![false; n];
    let anchor = match symbols.iter().position(|&s| !pattern.can_contain(s)) {
        Some(barrier) => barrier,
        None => {
            if let Some(start) =
                (0..n).find(|&i| match_at(pattern, symbols, &consumed, i) == Some(n))
            {
                return vec![Match { start, len: n }];
            }
            least_rotation(symbols)
        }
    };
    let mut out = Vec::new();
    let mut p = anchor;
    while p < anchor + n {
        let idx = p % n;
        if !consumed[idx] {
            if let Some(len) = match_at(pattern, symbols, &consumed, idx) {
                let m = Match { start: idx, len };
                for k in m.indices(n) {
                    consumed[k] = true;
                }
                out.push(m);
                p += len;
                continue;
            }
        }
        p += 1;
    }
    out.sort_by_key(|m| m.start);
    out
}

/// Start index of the lexicographically least rotation (first one on ties).
fn least_rotation(symbols: &[Symbol]) -> usize {
    let n = symbols.len();
    let rot = |i: usize| (0..n).map(move |k| symbols[(i + k) % n]);
    (0..n).min_by(|&a, &b| rot(a).cmp(rot(b))).unwrap_or(0)
}

/// Overwrite every matched symbol with `Masked(digit)`.
pub fn mask(symbols: &mut [Symbol], matches: &[Match], digit: u8) {
    let n = symbols.len();
    for m in matches {
        for k in m.indices(n) {
            symbols[k] = Symbol::Masked(digit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::parse;

    const CURVY: &[Symbol] = &[Symbol::Curvy];
    const RUN: Pattern = Pattern {
        alternatives: &[&[Element::at_least(CURVY, 4)]],
    };

    fn run(s: &str) -> Vec<Match> {
        scan(&RUN, &parse(s).unwrap())
    }

    #[test]
    fn finds_maximal_linear_runs() {
        assert!(run("0CCC0000").is_empty());
        assert_eq!(run("0CCCC000"), vec![Match { start: 1, len: 4 }]);
        assert_eq!(
            run("CCCCC0CCCC0"),
            vec![Match { start: 0, len: 5 }, Match { start: 6, len: 4 }]
        );
    }

    #[test]
    fn run_across_wraparound_is_reported_once() {
        let ms = run("CC0000CC");
        assert_eq!(ms, vec![Match { start: 6, len: 4 }]);
        let span = ms[0].to_span(8, FeatureClass::Curvy);
        assert_eq!((span.start, span.end), (EdgeId(6), EdgeId(1)));
    }

    #[test]
    fn full_ring_is_one_whole_match() {
        let ms = run("CCCCCC");
        assert_eq!(ms, vec![Match { start: 0, len: 6 }]);
        let span = ms[0].to_span(6, FeatureClass::Curvy);
        assert_eq!(span.start, span.end);
    }

    #[test]
    fn whole_ring_span_ignores_where_it_was_found() {
        let m = Match { start: 4, len: 6 };
        let span = m.to_span(6, FeatureClass::Curvy);
        assert_eq!((span.start, span.end), (EdgeId(0), EdgeId(0)));
    }

    #[test]
    fn unbounded_tail_without_barrier_reads_the_whole_ring() {
        const OPEN: &[Symbol] = &[Symbol::RightLeft];
        const TAIL: &[Symbol] = &[Symbol::RightLeft, Symbol::LeftRight, Symbol::ShortLeft];
        const P: Pattern = Pattern {
            alternatives: &[
                &[Element::one(OPEN), Element::at_least(TAIL, 1)],
                &[Element::one(&[Symbol::ShortLeft]), Element::one(&[Symbol::LeftRight])],
            ],
        };
        let ring = parse("ll<><>").unwrap();
        for k in 0..ring.len() {
            let mut rot = ring.clone();
            rot.rotate_left(k);
            let ms = scan(&P, &rot);
            assert_eq!(ms.len(), 1, "rotation {k}");
            assert_eq!(ms[0].len, 6);
        }
    }

    #[test]
    fn least_rotation_moves_with_the_ring() {
        let ring = parse("l<rl<").unwrap();
        let base = least_rotation(&ring);
        for k in 0..ring.len() {
            let mut rot = ring.clone();
            rot.rotate_left(k);
            assert_eq!((least_rotation(&rot) + k) % ring.len(), base);
        }
    }

    #[test]
    fn first_alternative_wins_at_a_position() {
        const A: &[Symbol] = &[Symbol::ShortLeft];
        const B: &[Symbol] = &[Symbol::LeftRight];
        const P: Pattern = Pattern {
            alternatives: &[&[Element::one(A)], &[Element::one(A), Element::one(B)]],
        };
        let ms = scan(&P, &parse("Ol<O").unwrap());
        assert_eq!(ms, vec![Match { start: 1, len: 1 }]);
    }

    #[test]
    fn mask_overwrites_across_wraparound() {
        let mut syms = parse("CC0000CC").unwrap();
        let ms = scan(&RUN, &syms);
        mask(&mut syms, &ms, 9);
        assert_eq!(crate::symbols::render(&syms), "99000099");
    }
}
