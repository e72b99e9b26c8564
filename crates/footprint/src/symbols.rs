//! Edge alphabets.
//!
//! Curvy detector: `C` (short, gently turning) or `0`.
//!
//! Small-feature detector, long edges (`length >= length_thresh`):
//! - `L`: sharp left at both ends
//! - `R`: sharp right at both ends
//! - `O`: other long edge
//!
//! Short edges:
//! - `l`: medium left at both ends
//! - `r`: medium right at both ends
//! - `>`: medium right at the start, medium left at the end
//! - `<`: medium left at the start, medium right at the end
//! - `o`: other short edge
//!
//! `1`..`4` are placeholders written over matches by the small-feature passes.

use std::fmt;

use crate::attributes::EdgeAttrs;
use crate::cfg::FeatureCfg;

/// Edge symbol. The derived order is only used to pick a canonical rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Curvy,
    Plain,
    LongLeft,
    LongRight,
    Long,
    ShortLeft,
    ShortRight,
    RightLeft,
    LeftRight,
    Short,
    Masked(u8),
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::Curvy => 'C',
            Symbol::Plain => '0',
            Symbol::LongLeft => 'L',
            Symbol::LongRight => 'R',
            Symbol::Long => 'O',
            Symbol::ShortLeft => 'l',
            Symbol::ShortRight => 'r',
            Symbol::RightLeft => '>',
            Symbol::LeftRight => '<',
            Symbol::Short => 'o',
            Symbol::Masked(d) => char::from(b'0' + d),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'C' => Symbol::Curvy,
            '0' => Symbol::Plain,
            'L' => Symbol::LongLeft,
            'R' => Symbol::LongRight,
            'O' => Symbol::Long,
            'l' => Symbol::ShortLeft,
            'r' => Symbol::ShortRight,
            '>' => Symbol::RightLeft,
            '<' => Symbol::LeftRight,
            'o' => Symbol::Short,
            '1'..='9' => Symbol::Masked(c as u8 - b'0'),
            _ => return None,
        })
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse a symbol string such as `"O>l<OOOO"`.
pub fn parse(s: &str) -> Option<Vec<Symbol>> {
    s.chars().map(Symbol::from_char).collect()
}

/// Render a symbol sequence back to its string form.
pub fn render(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

#[inline]
fn in_low_band(sine: f64, cfg: &FeatureCfg) -> bool {
    let a = sine.abs();
    a > cfg.sin_lo && a < cfg.sin_me
}

/// Edge turns gently (strictly inside the low band) at either end.
#[inline]
pub fn is_low_angle(a: &EdgeAttrs, cfg: &FeatureCfg) -> bool {
    in_low_band(a.sin_start, cfg) || in_low_band(a.sin_end, cfg)
}

/// `C` for low-angle edges shorter than `length_thresh`, else `0`.
pub fn encode_curvy(attrs: &[EdgeAttrs], low_angle: &[bool], length_thresh: f64) -> Vec<Symbol> {
    attrs
        .iter()
        .zip(low_angle)
        .map(|(a, &low)| {
            if low && a.length < length_thresh {
                Symbol::Curvy
            } else {
                Symbol::Plain
            }
        })
        .collect()
}

/// Small-feature symbol of one edge; rows are tried top to bottom.
pub fn small_symbol(a: &EdgeAttrs, cfg: &FeatureCfg) -> Symbol {
    let (s, e) = (a.sin_start, a.sin_end);
    if a.length >= cfg.length_thresh {
        let hi = cfg.sin_hi;
        if s > hi && e > hi {
            Symbol::LongLeft
        } else if s < -hi && e < -hi {
            Symbol::LongRight
        } else {
            Symbol::Long
        }
    } else {
        let me = cfg.sin_me;
        if s > me && e > me {
            Symbol::ShortLeft
        } else if s < -me && e < -me {
            Symbol::ShortRight
        } else if s < -me && e > me {
            Symbol::RightLeft
        } else if s > me && e < -me {
            Symbol::LeftRight
        } else {
            Symbol::Short
        }
    }
}

pub fn encode_small(attrs: &[EdgeAttrs], cfg: &FeatureCfg) -> Vec<Symbol> {
    attrs.iter().map(|a| small_symbol(a, cfg)).collect()
}
