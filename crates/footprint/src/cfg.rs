//! Detection thresholds.
//!
//! Policy
//! - Defaults are the reference constants tuned for OSM building footprints
//!   (metres). The surrounding system may override them once at startup.
//! - Angle thresholds are stored as sines, since every comparison is against
//!   a turning sine.

use std::fmt;

/// Default low-angle bound: sin(5°).
pub const SIN_LO_DEG: f64 = 5.0;
/// Default medium-angle bound: sin(30°).
pub const SIN_ME_DEG: f64 = 30.0;
/// Default sharp-angle bound: sin(70°).
pub const SIN_HI_DEG: f64 = 70.0;
/// Default split between short and long edges.
pub const LENGTH_THRESH: f64 = 3.0;
/// Default scale for the curvy length cutoff.
pub const CURVY_LENGTH_FACTOR: f64 = 5.0;

/// Threshold set shared by both detectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureCfg {
    /// Lower bound of the low-angle band (exclusive).
    pub sin_lo: f64,
    /// Upper bound of the low-angle band; medium turn for short edges.
    pub sin_me: f64,
    /// Sharp turn for long edges.
    pub sin_hi: f64,
    /// Edges with `length >= length_thresh` are long.
    pub length_thresh: f64,
    pub curvy_length_factor: f64,
}

impl Default for FeatureCfg {
    fn default() -> Self {
        Self::from_degrees(
            SIN_LO_DEG,
            SIN_ME_DEG,
            SIN_HI_DEG,
            LENGTH_THRESH,
            CURVY_LENGTH_FACTOR,
        )
    }
}

impl FeatureCfg {
    /// Build from turn angles in degrees.
    pub fn from_degrees(
        lo_deg: f64,
        me_deg: f64,
        hi_deg: f64,
        length_thresh: f64,
        curvy_length_factor: f64,
    ) -> Self {
        Self {
            sin_lo: lo_deg.to_radians().sin().abs(),
            sin_me: me_deg.to_radians().sin().abs(),
            sin_hi: hi_deg.to_radians().sin().abs(),
            length_thresh,
            curvy_length_factor,
        }
    }

    /// Check ordering and positivity of all thresholds.
    pub fn validate(&self) -> Result<(), CfgError> {
        let all = [
            self.sin_lo,
            self.sin_me,
            self.sin_hi,
            self.length_thresh,
            self.curvy_length_factor,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(CfgError::invalid("thresholds must be finite"));
        }
        if !(0.0 < self.sin_lo && self.sin_lo < self.sin_me && self.sin_me < self.sin_hi) {
            return Err(CfgError::invalid(format!(
                "need 0 < sin_lo < sin_me < sin_hi, got {} / {} / {}",
                self.sin_lo, self.sin_me, self.sin_hi
            )));
        }
        if self.sin_hi > 1.0 {
            return Err(CfgError::invalid("sin_hi must not exceed 1"));
        }
        if self.length_thresh <= 0.0 {
            return Err(CfgError::invalid("length_thresh must be positive"));
        }
        if self.curvy_length_factor <= 0.0 {
            return Err(CfgError::invalid("curvy_length_factor must be positive"));
        }
        Ok(())
    }
}

/// Rejected threshold set.
#[derive(Debug, Clone, PartialEq)]
pub enum CfgError {
    Invalid { reason: String },
}

impl CfgError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { reason } => write!(f, "invalid feature config: {reason}"),
        }
    }
}

impl std::error::Error for CfgError {}
