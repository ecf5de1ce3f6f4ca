use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a single bracket is rejected before banding starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BracketViolation {
    #[error("min, max and rate must be finite numbers")]
    NonFinite,

    #[error("min must not be negative")]
    NegativeMin,

    #[error("rate must not be negative")]
    NegativeRate,

    #[error("max must not be below min")]
    MaxBelowMin,
}

/// A contiguous income range taxed at a single marginal rate.
///
/// `max` is `None` for the open-ended top bracket. On the wire the field is
/// simply omitted (or `null`), matching what bracket providers send:
///
/// ```json
/// { "min": 221708, "rate": 0.33 }
/// ```
///
/// `rate` is a fraction, so `0.205` means 20.5%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    /// Bracket bounded above by `max`.
    pub fn bounded(
        min: f64,
        max: f64,
        rate: f64,
    ) -> Self {
        Self {
            min,
            max: Some(max),
            rate,
        }
    }

    /// Top bracket with no upper bound.
    pub fn unbounded(
        min: f64,
        rate: f64,
    ) -> Self {
        Self {
            min,
            max: None,
            rate,
        }
    }

    /// Checks `min >= 0`, `rate >= 0` and `max >= min` when `max` is present.
    pub fn validate(&self) -> Result<(), BracketViolation> {
        let max_is_finite = self.max.is_none_or(f64::is_finite);
        if !self.min.is_finite() || !self.rate.is_finite() || !max_is_finite {
            return Err(BracketViolation::NonFinite);
        }
        if self.min < 0.0 {
            return Err(BracketViolation::NegativeMin);
        }
        if self.rate < 0.0 {
            return Err(BracketViolation::NegativeRate);
        }
        if self.max.is_some_and(|max| max < self.min) {
            return Err(BracketViolation::MaxBelowMin);
        }
        Ok(())
    }

    /// True when the bracket has a stated ceiling and `income` falls short of it.
    pub fn is_above(
        &self,
        income: f64,
    ) -> bool {
        self.max.is_some_and(|max| income < max)
    }
}
