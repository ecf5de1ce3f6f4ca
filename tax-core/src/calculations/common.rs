//! Common utility functions for tax calculations.
//!
//! Amounts are binary `f64`. Rounding mirrors what bracket providers and
//! existing clients of the service expect: scale to cents, round, scale back.

/// Rounds a value to two decimal places, halves away from zero.
///
/// Applied to every band amount, every displayed rate, the accumulated total
/// and the effective rate.
///
/// # Examples
///
/// ```
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(0.123), 0.12);
/// assert_eq!(round_half_up(0.125), 0.13);
/// assert_eq!(round_half_up(-0.125), -0.13); // Away from zero
/// ```
pub fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
