//! Tax calculation modules.
//!
//! This module provides the marginal-rate banding used to turn an income and
//! a bracket schedule into a per-band breakdown.

pub mod common;
pub mod income_tax;

pub use income_tax::{IncomeTaxCalculator, IncomeTaxError, compute_tax_breakdown};
