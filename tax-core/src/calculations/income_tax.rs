//! Progressive income tax using marginal-rate bands.
//!
//! Income is split across the brackets of a [`BracketSchedule`]; each slice is
//! taxed at its bracket's rate and the slices are summed.
//!
//! # Example
//!
//! ```
//! use tax_core::calculations::compute_tax_breakdown;
//! use tax_core::{BracketSchedule, TaxBracket};
//!
//! let schedule = BracketSchedule::new(vec![
//!     TaxBracket::bounded(0.0, 50197.0, 0.15),
//!     TaxBracket::bounded(50197.0, 100392.0, 0.205),
//!     TaxBracket::bounded(100392.0, 155625.0, 0.26),
//!     TaxBracket::bounded(155625.0, 221708.0, 0.29),
//!     TaxBracket::unbounded(221708.0, 0.33),
//! ]);
//!
//! let result = compute_tax_breakdown(100000.0, &schedule).unwrap();
//!
//! assert_eq!(result.total_tax, 17739.17);
//! assert_eq!(result.effective_rate, 17.74);
//! assert_eq!(result.taxes_per_band.len(), 2);
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::models::{BandResult, BracketSchedule, BracketViolation, TaxCalculationResult};
use crate::provider::{FetchError, TaxBracketFetcher};

/// Errors that end an income tax calculation. None of them are retried.
#[derive(Debug, Error, PartialEq)]
pub enum IncomeTaxError {
    /// Income was negative, NaN or infinite.
    #[error("income must be a finite, non-negative amount, got {0}")]
    InvalidInput(f64),

    /// The schedule had no brackets.
    #[error("tax data has no brackets defined")]
    NoBracketData,

    /// A bracket broke its invariant; nothing was calculated.
    #[error("invalid tax bracket data at position {index}: {violation}")]
    InvalidBracketData {
        index: usize,
        violation: BracketViolation,
    },

    /// The bracket provider failed.
    #[error("failed to fetch tax brackets for tax year {year}: {source}")]
    FetchFailure {
        year: i32,
        #[source]
        source: FetchError,
    },
}

/// Computes income tax for a tax year using brackets from a fetcher.
///
/// Holds no state besides the fetcher, so one instance can be shared by any
/// number of concurrent callers.
#[derive(Clone)]
pub struct IncomeTaxCalculator {
    fetcher: Arc<dyn TaxBracketFetcher>,
}

impl IncomeTaxCalculator {
    pub fn new(fetcher: Arc<dyn TaxBracketFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches the schedule for `year` and bands `income` across it.
    ///
    /// Income is validated before the provider is called.
    ///
    /// # Errors
    ///
    /// * [`IncomeTaxError::InvalidInput`] if `income` is negative or not finite.
    /// * [`IncomeTaxError::FetchFailure`] if the provider fails.
    /// * [`IncomeTaxError::NoBracketData`] / [`IncomeTaxError::InvalidBracketData`]
    ///   if the fetched schedule is unusable.
    pub async fn calculate_income_tax(
        &self,
        income: f64,
        year: i32,
    ) -> Result<TaxCalculationResult, IncomeTaxError> {
        validate_income(income)?;

        let schedule = self
            .fetcher
            .fetch_tax_brackets(year)
            .await
            .map_err(|source| IncomeTaxError::FetchFailure { year, source })?;

        debug!(year, brackets = schedule.len(), "fetched tax brackets");

        compute_tax_breakdown(income, &schedule)
    }
}

impl std::fmt::Debug for IncomeTaxCalculator {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("IncomeTaxCalculator").finish_non_exhaustive()
    }
}

/// Bands `income` across `schedule` and totals the tax.
///
/// Brackets are walked in the order given. A bracket only produces a band when
/// income reaches past its `min`; iteration stops at the first bracket whose
/// stated `max` income does not reach.
///
/// # Errors
///
/// Fails fast on invalid income, an empty schedule or any malformed bracket.
pub fn compute_tax_breakdown(
    income: f64,
    schedule: &BracketSchedule,
) -> Result<TaxCalculationResult, IncomeTaxError> {
    validate_income(income)?;

    if schedule.is_empty() {
        return Err(IncomeTaxError::NoBracketData);
    }
    if let Some((index, violation)) = schedule.first_violation() {
        return Err(IncomeTaxError::InvalidBracketData { index, violation });
    }

    let last = schedule.len() - 1;
    let mut total_tax = 0.0;
    let mut taxes_per_band = Vec::new();

    for (i, bracket) in schedule.iter().enumerate() {
        let band_ceiling = match bracket.max {
            Some(max) if i != last && income >= max => max,
            _ => income,
        };

        if income > bracket.min {
            let taxable_income = band_ceiling - bracket.min;
            if taxable_income < 0.0 {
                warn!(
                    index = i,
                    min = bracket.min,
                    band_ceiling,
                    "bracket min exceeds band ceiling; skipping band"
                );
                continue;
            }

            let tax_amount = round_half_up(taxable_income * bracket.rate);
            // Rounding an already rounded amount is a no-op.
            total_tax += round_half_up(round_half_up(tax_amount));

            debug!(index = i, taxable_income, tax_amount, "taxed band");
            taxes_per_band.push(BandResult::new(bracket, taxable_income, tax_amount));
        }

        if bracket.is_above(income) {
            break;
        }
    }

    let total_tax = round_half_up(total_tax);
    let effective_rate = if income > 0.0 {
        round_half_up(total_tax / income * 100.0)
    } else {
        0.0
    };

    Ok(TaxCalculationResult {
        total_tax,
        taxes_per_band,
        effective_rate,
    })
}

fn validate_income(income: f64) -> Result<(), IncomeTaxError> {
    if !income.is_finite() || income < 0.0 {
        return Err(IncomeTaxError::InvalidInput(income));
    }
    Ok(())
}
