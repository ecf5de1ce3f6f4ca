use serde::{Deserialize, Serialize};

use super::TaxBracket;
use crate::calculations::common::round_half_up;

/// Tax owed on the slice of income that fell into one bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandResult {
    /// The bracket's nominal range, e.g. `"50197.00 to 100392.00"`.
    pub band: String,
    /// Marginal rate as a percentage, rounded to two decimals.
    pub taxed_at: f64,
    /// Tax for this band, rounded to two decimals.
    pub tax_amount: f64,
    /// Income taxed in this band before rounding.
    pub taxable_income: f64,
}

impl BandResult {
    pub(crate) fn new(
        bracket: &TaxBracket,
        taxable_income: f64,
        tax_amount: f64,
    ) -> Self {
        Self {
            band: band_label(bracket),
            taxed_at: round_half_up(bracket.rate * 100.0),
            tax_amount,
            taxable_income,
        }
    }
}

/// Label built from the bracket's stated bounds, never from the income cap.
fn band_label(bracket: &TaxBracket) -> String {
    match bracket.max {
        Some(max) => format!("{:.2} to {:.2}", bracket.min, max),
        None => format!("{:.2} and above", bracket.min),
    }
}

/// Per-band and total tax for one income in one tax year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub total_tax: f64,
    pub taxes_per_band: Vec<BandResult>,
    /// Total tax as a percentage of income; zero when income is zero.
    pub effective_rate: f64,
}

impl TaxCalculationResult {
    /// Sum of the income spans taxed across all bands.
    pub fn taxed_income(&self) -> f64 {
        self.taxes_per_band.iter().map(|b| b.taxable_income).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn label_uses_stated_bounds() {
        let band = BandResult::new(&TaxBracket::bounded(50197.0, 100392.0, 0.205), 10.0, 2.05);

        assert_eq!(band.band, "50197.00 to 100392.00");
    }

    #[test]
    fn label_for_open_bracket() {
        let band = BandResult::new(&TaxBracket::unbounded(221708.0, 0.33), 1.0, 0.33);

        assert_eq!(band.band, "221708.00 and above");
    }

    #[test]
    fn taxed_at_is_rounded_percentage() {
        let band = BandResult::new(&TaxBracket::bounded(0.0, 1.0, 0.205), 1.0, 0.21);

        assert_eq!(band.taxed_at, 20.5);
    }

    #[test]
    fn taxed_at_rounds_half_away_from_zero() {
        let band = BandResult::new(&TaxBracket::bounded(0.0, 1.0, 0.00125), 1.0, 0.0);

        assert_eq!(band.taxed_at, 0.13);
    }

    #[test]
    fn taxed_income_sums_band_spans() {
        let result = TaxCalculationResult {
            total_tax: 0.0,
            taxes_per_band: vec![
                BandResult::new(&TaxBracket::bounded(0.0, 100.0, 0.0), 100.0, 0.0),
                BandResult::new(&TaxBracket::unbounded(100.0, 0.0), 50.0, 0.0),
            ],
            effective_rate: 0.0,
        };

        assert_eq!(result.taxed_income(), 150.0);
    }
}
