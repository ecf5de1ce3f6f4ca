//! GET /v1/tax-calculator: income tax breakdown for one income and tax year.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tax_core::{BandResult, TaxCalculationResult};
use tracing::debug;

use crate::app::AppState;
use crate::error::ApiError;

/// Raw query string. Values are parsed by hand so a bad number produces our
/// own 400 body instead of axum's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TaxCalculatorQuery {
    pub income: Option<String>,
    #[serde(rename = "taxYear")]
    pub tax_year: Option<String>,
}

impl TaxCalculatorQuery {
    /// Parsed `(income, tax_year)`.
    pub fn parse(&self) -> Result<(f64, i32), ApiError> {
        let income = required(&self.income, "income")?
            .parse::<f64>()
            .map_err(|_| ApiError::InvalidParameter("income"))?;
        let tax_year = required(&self.tax_year, "taxYear")?
            .parse::<i32>()
            .map_err(|_| ApiError::InvalidParameter("tax year"))?;

        Ok((income, tax_year))
    }
}

fn required<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::MissingParameter(name)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBandCalculationResponse {
    pub band: String,
    pub taxed_at: f64,
    pub tax_amount: f64,
}

impl From<BandResult> for TaxBandCalculationResponse {
    fn from(band: BandResult) -> Self {
        Self {
            band: band.band,
            taxed_at: band.taxed_at,
            tax_amount: band.tax_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxCalculationResponse {
    pub total_tax: f64,
    pub taxes_per_band: Vec<TaxBandCalculationResponse>,
    pub effective_rate: f64,
}

impl From<TaxCalculationResult> for IncomeTaxCalculationResponse {
    fn from(result: TaxCalculationResult) -> Self {
        Self {
            total_tax: result.total_tax,
            taxes_per_band: result.taxes_per_band.into_iter().map(Into::into).collect(),
            effective_rate: result.effective_rate,
        }
    }
}

pub async fn calculate_income_tax(
    State(state): State<AppState>,
    Query(query): Query<TaxCalculatorQuery>,
) -> Result<Json<IncomeTaxCalculationResponse>, ApiError> {
    let (income, tax_year) = query.parse()?;
    debug!(income, tax_year, "calculating income tax");

    let result = state
        .calculator
        .calculate_income_tax(income, tax_year)
        .await?;

    Ok(Json(result.into()))
}
