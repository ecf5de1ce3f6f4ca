use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use tax_core::{BracketSchedule, TaxBracket};
use thiserror::Error;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read bracket file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("bracket file contains no tax years")]
    Empty,
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2022)
/// - `min`: Lower bound of the bracket
/// - `max`: Upper bound of the bracket (empty for the open top bracket)
/// - `rate`: The marginal tax rate as a fraction (e.g., 0.205 for 20.5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub min: f64,
    #[serde(deserialize_with = "deserialize_optional_amount")]
    pub max: Option<f64>,
    pub rate: f64,
}

impl From<&TaxBracketRecord> for TaxBracket {
    fn from(record: &TaxBracketRecord) -> Self {
        TaxBracket {
            min: record.min,
            max: record.max,
            rate: record.rate,
        }
    }
}

fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Reads tax bracket schedules from CSV.
///
/// Rows may appear in any order; [`TaxBracketLoader::group`] collects them by
/// tax year and orders each schedule by `min`.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse tax bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxBracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records into one schedule per tax year, each sorted by `min`.
    ///
    /// Bracket values are not validated here; the calculator rejects bad
    /// brackets when they are used.
    pub fn group(records: &[TaxBracketRecord]) -> BTreeMap<i32, BracketSchedule> {
        let mut by_year: BTreeMap<i32, Vec<TaxBracket>> = BTreeMap::new();

        for record in records {
            by_year
                .entry(record.tax_year)
                .or_default()
                .push(TaxBracket::from(record));
        }

        by_year
            .into_iter()
            .map(|(year, mut brackets)| {
                brackets.sort_by(|a, b| a.min.total_cmp(&b.min));
                (year, BracketSchedule::new(brackets))
            })
            .collect()
    }
}
