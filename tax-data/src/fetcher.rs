use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use tax_core::{BracketSchedule, FetchError, TaxBracketFetcher};
use tracing::debug;

use crate::loader::{TaxBracketLoader, TaxBracketLoaderError};

/// Serves bracket schedules loaded once from CSV.
///
/// Useful when the remote provider is unavailable, and as a deterministic
/// provider for local runs.
#[derive(Debug, Clone)]
pub struct CsvTaxBracketFetcher {
    schedules: BTreeMap<i32, BracketSchedule>,
}

impl CsvTaxBracketFetcher {
    /// Parse every schedule from `reader`.
    ///
    /// # Errors
    /// [`TaxBracketLoaderError::CsvParse`] on malformed rows and
    /// [`TaxBracketLoaderError::Empty`] when no rows are present.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TaxBracketLoaderError> {
        let records = TaxBracketLoader::parse(reader)?;
        let schedules = TaxBracketLoader::group(&records);
        if schedules.is_empty() {
            return Err(TaxBracketLoaderError::Empty);
        }
        Ok(Self { schedules })
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxBracketLoaderError> {
        let file = File::open(path).map_err(|e| TaxBracketLoaderError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(file)
    }

    /// Tax years available, ascending.
    pub fn tax_years(&self) -> Vec<i32> {
        self.schedules.keys().copied().collect()
    }
}

#[async_trait]
impl TaxBracketFetcher for CsvTaxBracketFetcher {
    async fn fetch_tax_brackets(
        &self,
        year: i32,
    ) -> Result<BracketSchedule, FetchError> {
        debug!(year, "looking up tax brackets in csv data");
        self.schedules
            .get(&year)
            .filter(|schedule| !schedule.is_empty())
            .cloned()
            .ok_or(FetchError::NoBrackets(year))
    }
}
