pub mod calculations;
pub mod models;
pub mod provider;

pub use calculations::{IncomeTaxCalculator, IncomeTaxError};
pub use models::*;
pub use provider::{FetchError, TaxBracketFetcher};
