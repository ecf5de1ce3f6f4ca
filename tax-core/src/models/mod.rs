mod bracket_schedule;
mod tax_bracket;
mod tax_calculation;

pub use bracket_schedule::BracketSchedule;
pub use tax_bracket::{BracketViolation, TaxBracket};
pub use tax_calculation::{BandResult, TaxCalculationResult};
