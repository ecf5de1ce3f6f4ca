use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::{BracketViolation, TaxBracket};

/// Ordered brackets for one tax year, lowest `min` first.
///
/// Ordering and non-overlap are the provider's responsibility; nothing here
/// sorts or de-duplicates. An empty schedule is a valid value but cannot be
/// used for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketSchedule(Vec<TaxBracket>);

impl BracketSchedule {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }

    /// Returns the first bracket that breaks its invariant, with its position.
    pub fn first_violation(&self) -> Option<(usize, BracketViolation)> {
        self.0
            .iter()
            .enumerate()
            .find_map(|(index, bracket)| bracket.validate().err().map(|v| (index, v)))
    }

    pub fn into_inner(self) -> Vec<TaxBracket> {
        self.0
    }
}

impl Deref for BracketSchedule {
    type Target = [TaxBracket];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<TaxBracket>> for BracketSchedule {
    fn from(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }
}

impl FromIterator<TaxBracket> for BracketSchedule {
    fn from_iter<I: IntoIterator<Item = TaxBracket>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
