//! Cashflow type: a dated payment with its curve-axis time coordinate.

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// A single future payment of a security, per 100 face value.
///
/// Sequences of cashflows are ordered by date ascending and generated
/// fresh for each pricing or calibration call; a cashflow has no identity
/// beyond its parent security and the valuation date it was built against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Payment date.
    pub date: Date,
    /// Time from the valuation date, in fixed 365.25-day years.
    pub t_years: f64,
    /// Payment amount per 100 face value.
    pub amount: f64,
}

impl Cashflow {
    /// Creates a cashflow, deriving its time coordinate from the
    /// valuation date.
    #[must_use]
    pub fn new(valuation_date: Date, date: Date, amount: f64) -> Self {
        Self {
            date,
            t_years: valuation_date.year_fraction(&date),
            amount,
        }
    }
}
