//! Core domain types.

mod cashflow;
mod date;
mod frequency;
mod security;

pub use cashflow::Cashflow;
pub use date::{Date, DAYS_PER_YEAR};
pub use frequency::{ClassificationRule, Frequency, TextField, TEXT_RULES};
pub use security::{PriceQuote, SecurityMaster};
