//! Read-only record shapes supplied by the external data provider.

use serde::{Deserialize, Serialize};

use crate::types::{Date, Frequency};

/// Immutable reference data for one security.
///
/// Owned by the external data provider; the analytics core only reads it.
/// Field shapes mirror the provider's relational schema, so most fields
/// are nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityMaster {
    /// Unique security identifier (opaque string).
    pub cusip: String,
    /// Security type label, e.g. "Bill", "Note", "Bond".
    pub security_type: String,
    /// Term label, e.g. "10-Year".
    pub term: Option<String>,
    /// Auction/issue date.
    pub issue_date: Option<Date>,
    /// Maturity date.
    pub maturity_date: Date,
    /// Annual coupon rate in percent; null or zero for bills.
    pub coupon_rate: Option<f64>,
    /// Interest accrual start date.
    pub dated_date: Option<Date>,
    /// Explicit first coupon date, when the schedule has an odd first period.
    pub first_coupon_date: Option<Date>,
    /// Free-text payment-frequency descriptor, e.g. "Semi-Annual".
    pub frequency_text: Option<String>,
}

impl SecurityMaster {
    /// Classifies this security's payment frequency.
    ///
    /// See [`Frequency::classify`] for the rule table.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        Frequency::classify(
            &self.security_type,
            self.frequency_text.as_deref(),
            self.coupon_rate,
        )
    }

    /// Returns true if this security qualifies for curve calibration:
    /// coupon-bearing with a non-bill frequency classification.
    #[must_use]
    pub fn is_coupon_bearing(&self) -> bool {
        matches!(self.coupon_rate, Some(rate) if rate > 0.0) && !self.frequency().is_bill()
    }
}

/// An end-of-day price quote for one security.
///
/// Immutable per as-of date. For bills the quoted price may already be a
/// flat (dirty-equivalent) quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Security identifier the quote belongs to.
    pub cusip: String,
    /// Quote as-of date.
    pub as_of: Date,
    /// Clean price per 100 face value.
    pub clean_price: f64,
    /// Optional buy-side quote.
    pub buy_price: Option<f64>,
    /// Optional sell-side quote.
    pub sell_price: Option<f64>,
    /// Quoted rate, carried through from the provider.
    pub rate: Option<f64>,
    /// Maturity date as recorded on the price row; redundant cross-check
    /// field against the security master.
    pub maturity_date: Option<Date>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(cusip: &str, coupon: Option<f64>) -> SecurityMaster {
        SecurityMaster {
            cusip: cusip.to_string(),
            security_type: "Note".to_string(),
            term: Some("10-Year".to_string()),
            issue_date: None,
            maturity_date: Date::from_ymd(2034, 1, 15).unwrap(),
            coupon_rate: coupon,
            dated_date: Some(Date::from_ymd(2024, 1, 15).unwrap()),
            first_coupon_date: None,
            frequency_text: Some("Semi-Annual".to_string()),
        }
    }

    #[test]
    fn test_coupon_bearing() {
        assert!(note("912828A1", Some(4.0)).is_coupon_bearing());
        assert!(!note("912828A2", Some(0.0)).is_coupon_bearing());
        assert!(!note("912828A3", None).is_coupon_bearing());
    }

    #[test]
    fn test_bill_never_coupon_bearing() {
        let mut bill = note("912796B1", Some(4.0));
        bill.security_type = "Bill".to_string();
        assert!(!bill.is_coupon_bearing());
    }

    #[test]
    fn test_security_serde() {
        let sec = note("912828A1", Some(4.0));
        let json = serde_json::to_string(&sec).unwrap();
        let parsed: SecurityMaster = serde_json::from_str(&json).unwrap();
        assert_eq!(sec, parsed);
    }
}
