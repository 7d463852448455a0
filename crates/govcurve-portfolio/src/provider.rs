//! The read-only data-provider boundary.

use std::collections::HashMap;

use govcurve_core::{PriceQuote, SecurityMaster};

/// Read-only access to the external store's security and price records.
///
/// The analytics core never writes through this trait and never assumes
/// anything about the backing schema beyond the record shapes.
pub trait MarketDataProvider {
    /// Looks up the security master record for a CUSIP.
    fn security(&self, cusip: &str) -> Option<&SecurityMaster>;

    /// Looks up the latest price quote for a CUSIP.
    fn price(&self, cusip: &str) -> Option<&PriceQuote>;

    /// Enumerates every security in the store.
    fn securities(&self) -> Vec<&SecurityMaster>;
}

/// An in-memory provider for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    securities: HashMap<String, SecurityMaster>,
    prices: HashMap<String, PriceQuote>,
}

impl InMemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a security master record, keyed by its CUSIP.
    pub fn add_security(&mut self, security: SecurityMaster) {
        self.securities.insert(security.cusip.clone(), security);
    }

    /// Adds a price quote, keyed by its CUSIP.
    pub fn add_price(&mut self, price: PriceQuote) {
        self.prices.insert(price.cusip.clone(), price);
    }

    /// Builder-style variant of [`InMemoryProvider::add_security`].
    #[must_use]
    pub fn with_security(mut self, security: SecurityMaster) -> Self {
        self.add_security(security);
        self
    }

    /// Builder-style variant of [`InMemoryProvider::add_price`].
    #[must_use]
    pub fn with_price(mut self, price: PriceQuote) -> Self {
        self.add_price(price);
        self
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn security(&self, cusip: &str) -> Option<&SecurityMaster> {
        self.securities.get(cusip)
    }

    fn price(&self, cusip: &str) -> Option<&PriceQuote> {
        self.prices.get(cusip)
    }

    fn securities(&self) -> Vec<&SecurityMaster> {
        let mut all: Vec<&SecurityMaster> = self.securities.values().collect();
        // Deterministic iteration order regardless of hash seeding.
        all.sort_by(|a, b| a.cusip.cmp(&b.cusip));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govcurve_core::Date;

    fn security(cusip: &str) -> SecurityMaster {
        SecurityMaster {
            cusip: cusip.to_string(),
            security_type: "Note".to_string(),
            term: None,
            issue_date: None,
            maturity_date: Date::from_ymd(2030, 1, 15).unwrap(),
            coupon_rate: Some(4.0),
            dated_date: None,
            first_coupon_date: None,
            frequency_text: Some("Semi-Annual".to_string()),
        }
    }

    #[test]
    fn test_lookup() {
        let provider = InMemoryProvider::new().with_security(security("AAA"));
        assert!(provider.security("AAA").is_some());
        assert!(provider.security("BBB").is_none());
        assert!(provider.price("AAA").is_none());
    }

    #[test]
    fn test_securities_sorted() {
        let provider = InMemoryProvider::new()
            .with_security(security("ZZZ"))
            .with_security(security("AAA"))
            .with_security(security("MMM"));

        let cusips: Vec<&str> = provider
            .securities()
            .iter()
            .map(|s| s.cusip.as_str())
            .collect();
        assert_eq!(cusips, vec!["AAA", "MMM", "ZZZ"]);
    }
}
