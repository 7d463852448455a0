//! The analytics engine: per-call entry points over a data provider.

use log::warn;
use serde::{Deserialize, Serialize};

use govcurve_bonds::{
    analyze, price_cashflows, pricing_error, schedule_for_security, theoretical_price,
    BondAnalytics, FACE_VALUE,
};
use govcurve_core::{Cashflow, Date, PriceQuote, SecurityMaster};
use govcurve_curves::{
    BondObservation, Calibration, CalibratorConfig, CurveCalibrator, SvenssonParameters,
};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::provider::MarketDataProvider;

/// Theoretical-vs-observed pricing for one security under a fitted curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityPricing {
    /// Security identifier.
    pub cusip: String,
    /// Present value of the schedule under the fitted curve.
    pub theoretical_price: f64,
    /// Observed dirty price.
    pub dirty_price: f64,
    /// Theoretical minus dirty.
    pub pricing_error: f64,
}

/// Fit-quality summary across the portfolio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of squared pricing errors at the fitted parameters.
    pub sse: f64,
    /// Root-mean-squared pricing error.
    pub rmse: f64,
    /// Bonds that entered the calibration and repricing.
    pub bonds_used: usize,
    /// Bonds excluded because their records could not be processed.
    /// Filtering by rule (bills, zero coupons) is not counted here.
    pub skipped: usize,
}

/// Result of a full portfolio analysis: calibrate, then reprice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    /// Fitted curve parameters.
    pub curve_parameters: SvenssonParameters,
    /// Per-security repricing under the fitted curve.
    pub per_security: Vec<SecurityPricing>,
    /// Aggregate fit quality.
    pub summary: PortfolioSummary,
}

/// Result of a single-security analysis against a freshly fitted curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityAnalysis {
    /// Security identifier.
    pub cusip: String,
    /// Present value under the fitted curve.
    pub theoretical_price: f64,
    /// Observed dirty price (clean plus accrued; flat for bills).
    pub dirty_price: f64,
    /// Theoretical minus dirty.
    pub pricing_error: f64,
    /// The discounted cashflows; a single face-value flow for bills.
    pub cashflows: Vec<Cashflow>,
}

/// Per-call analytics over a [`MarketDataProvider`].
///
/// The valuation date anchors the curve time axis and calibration; the
/// settlement date drives accrued interest. Both are explicit constructor
/// state, so the engine can be exercised against arbitrary dates. Every
/// call builds its own bond universe and optimizer run; nothing is cached
/// across calls.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine<P> {
    provider: P,
    valuation_date: Date,
    settlement_date: Date,
    calibrator: CurveCalibrator,
}

impl<P: MarketDataProvider> AnalyticsEngine<P> {
    /// Creates an engine for a valuation date.
    ///
    /// Settlement defaults to the next business day after the valuation
    /// date (weekend-aware, no holiday calendar).
    #[must_use]
    pub fn new(provider: P, valuation_date: Date) -> Self {
        Self {
            provider,
            valuation_date,
            settlement_date: valuation_date.next_business_day(),
            calibrator: CurveCalibrator::new(),
        }
    }

    /// Overrides the settlement date.
    #[must_use]
    pub fn with_settlement(mut self, settlement_date: Date) -> Self {
        self.settlement_date = settlement_date;
        self
    }

    /// Overrides the calibrator configuration.
    #[must_use]
    pub fn with_calibrator_config(mut self, config: CalibratorConfig) -> Self {
        self.calibrator = CurveCalibrator::with_config(config);
        self
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the settlement date.
    #[must_use]
    pub fn settlement_date(&self) -> Date {
        self.settlement_date
    }

    /// Computes accrued interest and clean/dirty prices for one security.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFound` when either the security master
    /// row or the price row is missing.
    pub fn calculate_analytics(&self, cusip: &str) -> AnalyticsResult<BondAnalytics> {
        let (security, quote) = self.records(cusip)?;
        Ok(analyze(security, quote, self.settlement_date)?)
    }

    /// Calibrates the NSS curve over the coupon-bearing universe.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::EmptyUniverse` when no security
    /// qualifies.
    pub fn fit_curve(&self) -> AnalyticsResult<Calibration> {
        let (universe, _) = self.build_universe();
        Ok(self.calibrator.fit(&universe)?)
    }

    /// Calibrates, then reprices every bond in the universe against the
    /// fitted curve.
    ///
    /// A bond whose records cannot be processed is skipped with a warning
    /// and counted in the summary; one malformed record never aborts the
    /// batch.
    pub fn analyze_portfolio(&self) -> AnalyticsResult<PortfolioAnalysis> {
        let (universe, skipped) = self.build_universe();
        let calibration = self.calibrator.fit(&universe)?;
        let curve = calibration.parameters.model().map_err(AnalyticsError::from)?;

        let mut per_security = Vec::with_capacity(universe.len());
        let mut sse = 0.0;
        for obs in &universe {
            let theoretical = price_cashflows(&obs.cashflows, &curve);
            let error = pricing_error(theoretical, obs.dirty_price);
            sse += error * error;
            per_security.push(SecurityPricing {
                cusip: obs.cusip.clone(),
                theoretical_price: theoretical,
                dirty_price: obs.dirty_price,
                pricing_error: error,
            });
        }

        let bonds_used = per_security.len();
        let rmse = if bonds_used == 0 {
            0.0
        } else {
            (sse / bonds_used as f64).sqrt()
        };

        Ok(PortfolioAnalysis {
            curve_parameters: calibration.parameters,
            per_security,
            summary: PortfolioSummary {
                sse,
                rmse,
                bonds_used,
                skipped,
            },
        })
    }

    /// Calibrates, then prices one security against the fitted curve.
    ///
    /// Bills are priced as a single face-value cashflow at maturity;
    /// coupon securities discount their generated schedule.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFound` for missing records and
    /// `AnalyticsError::EmptyUniverse` when no curve can be fitted.
    pub fn analyze_security(&self, cusip: &str) -> AnalyticsResult<SecurityAnalysis> {
        let (security, quote) = self.records(cusip)?;
        let analytics = analyze(security, quote, self.settlement_date)?;

        let calibration = self.fit_curve()?;
        let curve = calibration.parameters.model().map_err(AnalyticsError::from)?;

        let (theoretical, cashflows) = if analytics.is_bill {
            let theoretical = theoretical_price(security, &curve, self.valuation_date)?;
            let cashflows = vec![Cashflow::new(
                self.valuation_date,
                security.maturity_date,
                FACE_VALUE,
            )];
            (theoretical, cashflows)
        } else {
            let cashflows = schedule_for_security(security, self.valuation_date)?;
            (price_cashflows(&cashflows, &curve), cashflows)
        };

        Ok(SecurityAnalysis {
            cusip: security.cusip.clone(),
            theoretical_price: theoretical,
            dirty_price: analytics.dirty_price,
            pricing_error: pricing_error(theoretical, analytics.dirty_price),
            cashflows,
        })
    }

    /// Looks up both records for a CUSIP, or reports not-found.
    fn records(&self, cusip: &str) -> AnalyticsResult<(&SecurityMaster, &PriceQuote)> {
        let security = self
            .provider
            .security(cusip)
            .ok_or_else(|| AnalyticsError::not_found(cusip))?;
        let quote = self
            .provider
            .price(cusip)
            .ok_or_else(|| AnalyticsError::not_found(cusip))?;
        Ok((security, quote))
    }

    /// Builds the calibration universe: every coupon-bearing security
    /// with a price quote and a non-empty future cashflow schedule,
    /// paired with its dirty price at the settlement date.
    ///
    /// Returns the observations plus the count of securities skipped due
    /// to processing failures (missing quotes, malformed schedules).
    fn build_universe(&self) -> (Vec<BondObservation>, usize) {
        let mut universe = Vec::new();
        let mut skipped = 0;

        for security in self.provider.securities() {
            if !security.is_coupon_bearing() {
                continue;
            }

            let Some(quote) = self.provider.price(&security.cusip) else {
                warn!("skipping {}: no price quote", security.cusip);
                skipped += 1;
                continue;
            };

            let dirty_price = match analyze(security, quote, self.settlement_date) {
                Ok(analytics) => analytics.dirty_price,
                Err(err) => {
                    warn!("skipping {}: {err}", security.cusip);
                    skipped += 1;
                    continue;
                }
            };

            let cashflows = match schedule_for_security(security, self.valuation_date) {
                Ok(flows) => flows,
                Err(err) => {
                    warn!("skipping {}: {err}", security.cusip);
                    skipped += 1;
                    continue;
                }
            };
            if cashflows.is_empty() {
                // Priced after the last coupon opportunity; excluded by
                // rule, not a failure.
                continue;
            }

            universe.push(BondObservation {
                cusip: security.cusip.clone(),
                dirty_price,
                cashflows,
            });
        }

        (universe, skipped)
    }
}
