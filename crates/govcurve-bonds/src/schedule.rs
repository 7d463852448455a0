//! Future cashflow schedule generation.
//!
//! Builds the ordered list of future coupon and principal payments for a
//! coupon-bearing security, from a valuation date to maturity. Bills have
//! no schedule and are rejected here; callers branch on the frequency
//! classification first.
//!
//! The first coupon date is resolved in priority order:
//!
//! 1. The explicit first coupon date from the security master.
//! 2. One period after the dated date, when a dated date is present.
//! 3. Otherwise the schedule is implied: walk backward from maturity in
//!    whole periods until the next backward step would land on or before
//!    the valuation date, and keep the date just before crossing.
//!
//! All month steps preserve the end-of-month property, so month-end
//! coupon anchors do not drift across short months.

use serde::{Deserialize, Serialize};

use govcurve_core::{Cashflow, Date, SecurityMaster};

use crate::error::{BondError, BondResult};

/// Face value per the quoting convention; all amounts are per 100 face.
pub const FACE_VALUE: f64 = 100.0;

/// Configuration for schedule generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Valuation date; only cashflows strictly after it are emitted.
    pub valuation_date: Date,
    /// Maturity date (final coupon plus principal redemption).
    pub maturity_date: Date,
    /// Annual coupon rate in percent; must be positive.
    pub coupon_rate: f64,
    /// Coupon periods per year; must be positive and divide 12.
    pub periods_per_year: u32,
    /// Interest accrual start date, when known.
    pub dated_date: Option<Date>,
    /// Explicit first coupon date override.
    pub first_coupon_date: Option<Date>,
}

impl ScheduleConfig {
    /// Creates a new schedule configuration.
    #[must_use]
    pub fn new(
        valuation_date: Date,
        maturity_date: Date,
        coupon_rate: f64,
        periods_per_year: u32,
    ) -> Self {
        Self {
            valuation_date,
            maturity_date,
            coupon_rate,
            periods_per_year,
            dated_date: None,
            first_coupon_date: None,
        }
    }

    /// Sets the dated date.
    #[must_use]
    pub fn with_dated_date(mut self, date: Date) -> Self {
        self.dated_date = Some(date);
        self
    }

    /// Sets the explicit first coupon date.
    #[must_use]
    pub fn with_first_coupon_date(mut self, date: Date) -> Self {
        self.first_coupon_date = Some(date);
        self
    }
}

/// Generates the future cashflow schedule for a coupon-bearing security.
///
/// Emits one cashflow per coupon date strictly after the valuation date,
/// up to and including maturity; the maturity cashflow carries the final
/// coupon plus the 100 principal redemption.
///
/// An empty result is a valid outcome, not an error: a security priced
/// after its last coupon opportunity simply has no usable cashflows.
///
/// # Errors
///
/// Returns `BondError::InvalidSchedule` if the frequency is not a
/// positive divisor of 12 months, or `BondError::InvalidInput` if the
/// coupon rate is not positive (bills are excluded upstream).
pub fn generate(config: &ScheduleConfig) -> BondResult<Vec<Cashflow>> {
    if config.periods_per_year == 0 || 12 % config.periods_per_year != 0 {
        return Err(BondError::invalid_schedule(format!(
            "periods per year must be a positive divisor of 12, got {}",
            config.periods_per_year
        )));
    }
    if config.coupon_rate <= 0.0 {
        return Err(BondError::invalid_input(format!(
            "coupon rate must be positive for a scheduled security, got {}",
            config.coupon_rate
        )));
    }

    let months = (12 / config.periods_per_year) as i32;
    let first = first_coupon_date(config, months)?;

    let coupon = FACE_VALUE * config.coupon_rate / 100.0 / f64::from(config.periods_per_year);
    let mut flows = Vec::new();

    let mut date = first;
    while date < config.maturity_date {
        if date > config.valuation_date {
            flows.push(Cashflow::new(config.valuation_date, date, coupon));
        }
        date = date.add_months_eom(months)?;
    }
    if config.maturity_date > config.valuation_date {
        flows.push(Cashflow::new(
            config.valuation_date,
            config.maturity_date,
            coupon + FACE_VALUE,
        ));
    }

    Ok(flows)
}

/// Resolves the first coupon date per the priority rules.
fn first_coupon_date(config: &ScheduleConfig, months: i32) -> BondResult<Date> {
    if let Some(explicit) = config.first_coupon_date {
        return Ok(explicit);
    }
    if let Some(dated) = config.dated_date {
        return Ok(dated.add_months_eom(months)?);
    }

    // No anchors: reconstruct the implied grid backward from maturity,
    // floored at the valuation date.
    let mut first = config.maturity_date;
    loop {
        let prev = first.add_months_eom(-months)?;
        if prev <= config.valuation_date {
            break;
        }
        first = prev;
    }
    Ok(first)
}

/// Builds the future cashflow schedule for a security master record.
///
/// # Errors
///
/// Returns `BondError::InvalidInput` for bills and zero/null-coupon
/// securities, which have no coupon schedule.
pub fn schedule_for_security(
    security: &SecurityMaster,
    valuation_date: Date,
) -> BondResult<Vec<Cashflow>> {
    let frequency = security.frequency();
    if frequency.is_bill() {
        return Err(BondError::invalid_input(format!(
            "{} is classified as a bill and has no coupon schedule",
            security.cusip
        )));
    }
    let coupon_rate = match security.coupon_rate {
        Some(rate) if rate > 0.0 => rate,
        _ => {
            return Err(BondError::invalid_input(format!(
                "{} has no positive coupon rate",
                security.cusip
            )))
        }
    };

    let mut config = ScheduleConfig::new(
        valuation_date,
        security.maturity_date,
        coupon_rate,
        frequency.periods_per_year(),
    );
    if let Some(dated) = security.dated_date {
        config = config.with_dated_date(dated);
    }
    if let Some(first) = security.first_coupon_date {
        config = config.with_first_coupon_date(first);
    }

    generate(&config)
}
