//! Accrued interest and clean/dirty price analytics.

use log::warn;
use serde::{Deserialize, Serialize};

use govcurve_core::{Date, PriceQuote, SecurityMaster};

use crate::error::{BondError, BondResult};
use crate::schedule::FACE_VALUE;

/// The coupon period containing a settlement date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouponBracket {
    /// Last coupon date on or before settlement.
    pub last_coupon: Date,
    /// Next coupon date after settlement (maturity for the final period).
    pub next_coupon: Date,
    /// Calendar days in the period.
    pub days_in_period: i64,
    /// Calendar days elapsed from the last coupon to settlement.
    pub days_into_period: i64,
}

/// Per-security pricing analytics at a settlement date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondAnalytics {
    /// Security identifier.
    pub cusip: String,
    /// Quoted clean price per 100 face.
    pub clean_price: f64,
    /// Accrued interest per 100 face.
    pub accrued_interest: f64,
    /// Clean price plus accrued interest.
    pub dirty_price: f64,
    /// Fraction of the current coupon period elapsed at settlement.
    pub day_count_fraction: f64,
    /// True when the security is classified as a bill; bills carry no
    /// accrual and quote flat.
    pub is_bill: bool,
    /// The coupon bracket containing settlement; absent for bills.
    pub bracket: Option<CouponBracket>,
}

/// Finds the coupon bracket containing `settlement`.
///
/// Walks backward from maturity in whole end-of-month-preserving periods
/// until the previous step would fall on or before settlement; the
/// bracket is that step and the date after it.
///
/// # Errors
///
/// Returns `BondError::InvalidSchedule` if the frequency is not a
/// positive divisor of 12 months.
pub fn coupon_bracket(
    settlement: Date,
    maturity: Date,
    periods_per_year: u32,
) -> BondResult<CouponBracket> {
    if periods_per_year == 0 || 12 % periods_per_year != 0 {
        return Err(BondError::invalid_schedule(format!(
            "periods per year must be a positive divisor of 12, got {periods_per_year}"
        )));
    }
    let months = (12 / periods_per_year) as i32;

    let mut next = maturity;
    let last = loop {
        let prev = next.add_months_eom(-months)?;
        if prev <= settlement {
            break prev;
        }
        next = prev;
    };

    let days_in_period = last.days_between(&next);
    let days_into_period = last.days_between(&settlement);

    Ok(CouponBracket {
        last_coupon: last,
        next_coupon: next,
        days_in_period,
        days_into_period,
    })
}

/// Computes accrued interest, clean/dirty prices, and the day-count
/// fraction for one security at a settlement date.
///
/// Bills quote flat: zero accrued, dirty equals clean, `f = 0`. For
/// coupon securities a zero-width coupon bracket is guarded to `f = 0`
/// rather than raised as an error, and the fraction is clamped to
/// `[0, 1]`, so a settlement on or after maturity accrues at most one
/// full coupon.
///
/// # Errors
///
/// Returns `BondError::InvalidSchedule` when the coupon bracket walk
/// cannot be performed.
pub fn analyze(
    security: &SecurityMaster,
    quote: &PriceQuote,
    settlement: Date,
) -> BondResult<BondAnalytics> {
    let frequency = security.frequency();

    if frequency.is_bill() {
        return Ok(BondAnalytics {
            cusip: security.cusip.clone(),
            clean_price: quote.clean_price,
            accrued_interest: 0.0,
            dirty_price: quote.clean_price,
            day_count_fraction: 0.0,
            is_bill: true,
            bracket: None,
        });
    }

    let bracket = coupon_bracket(
        settlement,
        security.maturity_date,
        frequency.periods_per_year(),
    )?;

    // Degenerate-schedule guard: a zero-width period accrues nothing.
    // The clamp caps accrual at one full coupon when settlement falls
    // on or after maturity.
    let fraction = if bracket.days_in_period == 0 {
        warn!("{}: zero-width coupon period at settlement", security.cusip);
        0.0
    } else {
        (bracket.days_into_period as f64 / bracket.days_in_period as f64).clamp(0.0, 1.0)
    };

    let coupon_rate = security.coupon_rate.unwrap_or(0.0);
    let coupon_per_period =
        FACE_VALUE * coupon_rate / 100.0 / f64::from(frequency.periods_per_year());
    let accrued_interest = coupon_per_period * fraction;
    let dirty_price = quote.clean_price + accrued_interest;

    Ok(BondAnalytics {
        cusip: security.cusip.clone(),
        clean_price: quote.clean_price,
        accrued_interest,
        dirty_price,
        day_count_fraction: fraction,
        is_bill: false,
        bracket: Some(bracket),
    })
}
