//! Theoretical pricing under a calibrated NSS curve.

use govcurve_core::{Cashflow, Date, SecurityMaster};
use govcurve_curves::Svensson;

use crate::error::BondResult;
use crate::schedule::{schedule_for_security, FACE_VALUE};

/// Computes the theoretical price of a security under a fitted curve.
///
/// Coupon securities discount their future cashflow schedule; bills are a
/// single face-value cashflow at maturity. An empty schedule (a security
/// priced after its last coupon opportunity) prices to zero present
/// value, mirroring "no usable cashflows".
///
/// # Errors
///
/// Propagates schedule generation failures for coupon securities.
pub fn theoretical_price(
    security: &SecurityMaster,
    curve: &Svensson,
    valuation_date: Date,
) -> BondResult<f64> {
    if security.frequency().is_bill() {
        let t = valuation_date.year_fraction(&security.maturity_date);
        return Ok(FACE_VALUE * curve.discount_factor(t));
    }

    let cashflows = schedule_for_security(security, valuation_date)?;
    Ok(curve.present_value(&cashflows))
}

/// Computes the theoretical price over an already-generated schedule.
///
/// Useful when the caller needs the cashflows as well and wants to avoid
/// rebuilding them.
#[must_use]
pub fn price_cashflows(cashflows: &[Cashflow], curve: &Svensson) -> f64 {
    curve.present_value(cashflows)
}

/// Pricing error: theoretical price minus observed dirty price.
#[must_use]
pub fn pricing_error(theoretical: f64, dirty_price: f64) -> f64 {
    theoretical - dirty_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use govcurve_core::DAYS_PER_YEAR;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flat(rate: f64) -> Svensson {
        Svensson::new(rate, 0.0, 0.0, 0.0, 1.0, 3.0).unwrap()
    }

    #[test]
    fn test_bill_prices_as_single_discounted_face() {
        let bill = SecurityMaster {
            cusip: "912796ABC".to_string(),
            security_type: "Bill".to_string(),
            term: Some("52-Week".to_string()),
            issue_date: None,
            maturity_date: date(2026, 11, 19),
            coupon_rate: None,
            dated_date: None,
            first_coupon_date: None,
            frequency_text: None,
        };
        let valuation = date(2025, 11, 20);

        let price = theoretical_price(&bill, &flat(0.05), valuation).unwrap();

        let t = valuation.days_between(&date(2026, 11, 19)) as f64 / DAYS_PER_YEAR;
        assert_relative_eq!(price, 100.0 * (-0.05 * t).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_coupon_security_discounts_schedule() {
        let note = SecurityMaster {
            cusip: "912828XYZ".to_string(),
            security_type: "Note".to_string(),
            term: Some("2-Year".to_string()),
            issue_date: None,
            maturity_date: date(2027, 1, 15),
            coupon_rate: Some(4.0),
            dated_date: Some(date(2025, 1, 15)),
            first_coupon_date: None,
            frequency_text: Some("Semi-Annual".to_string()),
        };
        let valuation = date(2025, 11, 20);
        let curve = flat(0.05);

        let price = theoretical_price(&note, &curve, valuation).unwrap();

        let flows = schedule_for_security(&note, valuation).unwrap();
        let expected: f64 = flows
            .iter()
            .map(|cf| cf.amount * (-0.05 * cf.t_years).exp())
            .sum();
        assert_relative_eq!(price, expected, epsilon = 1e-12);
        assert_relative_eq!(price, price_cashflows(&flows, &curve), epsilon = 0.0);
    }

    #[test]
    fn test_par_pricing_sanity() {
        // A coupon near the discount rate should price near par.
        let note = SecurityMaster {
            cusip: "912828PAR".to_string(),
            security_type: "Note".to_string(),
            term: Some("5-Year".to_string()),
            issue_date: None,
            maturity_date: date(2030, 11, 20),
            coupon_rate: Some(5.0),
            dated_date: Some(date(2025, 11, 20)),
            first_coupon_date: None,
            frequency_text: Some("Semi-Annual".to_string()),
        };

        // Continuous 4.94% is close to 5% semi-annual compounding.
        let price = theoretical_price(&note, &flat(0.0494), date(2025, 11, 20)).unwrap();
        assert!((price - 100.0).abs() < 1.0, "price {price} should be near par");
    }

    #[test]
    fn test_pricing_error_sign() {
        assert_relative_eq!(pricing_error(99.0, 98.5), 0.5);
        assert_relative_eq!(pricing_error(98.0, 98.5), -0.5);
    }
}
