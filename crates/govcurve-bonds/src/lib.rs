//! # govcurve Bonds
//!
//! Per-security analytics for government securities:
//!
//! - **Schedules**: future coupon + principal cashflow generation from a
//!   valuation date to maturity, with end-of-month-aware coupon rolls and
//!   implied-schedule reconstruction when explicit anchors are absent
//! - **Analytics**: coupon-bracket search, day-count fraction, accrued
//!   interest, and clean/dirty prices, including the bill special case
//! - **Pricing**: theoretical present value under a calibrated NSS curve
//!   and the resulting pricing error

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod analytics;
pub mod error;
pub mod pricing;
pub mod schedule;

pub use analytics::{analyze, coupon_bracket, BondAnalytics, CouponBracket};
pub use error::{BondError, BondResult};
pub use pricing::{price_cashflows, pricing_error, theoretical_price};
pub use schedule::{generate, schedule_for_security, ScheduleConfig, FACE_VALUE};
