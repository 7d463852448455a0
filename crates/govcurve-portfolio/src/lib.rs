//! # govcurve Portfolio
//!
//! The public boundary of the analytics core: a read-only
//! [`MarketDataProvider`] trait for the external data store, and the
//! [`AnalyticsEngine`] exposing the four per-call operations:
//!
//! - `calculate_analytics`: accrued interest and clean/dirty prices for
//!   one security
//! - `fit_curve`: NSS calibration over the coupon-bearing universe
//! - `analyze_portfolio`: calibrate, then reprice every universe bond
//! - `analyze_security`: calibrate, then price one security
//!
//! Every operation is a pure function of the provider's records plus the
//! engine's explicit valuation and settlement dates; there is no cross-call
//! cache or shared mutable state. Expected failures (missing records, an
//! empty calibration universe) are dedicated error variants, never panics.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod engine;
pub mod error;
pub mod provider;

pub use engine::{
    AnalyticsEngine, PortfolioAnalysis, PortfolioSummary, SecurityAnalysis, SecurityPricing,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use provider::{InMemoryProvider, MarketDataProvider};
