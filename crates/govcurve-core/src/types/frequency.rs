//! Payment frequency and its classification from security master text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment frequency for a security.
///
/// Derived from security master fields by [`Frequency::classify`]; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - the Treasury note/bond default
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Bill / zero coupon (no periodic payments)
    Bill,
}

impl Frequency {
    /// Returns the number of coupon periods per year (0 for bills).
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Bill => 0,
        }
    }

    /// Returns the number of months per coupon period (0 for bills).
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Bill => 0,
        }
    }

    /// Returns true if this is a bill (no periodic payments).
    #[must_use]
    pub fn is_bill(&self) -> bool {
        matches!(self, Frequency::Bill)
    }

    /// Classifies a security's payment frequency from master-file text.
    ///
    /// The rule set, in precedence order:
    ///
    /// 1. Security type contains "bill", frequency text contains "none",
    ///    or the coupon rate is null or zero: bill.
    /// 2. First match in [`TEXT_RULES`] against the frequency text, then
    ///    the security type.
    /// 3. Semi-annual fallback (conservative: it is the Treasury coupon
    ///    convention).
    ///
    /// Matching is case-insensitive substring matching. The text rules
    /// are data, not branching, so the table can be unit-tested and
    /// swapped wholesale.
    #[must_use]
    pub fn classify(
        security_type: &str,
        frequency_text: Option<&str>,
        coupon_rate: Option<f64>,
    ) -> Self {
        let ty = security_type.to_lowercase();
        let freq = frequency_text.unwrap_or_default().to_lowercase();

        if ty.contains("bill") || freq.contains("none") {
            return Frequency::Bill;
        }
        match coupon_rate {
            Some(rate) if rate != 0.0 => {}
            _ => return Frequency::Bill,
        }

        for rule in TEXT_RULES {
            let haystack = match rule.field {
                TextField::FrequencyText => &freq,
                TextField::SecurityType => &ty,
            };
            if haystack.contains(rule.pattern) {
                return rule.frequency;
            }
        }

        Frequency::SemiAnnual
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bill => "Bill",
        };
        write!(f, "{name}")
    }
}

/// Which master-file field a classification rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// The free-text payment-frequency descriptor.
    FrequencyText,
    /// The security type label.
    SecurityType,
}

/// One ordered classification rule: substring pattern over a field.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Field the pattern is matched against.
    pub field: TextField,
    /// Lowercase substring to look for.
    pub pattern: &'static str,
    /// Frequency assigned on the first match.
    pub frequency: Frequency,
}

/// Ordered text rules applied after the bill checks.
///
/// Frequency-descriptor patterns take precedence over security-type
/// patterns; "annual" must precede "year" only in documentation terms
/// since both map to the same frequency.
pub const TEXT_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        field: TextField::FrequencyText,
        pattern: "semi",
        frequency: Frequency::SemiAnnual,
    },
    ClassificationRule {
        field: TextField::FrequencyText,
        pattern: "quarter",
        frequency: Frequency::Quarterly,
    },
    ClassificationRule {
        field: TextField::FrequencyText,
        pattern: "annual",
        frequency: Frequency::Annual,
    },
    ClassificationRule {
        field: TextField::FrequencyText,
        pattern: "year",
        frequency: Frequency::Annual,
    },
    ClassificationRule {
        field: TextField::SecurityType,
        pattern: "note",
        frequency: Frequency::SemiAnnual,
    },
    ClassificationRule {
        field: TextField::SecurityType,
        pattern: "bond",
        frequency: Frequency::SemiAnnual,
    },
];
