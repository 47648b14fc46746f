//! Payment cadence and paycheck conversions
//!
//! Income arrives per paycheck; the allocation engine works on a monthly
//! basis. The two directions use different factors:
//!
//! | Cadence      | to monthly | to periodic |
//! |--------------|------------|-------------|
//! | Weekly       | × 4        | ÷ 4.33      |
//! | Bi-weekly    | × 2        | ÷ 2.167     |
//! | Semi-monthly | × 2        | ÷ 2.0       |
//! | Monthly      | × 1        | × 1         |
//!
//! `to_monthly` counts whole paychecks in a month, `to_periodic` uses the
//! calendar average (52 / 12 weeks per month). They are not inverses for
//! weekly and bi-weekly pay and must not be "fixed" to be.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often income is received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentCadence {
    Weekly,
    #[serde(alias = "biweekly", alias = "biWeekly")]
    BiWeekly,
    #[serde(alias = "semimonthly", alias = "semiMonthly")]
    SemiMonthly,
    #[default]
    Monthly,
}

impl PaymentCadence {
    /// All cadences in display order
    pub fn all() -> &'static [Self] {
        &[Self::Weekly, Self::BiWeekly, Self::SemiMonthly, Self::Monthly]
    }

    /// Whole paychecks counted per month when converting to monthly
    pub const fn monthly_multiplier(&self) -> f64 {
        match self {
            Self::Weekly => 4.0,
            Self::BiWeekly => 2.0,
            Self::SemiMonthly => 2.0,
            Self::Monthly => 1.0,
        }
    }

    /// Average paychecks per calendar month used when converting back
    pub const fn periodic_divisor(&self) -> f64 {
        match self {
            Self::Weekly => 4.33,
            Self::BiWeekly => 2.167,
            Self::SemiMonthly => 2.0,
            Self::Monthly => 1.0,
        }
    }

    /// Paychecks received in a year
    pub const fn paychecks_per_year(&self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::BiWeekly => 26,
            Self::SemiMonthly => 24,
            Self::Monthly => 12,
        }
    }

    /// Convert a per-paycheck amount to its monthly equivalent
    pub fn to_monthly(&self, amount: f64) -> f64 {
        amount * self.monthly_multiplier()
    }

    /// Convert a monthly amount to a per-paycheck amount
    pub fn to_periodic(&self, monthly_amount: f64) -> f64 {
        monthly_amount / self.periodic_divisor()
    }

    /// Convert a per-paycheck amount to its annual equivalent
    pub fn to_annual(&self, amount: f64) -> f64 {
        amount * f64::from(self.paychecks_per_year())
    }

    /// Convert an annual amount to a per-paycheck amount
    pub fn from_annual(&self, annual_amount: f64) -> f64 {
        annual_amount / f64::from(self.paychecks_per_year())
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::SemiMonthly => "Semi-monthly",
            Self::Monthly => "Monthly",
        }
    }
}

/// Convert a per-paycheck amount to its monthly equivalent
pub fn to_monthly(amount: f64, cadence: PaymentCadence) -> f64 {
    cadence.to_monthly(amount)
}

/// Convert a monthly amount to a per-paycheck amount
pub fn to_periodic(monthly_amount: f64, cadence: PaymentCadence) -> f64 {
    cadence.to_periodic(monthly_amount)
}

impl fmt::Display for PaymentCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when a cadence name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadenceParseError(pub String);

impl fmt::Display for CadenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown payment cadence '{}' (expected weekly, bi-weekly, semi-monthly or monthly)",
            self.0
        )
    }
}

impl std::error::Error for CadenceParseError {}

impl FromStr for PaymentCadence {
    type Err = CadenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "fortnightly" => Ok(Self::BiWeekly),
            "semimonthly" | "twicemonthly" => Ok(Self::SemiMonthly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(CadenceParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_monthly_uses_whole_paychecks() {
        assert_eq!(to_monthly(1000.0, PaymentCadence::Weekly), 4000.0);
        assert_eq!(to_monthly(2000.0, PaymentCadence::BiWeekly), 4000.0);
        assert_eq!(to_monthly(2000.0, PaymentCadence::SemiMonthly), 4000.0);
        assert_eq!(to_monthly(4000.0, PaymentCadence::Monthly), 4000.0);
    }

    #[test]
    fn test_to_periodic_uses_calendar_divisors() {
        assert!((to_periodic(4330.0, PaymentCadence::Weekly) - 1000.0).abs() < 1e-9);
        assert!((to_periodic(4000.0, PaymentCadence::SemiMonthly) - 2000.0).abs() < 1e-9);
        assert_eq!(to_periodic(4000.0, PaymentCadence::Monthly), 4000.0);
    }

    #[test]
    fn test_biweekly_conversions_are_asymmetric() {
        let monthly = to_monthly(2000.0, PaymentCadence::BiWeekly);
        assert_eq!(monthly, 4000.0);

        let back = to_periodic(monthly, PaymentCadence::BiWeekly);
        assert!((back - 4000.0 / 2.167).abs() < 1e-9);
        assert!((back - 1845.87).abs() < 0.01);
        assert!(back < 2000.0);
    }

    #[test]
    fn test_semi_monthly_and_monthly_round_trip() {
        for cadence in [PaymentCadence::SemiMonthly, PaymentCadence::Monthly] {
            let back = to_periodic(to_monthly(1234.5, cadence), cadence);
            assert!((back - 1234.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_annual_conversions() {
        assert_eq!(PaymentCadence::BiWeekly.to_annual(2000.0), 52000.0);
        assert_eq!(PaymentCadence::Weekly.from_annual(52000.0), 1000.0);
        assert_eq!(PaymentCadence::SemiMonthly.paychecks_per_year(), 24);
    }

    #[test]
    fn test_parse() {
        assert_eq!("weekly".parse::<PaymentCadence>().unwrap(), PaymentCadence::Weekly);
        assert_eq!("Bi-Weekly".parse::<PaymentCadence>().unwrap(), PaymentCadence::BiWeekly);
        assert_eq!("biWeekly".parse::<PaymentCadence>().unwrap(), PaymentCadence::BiWeekly);
        assert_eq!("semi_monthly".parse::<PaymentCadence>().unwrap(), PaymentCadence::SemiMonthly);
        assert_eq!(" Monthly ".parse::<PaymentCadence>().unwrap(), PaymentCadence::Monthly);
        assert_eq!("fortnightly".parse::<PaymentCadence>().unwrap(), PaymentCadence::BiWeekly);
        assert!("daily".parse::<PaymentCadence>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PaymentCadence::BiWeekly).unwrap();
        assert_eq!(json, "\"bi-weekly\"");

        let parsed: PaymentCadence = serde_json::from_str("\"semiMonthly\"").unwrap();
        assert_eq!(parsed, PaymentCadence::SemiMonthly);
    }
}
