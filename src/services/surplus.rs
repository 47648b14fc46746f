//! Surplus distribution
//!
//! Income left after the four stages is split 70/30 between the Emergency
//! Fund and the most essential debt with a due date. Whatever finds no
//! recipient is handled by [`UndistributedSurplusPolicy`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::CategoryKind;
use crate::policy::DEBT_TO_INCOME_CEILING;

use super::waterfall::{by_priority, entered, total_of, Entry};

/// Share of the surplus added to the Emergency Fund
pub const EMERGENCY_FUND_SURPLUS_SHARE: f64 = 0.70;

/// Share of the surplus added to the most essential debt
pub const DEBT_SURPLUS_SHARE: f64 = 0.30;

/// What happens to surplus that has no eligible recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndistributedSurplusPolicy {
    /// Keep it in `surplus_or_deficit`
    #[default]
    Retain,
    /// Move it to `undistributed_surplus`
    Discard,
}

impl fmt::Display for UndistributedSurplusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::Discard => write!(f, "discard"),
        }
    }
}

impl FromStr for UndistributedSurplusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retain" | "keep" => Ok(Self::Retain),
            "discard" => Ok(Self::Discard),
            other => Err(format!(
                "Unknown surplus policy '{}' (expected retain or discard)",
                other
            )),
        }
    }
}

/// Hand out a non-negative surplus; returns the part nobody received
pub(crate) fn distribute_surplus(entries: &mut [Entry<'_>], surplus: f64, income: f64) -> f64 {
    if surplus <= 0.0 {
        return 0.0;
    }

    let mut undistributed = 0.0;

    let emergency_share = surplus * EMERGENCY_FUND_SURPLUS_SHARE;
    match entries.iter_mut().find(|e| e.category.is_emergency_fund()) {
        Some(entry) => entry.line.amount += emergency_share,
        None => undistributed += emergency_share,
    }

    let debt_share = surplus * DEBT_SURPLUS_SHARE;
    let headroom = (income * DEBT_TO_INCOME_CEILING - total_of(entries, CategoryKind::Debt)).max(0.0);
    let recipient = by_priority(entries, CategoryKind::Debt)
        .into_iter()
        .find(|&i| {
            let category = entries[i].category;
            category.due_date.is_some() && entered(category.requested_amount).is_some()
        });

    match recipient {
        Some(idx) => {
            let paid = debt_share.min(headroom);
            entries[idx].line.amount += paid;
            undistributed += debt_share - paid;
        }
        None => undistributed += debt_share,
    }

    undistributed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!(
            "Discard".parse::<UndistributedSurplusPolicy>().unwrap(),
            UndistributedSurplusPolicy::Discard
        );
        assert_eq!(
            "retain".parse::<UndistributedSurplusPolicy>().unwrap(),
            UndistributedSurplusPolicy::Retain
        );
        assert!("spend".parse::<UndistributedSurplusPolicy>().is_err());
        assert_eq!(UndistributedSurplusPolicy::default().to_string(), "retain");
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&UndistributedSurplusPolicy::Discard).unwrap();
        assert_eq!(json, "\"discard\"");
    }

    #[test]
    fn test_shares_sum_to_one() {
        assert!((EMERGENCY_FUND_SURPLUS_SHARE + DEBT_SURPLUS_SHARE - 1.0).abs() < 1e-12);
    }
}
