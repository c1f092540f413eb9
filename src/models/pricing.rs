use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::round_cents;
use crate::constants::pricing::{COPAY_RATE, DEDUCTIBLE_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    #[serde(rename = "Medicare Part D Standard")]
    PartDStandard,
    #[serde(rename = "Medicare Advantage PPO")]
    AdvantagePpo,
    #[serde(rename = "Medicare Advantage HMO")]
    AdvantageHmo,
}

impl PlanType {
    pub const ALL: [Self; 3] = [Self::PartDStandard, Self::AdvantagePpo, Self::AdvantageHmo];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PartDStandard => "Medicare Part D Standard",
            Self::AdvantagePpo => "Medicare Advantage PPO",
            Self::AdvantageHmo => "Medicare Advantage HMO",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown plan type: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PharmacyType {
    #[serde(rename = "Retail Pharmacy")]
    Retail,
    #[serde(rename = "Mail Order")]
    MailOrder,
    #[serde(rename = "Preferred Pharmacy")]
    Preferred,
}

impl PharmacyType {
    pub const ALL: [Self; 3] = [Self::Retail, Self::MailOrder, Self::Preferred];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retail => "Retail Pharmacy",
            Self::MailOrder => "Mail Order",
            Self::Preferred => "Preferred Pharmacy",
        }
    }
}

impl fmt::Display for PharmacyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PharmacyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown pharmacy type: {s}"))
    }
}

/// One plan/pharmacy cost observation.
///
/// `copay` and `deductible` are derived from `cost` and never stored, so a
/// quote read back from the cache carries the same figures it was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingQuote {
    pub plan_type: PlanType,
    pub pharmacy_type: PharmacyType,
    pub cost: f64,
    pub copay: f64,
    pub deductible: f64,
}

impl PricingQuote {
    #[must_use]
    pub fn new(plan_type: PlanType, pharmacy_type: PharmacyType, cost: f64) -> Self {
        let cost = round_cents(cost);
        Self {
            plan_type,
            pharmacy_type,
            cost,
            copay: round_cents(cost * COPAY_RATE),
            deductible: round_cents(cost * DEDUCTIBLE_RATE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_type_round_trips_through_str() {
        for plan in PlanType::ALL {
            assert_eq!(plan.as_str().parse::<PlanType>().unwrap(), plan);
        }
        assert!("Medicaid".parse::<PlanType>().is_err());
    }

    #[test]
    fn test_pharmacy_type_serializes_as_label() {
        let json = serde_json::to_string(&PharmacyType::MailOrder).unwrap();
        assert_eq!(json, "\"Mail Order\"");
        assert!("Drive Thru".parse::<PharmacyType>().is_err());
    }

    #[test]
    fn test_quote_derives_copay_and_deductible() {
        let quote = PricingQuote::new(PlanType::AdvantageHmo, PharmacyType::Retail, 100.004);
        assert!((quote.cost - 100.0).abs() < 1e-9);
        assert!((quote.copay - 20.0).abs() < 1e-9);
        assert!((quote.deductible - 80.0).abs() < 1e-9);
    }
}
